use crate::{prelude::*, validate::naming::validate_ident};

const fn default_mutable() -> bool {
    true
}

///
/// FieldDecl
///
/// A data member. A field whose type resolves to another class is a
/// reference field and shares the linked native instance on every read.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FieldDecl {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: TypeRef,

    #[serde(default = "default_mutable")]
    pub mutable: bool,
}

impl FieldDecl {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            mutable: true,
        }
    }

    /// A `const` data member; the host can read it but never write it.
    #[must_use]
    pub fn readonly(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        Self {
            mutable: false,
            ..Self::new(name, ty)
        }
    }
}

impl ValidateNode for FieldDecl {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if let Err(msg) = validate_ident(&self.name) {
            errs.add(msg);
        }

        errs.result()
    }
}

impl VisitableNode for FieldDecl {
    fn route_key(&self) -> String {
        self.name.clone()
    }
}
