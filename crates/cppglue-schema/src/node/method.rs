use crate::{prelude::*, validate::naming::validate_ident};

///
/// MethodDecl
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MethodDecl {
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<TypeRef>,

    #[serde(default = "void")]
    pub return_type: TypeRef,
}

impl MethodDecl {
    #[must_use]
    pub fn new(name: impl Into<String>, return_type: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type: return_type.into(),
        }
    }

    #[must_use]
    pub fn with_param(mut self, ty: impl Into<TypeRef>) -> Self {
        self.parameters.push(ty.into());
        self
    }

    #[must_use]
    pub const fn arity(&self) -> usize {
        self.parameters.len()
    }
}

pub(crate) const fn void() -> TypeRef {
    TypeRef::Void
}

impl ValidateNode for MethodDecl {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if let Err(msg) = validate_ident(&self.name) {
            errs.add(msg);
        }

        errs.result()
    }
}

impl VisitableNode for MethodDecl {
    fn route_key(&self) -> String {
        self.name.clone()
    }
}
