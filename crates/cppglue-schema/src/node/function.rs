use crate::{
    node::method::void,
    prelude::*,
    validate::naming::{validate_ident, validate_path},
};

///
/// FunctionDecl
/// A free function bound at module level, next to classes and enums.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FunctionDecl {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<TypeRef>,

    #[serde(default = "void")]
    pub return_type: TypeRef,
}

impl FunctionDecl {
    #[must_use]
    pub fn new(name: impl Into<String>, return_type: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            path: None,
            parameters: Vec::new(),
            return_type: return_type.into(),
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_param(mut self, ty: impl Into<TypeRef>) -> Self {
        self.parameters.push(ty.into());
        self
    }

    /// Qualified native path, falling back to the plain name.
    #[must_use]
    pub fn resolved_path(&self) -> &str {
        self.path.as_deref().unwrap_or(&self.name)
    }
}

impl ValidateNode for FunctionDecl {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if let Err(msg) = validate_ident(&self.name) {
            errs.add(msg);
        }
        if let Some(path) = &self.path
            && let Err(msg) = validate_path(path)
        {
            errs.add(msg);
        }

        errs.result()
    }
}

impl VisitableNode for FunctionDecl {
    fn route_key(&self) -> String {
        self.name.clone()
    }
}
