use crate::{
    prelude::*,
    validate::naming::{validate_ident, validate_path},
};

///
/// ClassDecl
///
/// A native class or struct. Fields and methods share one member namespace;
/// their names must be unique within the class.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ClassDecl {
    pub id: EntityId,
    pub name: String,

    /// Qualified native path (`n1::n2::n3::alpha`); defaults to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDecl>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MethodDecl>,
}

impl ClassDecl {
    #[must_use]
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            path: None,
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn get_method(&self, name: &str) -> Option<&MethodDecl> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Qualified native path, falling back to the plain name.
    #[must_use]
    pub fn resolved_path(&self) -> &str {
        self.path.as_deref().unwrap_or(&self.name)
    }

    /// Ids of every class or enum this class mentions in a signature.
    pub fn referenced_entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        let fields = self.fields.iter().map(|f| f.ty);
        let methods = self
            .methods
            .iter()
            .flat_map(|m| m.parameters.iter().copied().chain([m.return_type]));

        fields.chain(methods).filter_map(TypeRef::entity)
    }
}

impl ValidateNode for ClassDecl {
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

impl VisitableNode for ClassDecl {
    fn route_key(&self) -> String {
        self.name.clone()
    }

    fn drive<V: Visitor>(&self, v: &mut V) {
        for node in &self.fields {
            node.accept(v);
        }
        for node in &self.methods {
            node.accept(v);
        }
    }
}
