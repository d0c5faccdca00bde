use crate::{Error, prelude::*, validate::validate_schema};

///
/// Schema
///
/// One declaration batch as produced by the header parser. Entity references
/// are expected to resolve within the same batch.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Schema {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<ClassDecl>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enums: Vec<EnumDecl>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<FunctionDecl>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<Header>,
}

impl Schema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a declaration batch from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn with_class(mut self, class: ClassDecl) -> Self {
        self.classes.push(class);
        self
    }

    #[must_use]
    pub fn with_enum(mut self, decl: EnumDecl) -> Self {
        self.enums.push(decl);
        self
    }

    #[must_use]
    pub fn with_function(mut self, function: FunctionDecl) -> Self {
        self.functions.push(function);
        self
    }

    #[must_use]
    pub fn with_header(mut self, header: Header) -> Self {
        self.headers.push(header);
        self
    }

    #[must_use]
    pub fn get_class(&self, id: EntityId) -> Option<&ClassDecl> {
        self.classes.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn get_enum(&self, id: EntityId) -> Option<&EnumDecl> {
        self.enums.iter().find(|e| e.id == id)
    }

    /// Node-local validation over every declaration.
    pub fn validate(&self) -> Result<(), Error> {
        validate_schema(self).map_err(Error::Validation)
    }
}

impl ValidateNode for Schema {}

impl VisitableNode for Schema {
    fn drive<V: Visitor>(&self, v: &mut V) {
        for node in &self.classes {
            node.accept(v);
        }
        for node in &self.enums {
            node.accept(v);
        }
        for node in &self.functions {
            node.accept(v);
        }
        for node in &self.headers {
            node.accept(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALPHA_JSON: &str = r#"{
        "classes": [{
            "id": 1,
            "name": "alpha",
            "path": "n1::n2::n3::alpha",
            "fields": [
                {"name": "a", "type": {"Complex": "Double"}},
                {"name": "b", "type": "String"},
                {"name": "z", "type": {"Entity": 2}, "mutable": true}
            ],
            "methods": [
                {"name": "print", "parameters": [{"Primitive": "Int32"}], "return_type": "String"}
            ]
        }],
        "enums": [{
            "id": 2,
            "name": "zeta",
            "enumerators": [{"name": "A", "value": 1}, {"name": "B"}, {"name": "C"}]
        }],
        "headers": [{"name": "another_ex.h", "path": "/src/another_ex.h"}]
    }"#;

    #[test]
    fn loads_a_declaration_batch_from_json() {
        let schema = Schema::from_json(ALPHA_JSON).unwrap();

        let alpha = schema.get_class(EntityId::new(1)).unwrap();
        assert_eq!(alpha.resolved_path(), "n1::n2::n3::alpha");
        assert_eq!(alpha.fields.len(), 3);
        assert!(alpha.get_field("b").unwrap().mutable, "fields default to mutable");
        assert_eq!(alpha.get_method("print").unwrap().arity(), 1);

        let zeta = schema.get_enum(EntityId::new(2)).unwrap();
        assert_eq!(zeta.get("C").map(|e| e.value), Some(3));

        assert!(!schema.headers[0].system);
        assert!(schema.validate().is_ok());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            Schema::from_json(r#"{"classes": [{"name": "x"}]}"#),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn validation_routes_errors_to_the_offending_member() {
        let schema = Schema::new()
            .with_class(
                ClassDecl::new(EntityId::new(1), "alpha")
                    .with_field(FieldDecl::new("lambda", Primitive::Int32))
                    .with_method(MethodDecl::new("", TypeRef::Void)),
            )
            .with_enum(
                EnumDecl::new(EntityId::new(2), "zeta")
                    .with_value("None", 0)
                    .with_next("2nd"),
            );

        let Err(Error::Validation(errs)) = schema.validate() else {
            panic!("expected validation failure");
        };

        let flat = errs.flatten();
        assert!(flat.iter().any(|(route, msg)| route == "alpha" && msg.contains("empty")));
        assert!(flat.iter().any(|(route, _)| route == "zeta.2nd"), "{flat:?}");
        assert!(
            !flat.iter().any(|(route, _)| route == "alpha.lambda" || route == "zeta.None"),
            "host keywords are valid declaration names: {flat:?}"
        );
    }
}
