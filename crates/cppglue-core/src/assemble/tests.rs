use super::*;
use crate::{
    fixtures::{self, ALPHA, COMPLEX_WRAPPER, NESTED, ZETA},
    mapper::{ConversionStrategy, Scalar},
    module::Binding,
};
use cppglue_schema::prelude::*;

#[test]
fn binds_every_entity_under_its_declared_name() {
    let module = assemble_schema(&fixtures::schema()).unwrap();

    let names: Vec<_> = module.names().collect();
    assert_eq!(
        names,
        vec!["ComplexWrapper", "Nested", "alpha", "beta", "counter", "empty", "scale", "zeta"]
    );
    assert_eq!(module.lookup("alpha"), Some(Binding::Class(ALPHA)));
    assert_eq!(module.lookup("zeta"), Some(Binding::Enum(ZETA)));
    assert!(matches!(module.lookup("scale"), Some(Binding::Function(_))));
}

#[test]
fn properties_follow_field_order_and_strategy() {
    let module = assemble_schema(&fixtures::schema()).unwrap();
    let alpha = module.class(ALPHA).unwrap();

    let props: Vec<_> = alpha
        .properties()
        .iter()
        .map(|p| (p.name(), p.strategy()))
        .collect();
    assert_eq!(
        props,
        vec![
            ("a", ConversionStrategy::ByComplexDecompose(Precision::Double)),
            ("b", ConversionStrategy::ByValueCopy(Scalar::String)),
            ("z", ConversionStrategy::ByEnumCoerce(ZETA)),
        ]
    );
    assert_eq!(alpha.path(), "n1::n2::n3::alpha");
    assert_eq!(alpha.method("print").map(|m| m.arity()), Some(1));

    let nested = module.class(NESTED).unwrap();
    assert_eq!(
        nested.property("cw").map(|p| p.strategy()),
        Some(ConversionStrategy::ByObjectReference(COMPLEX_WRAPPER))
    );
}

#[test]
fn plain_assemble_covers_classes_and_enums() {
    let schema = fixtures::schema();
    let module = assemble(&schema.classes, &schema.enums).unwrap();

    assert!(module.functions().is_empty());
    assert_eq!(module.classes().len(), schema.classes.len());
    assert!(module.uses_complex());
}

#[test]
fn empty_input_yields_an_empty_module() {
    let module = assemble(&[], &[]).unwrap();

    assert_eq!(module.names().count(), 0);
    assert!(!module.uses_complex());
}

#[test]
fn unresolved_reference_names_entity_and_member() {
    let classes = [ClassDecl::new(ALPHA, "alpha").with_field(FieldDecl::new("z", EntityId::new(42)))];

    let err = assemble(&classes, &[]).unwrap_err();
    let GenerateError::UnresolvedEntity {
        owner,
        member,
        target,
    } = &err
    else {
        panic!("expected unresolved entity, got {err:?}");
    };
    assert_eq!((owner.as_str(), member.as_str()), ("alpha", "z"));
    assert_eq!(*target, EntityId::new(42));
}

#[test]
fn unresolved_method_parameter_fails() {
    let classes = [ClassDecl::new(ALPHA, "alpha")
        .with_method(MethodDecl::new("f", TypeRef::Void).with_param(EntityId::new(9)))];

    assert!(matches!(
        assemble(&classes, &[]),
        Err(GenerateError::UnresolvedEntity { member, .. }) if member == "f"
    ));
}

#[test]
fn module_level_names_collide() {
    let classes = [ClassDecl::new(ALPHA, "zeta")];
    let enums = [EnumDecl::new(ZETA, "zeta").with_value("A", 1)];

    assert!(matches!(
        assemble(&classes, &enums),
        Err(GenerateError::DuplicateName { scope, name }) if scope == "module" && name == "zeta"
    ));
}

#[test]
fn fields_and_methods_share_a_namespace() {
    let classes = [ClassDecl::new(ALPHA, "alpha")
        .with_field(FieldDecl::new("print", TypeRef::String))
        .with_method(MethodDecl::new("print", TypeRef::Void))];

    assert!(matches!(
        assemble(&classes, &[]),
        Err(GenerateError::DuplicateName { scope, name }) if scope == "alpha" && name == "print"
    ));
}

#[test]
fn enumerator_names_must_be_unique() {
    let enums = [EnumDecl::new(ZETA, "zeta").with_value("A", 1).with_value("A", 2)];

    assert!(matches!(
        assemble(&[], &enums),
        Err(GenerateError::DuplicateName { scope, .. }) if scope == "zeta"
    ));
}

#[test]
fn shared_entity_ids_are_rejected() {
    let classes = [ClassDecl::new(ALPHA, "alpha")];
    let enums = [EnumDecl::new(ALPHA, "zeta")];

    assert!(matches!(
        assemble(&classes, &enums),
        Err(GenerateError::DuplicateEntityId { first, second, .. })
            if first == "alpha" && second == "zeta"
    ));
}

#[test]
fn void_fields_are_rejected() {
    let classes = [ClassDecl::new(ALPHA, "alpha").with_field(FieldDecl::new("v", TypeRef::Void))];

    assert!(matches!(
        assemble(&classes, &[]),
        Err(GenerateError::VoidValue { owner, member }) if owner == "alpha" && member == "v"
    ));
}

#[test]
fn self_containing_layouts_are_rejected() {
    let a = EntityId::new(10);
    let b = EntityId::new(11);
    let classes = [
        ClassDecl::new(a, "Outer").with_field(FieldDecl::new("inner", b)),
        ClassDecl::new(b, "Inner").with_field(FieldDecl::new("outer", a)),
    ];

    let err = assemble(&classes, &[]).unwrap_err();
    let GenerateError::RecursiveLayout { class, path } = &err else {
        panic!("expected recursive layout, got {err:?}");
    };
    assert_eq!(class, "Outer");
    assert_eq!(path, "Outer.inner.outer");
}

#[test]
fn shared_children_are_not_cycles() {
    let leaf = EntityId::new(20);
    let classes = [
        ClassDecl::new(leaf, "Leaf"),
        ClassDecl::new(EntityId::new(21), "Pair")
            .with_field(FieldDecl::new("left", leaf))
            .with_field(FieldDecl::new("right", leaf)),
    ];

    assert!(assemble(&classes, &[]).is_ok());
}

#[test]
fn invalid_identifiers_fail_validation() {
    let classes = [ClassDecl::new(ALPHA, "alpha").with_field(FieldDecl::new("not valid", TypeRef::String))];

    let Err(GenerateError::Validation(errs)) = assemble(&classes, &[]) else {
        panic!("expected validation failure");
    };
    assert!(errs.flatten().iter().any(|(route, _)| route == "alpha.not valid"));
}

#[test]
fn host_keywords_are_bound_verbatim() {
    let range = EntityId::new(40);
    let mode = EntityId::new(41);
    let classes = [ClassDecl::new(range, "range")
        .with_field(FieldDecl::new("from", Primitive::Int32))
        .with_field(FieldDecl::new("in", mode))];
    let enums = [EnumDecl::new(mode, "mode").with_next("None").with_next("On")];

    let module = assemble(&classes, &enums).unwrap();

    let class = module.class(range).unwrap();
    assert!(class.property("from").is_some());
    assert!(class.property("in").is_some());
    assert_eq!(module.enum_type(mode).unwrap().get("None").map(enumeration::EnumValue::value), Some(0));
}
