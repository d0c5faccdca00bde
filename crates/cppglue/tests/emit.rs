use cppglue::prelude::*;
use std::fs;

const BATCH: &str = r#"{
    "classes": [
        {
            "id": 1,
            "name": "alpha",
            "path": "n1::n2::n3::alpha",
            "fields": [
                {"name": "a", "type": {"Complex": "Double"}},
                {"name": "b", "type": "String"},
                {"name": "z", "type": {"Entity": 2}}
            ],
            "methods": [
                {"name": "print", "parameters": [{"Primitive": "Int32"}], "return_type": "String"}
            ]
        }
    ],
    "enums": [
        {"id": 2, "name": "zeta", "path": "n1::n2::n3::alpha::zeta",
         "enumerators": [{"name": "A", "value": 1}, {"name": "B"}, {"name": "C"}]},
        {"id": 3, "name": "beta", "path": "n1::beta",
         "enumerators": [{"name": "A", "value": -1}, {"name": "B"}, {"name": "C"}]}
    ],
    "headers": [
        {"name": "another_ex.h", "path": "tests/tmp/another_ex.h"},
        {"name": "complex", "system": true}
    ]
}"#;

#[test]
fn batch_and_config_produce_a_buildable_project() {
    let tmp = tempfile::tempdir().unwrap();
    let config_path = tmp.path().join("cppglue.toml");
    fs::write(
        &config_path,
        format!(
            "module_name = \"pybinding2\"\noutput_dir = {:?}\ncompile_args = [\"-O2\"]\n",
            tmp.path().display().to_string()
        ),
    )
    .unwrap();

    let config = GeneratorConfig::load(&config_path).unwrap();
    let schema = Schema::from_json(BATCH).unwrap();
    let dir = generate_to_disk(&schema, &config).unwrap();

    assert_eq!(dir, tmp.path().join("pybinding2_bindings"));

    let cpp = fs::read_to_string(dir.join("pybinding2.cpp")).unwrap();
    assert!(cpp.contains("#include \"tests/tmp/another_ex.h\""));
    assert!(cpp.contains("#include <complex>"));
    assert!(cpp.contains("#include <pybind11/complex.h>"));
    assert!(cpp.contains("PYBIND11_MODULE(pybinding2, m) {"));
    assert!(cpp.contains("py::enum_<n1::beta>(m, \"beta\", py::arithmetic())"));
    assert!(cpp.contains(".value(\"A\", n1::beta::A)"));
    assert!(!cpp.contains("export_values"));

    let cmake = fs::read_to_string(dir.join("CMakeLists.txt")).unwrap();
    assert!(cmake.contains("pybind11_add_module(pybinding2"));
    assert!(cmake.contains("target_compile_options(pybinding2 PRIVATE -O2)"));
}

#[test]
fn emitted_and_loaded_modules_agree_on_names() {
    let schema = Schema::from_json(BATCH).unwrap();
    let sources = generate(&schema, &GeneratorConfig::new("pybinding2")).unwrap();
    let module = assemble_schema(&schema).unwrap();

    for name in module.names() {
        assert!(
            sources.cpp.contains(&format!("(m, \"{name}\"")),
            "{name} missing from emitted module"
        );
    }
}

#[test]
fn unresolved_batches_emit_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let schema = Schema::new().with_class(
        ClassDecl::new(EntityId::new(1), "alpha").with_field(FieldDecl::new("z", EntityId::new(2))),
    );
    let config = GeneratorConfig::new("broken").with_output_dir(tmp.path());

    assert!(generate_to_disk(&schema, &config).is_err());
    assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
}
