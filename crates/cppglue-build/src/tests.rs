use super::*;
use cppglue_schema::prelude::*;

const ALPHA: EntityId = EntityId::new(1);
const ZETA: EntityId = EntityId::new(2);
const HOLDER: EntityId = EntityId::new(3);

fn alpha_schema() -> Schema {
    Schema::new()
        .with_class(
            ClassDecl::new(ALPHA, "alpha")
                .with_path("n1::n2::n3::alpha")
                .with_field(FieldDecl::new("a", TypeRef::Complex(Precision::Double)))
                .with_field(FieldDecl::new("b", TypeRef::String))
                .with_field(FieldDecl::new("z", ZETA))
                .with_method(MethodDecl::new("print", TypeRef::String).with_param(Primitive::Int32)),
        )
        .with_enum(
            EnumDecl::new(ZETA, "zeta")
                .with_path("n1::n2::n3::alpha::zeta")
                .with_value("A", 1)
                .with_next("B")
                .with_next("C"),
        )
        .with_header(Header::user("another_ex.h", "/src/another_ex.h"))
        .with_header(Header::system("string"))
}

fn plain_schema() -> Schema {
    Schema::new()
        .with_class(
            ClassDecl::new(HOLDER, "Holder")
                .with_field(FieldDecl::new("count", Primitive::Int32))
                .with_field(FieldDecl::readonly("id", Primitive::Nat64))
                .with_field(FieldDecl::new("peer", ALPHA)),
        )
        .with_class(ClassDecl::new(ALPHA, "alpha"))
        .with_function(
            FunctionDecl::new("version", TypeRef::String).with_path("n1::version"),
        )
}

fn render(schema: &Schema) -> GeneratedSources {
    generate(schema, &GeneratorConfig::new("my_module")).unwrap()
}

#[test]
fn renders_the_alpha_module() {
    let out = render(&alpha_schema());

    let expected = "\
// Generated by cppglue. Do not edit.

#include <pybind11/pybind11.h>
#include <pybind11/complex.h>

#include \"/src/another_ex.h\"

#include <string>

namespace py = pybind11;

PYBIND11_MODULE(my_module, m) {
    py::class_<n1::n2::n3::alpha> alpha_class(m, \"alpha\");

    py::enum_<n1::n2::n3::alpha::zeta>(m, \"zeta\", py::arithmetic())
        .value(\"A\", n1::n2::n3::alpha::zeta::A)
        .value(\"B\", n1::n2::n3::alpha::zeta::B)
        .value(\"C\", n1::n2::n3::alpha::zeta::C);

    alpha_class
        .def(py::init<>())
        .def_readwrite(\"a\", &n1::n2::n3::alpha::a)
        .def_readwrite(\"b\", &n1::n2::n3::alpha::b)
        .def_readwrite(\"z\", &n1::n2::n3::alpha::z)
        .def(\"print\", &n1::n2::n3::alpha::print);

}
";
    assert_eq!(out.cpp, expected);
}

#[test]
fn handles_are_declared_before_any_definition() {
    let cpp = render(&plain_schema()).cpp;

    let last_handle = cpp.rfind("py::class_<").unwrap();
    let first_def = cpp.find(".def(").unwrap();
    assert!(last_handle < first_def);
    assert!(cpp.contains("py::class_<alpha> alpha_class(m, \"alpha\");"));
}

#[test]
fn complex_header_only_when_needed() {
    let cpp = render(&plain_schema()).cpp;

    assert!(!cpp.contains("pybind11/complex.h"));
}

#[test]
fn immutable_fields_are_read_only() {
    let cpp = render(&plain_schema()).cpp;

    assert!(cpp.contains(".def_readonly(\"id\", &Holder::id)"));
    assert!(cpp.contains(".def_readwrite(\"count\", &Holder::count)"));
}

#[test]
fn object_fields_bind_the_native_member() {
    let cpp = render(&plain_schema()).cpp;

    assert!(cpp.contains(".def_readwrite(\"peer\", &Holder::peer)"));
    assert!(!cpp.contains("def_property"));
}

#[test]
fn free_functions_bind_at_module_level() {
    let cpp = render(&plain_schema()).cpp;

    assert!(cpp.contains("    m.def(\"version\", &n1::version);\n}\n"));
}

#[test]
fn cmake_builds_the_extension_module() {
    let config = GeneratorConfig::new("my_module")
        .with_source("src/another ex.cpp")
        .with_compile_arg("-O2");
    let out = generate(&alpha_schema(), &config).unwrap();
    let cmake = out.cmake.unwrap();

    assert!(cmake.starts_with("cmake_minimum_required(VERSION 3.15)\nproject(my_module LANGUAGES CXX)\n"));
    assert!(cmake.contains("find_package(pybind11 CONFIG REQUIRED)"));
    assert!(cmake.contains("pybind11_add_module(my_module\n    my_module.cpp\n    \"src/another ex.cpp\"\n)\n"));
    assert!(cmake.contains("target_compile_options(my_module PRIVATE -O2)"));
}

#[test]
fn cmake_can_be_disabled() {
    let config = GeneratorConfig {
        cmake: false,
        ..GeneratorConfig::new("my_module")
    };

    assert_eq!(generate(&alpha_schema(), &config).unwrap().cmake, None);
}

#[test]
fn writes_into_the_bindings_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let config = GeneratorConfig::new("my_module").with_output_dir(tmp.path());

    let dir = generate_to_disk(&alpha_schema(), &config).unwrap();

    assert_eq!(dir, tmp.path().join("my_module_bindings"));
    assert_eq!(dir, config.bindings_dir());
    let cpp = fs::read_to_string(dir.join("my_module.cpp")).unwrap();
    assert!(cpp.contains("PYBIND11_MODULE(my_module, m)"));
    assert!(dir.join("CMakeLists.txt").is_file());
}

#[test]
fn unresolved_entities_produce_no_output() {
    let tmp = tempfile::tempdir().unwrap();
    let schema = Schema::new()
        .with_class(ClassDecl::new(ALPHA, "alpha").with_field(FieldDecl::new("z", ZETA)));
    let config = GeneratorConfig::new("my_module").with_output_dir(tmp.path());

    let err = generate_to_disk(&schema, &config).unwrap_err();

    assert!(matches!(
        err,
        BuildError::Generate(GenerateError::UnresolvedEntity { .. })
    ));
    assert!(!config.bindings_dir().exists());
}

#[test]
fn invalid_config_is_rejected_before_assembly() {
    let err = generate(&alpha_schema(), &GeneratorConfig::new("")).unwrap_err();

    assert!(matches!(
        err,
        BuildError::Config(ConfigError::MissingModuleName)
    ));
}
