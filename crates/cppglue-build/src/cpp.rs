use crate::BindingBuilder;
use cppglue_core::{enumeration::EnumType, module::ClassType};
use std::{collections::BTreeSet, fmt::Write};

const INDENT: &str = "    ";

#[must_use]
pub fn generate(builder: &BindingBuilder) -> String {
    let module = builder.module;
    let mut out = String::new();

    out.push_str("// Generated by cppglue. Do not edit.\n\n");
    includes(builder, &mut out);
    out.push_str("\nnamespace py = pybind11;\n\n");

    let _ = writeln!(out, "PYBIND11_MODULE({}, m) {{", builder.config.module_name);

    // every handle exists before any member refers to another class
    for class in module.classes() {
        let _ = writeln!(
            out,
            "{INDENT}py::class_<{}> {}(m, \"{}\");",
            class.path(),
            handle(class),
            class.name()
        );
    }
    if !module.classes().is_empty() {
        out.push('\n');
    }

    for ty in module.enums() {
        enumeration(ty, &mut out);
    }
    for class in module.classes() {
        class_body(class, &mut out);
    }

    for function in module.functions() {
        let _ = writeln!(
            out,
            "{INDENT}m.def(\"{}\", &{});",
            function.name(),
            function.path()
        );
    }

    out.push_str("}\n");

    out
}

fn includes(builder: &BindingBuilder, out: &mut String) {
    out.push_str("#include <pybind11/pybind11.h>\n");
    if builder.module.uses_complex() {
        out.push_str("#include <pybind11/complex.h>\n");
    }

    let user: BTreeSet<_> = builder
        .headers
        .iter()
        .filter(|h| !h.system)
        .map(|h| h.include_target())
        .collect();
    let system: BTreeSet<_> = builder
        .headers
        .iter()
        .filter(|h| h.system)
        .map(|h| h.include_target())
        .collect();

    if !user.is_empty() {
        out.push('\n');
        for header in user {
            let _ = writeln!(out, "#include \"{header}\"");
        }
    }
    if !system.is_empty() {
        out.push('\n');
        for header in system {
            let _ = writeln!(out, "#include <{header}>");
        }
    }
}

fn handle(class: &ClassType) -> String {
    format!("{}_class", class.name())
}

fn enumeration(ty: &EnumType, out: &mut String) {
    let _ = write!(
        out,
        "{INDENT}py::enum_<{}>(m, \"{}\", py::arithmetic())",
        ty.path(),
        ty.name()
    );
    for e in ty.enumerators() {
        if let Some(name) = e.name() {
            let _ = write!(out, "\n{INDENT}{INDENT}.value(\"{name}\", {}::{name})", ty.path());
        }
    }
    out.push_str(";\n\n");
}

/// Object fields are by-value native members: assigning through the
/// compiled module copies the value in, where the in-process runtime relinks.
fn class_body(class: &ClassType, out: &mut String) {
    let path = class.path();

    let _ = write!(out, "{INDENT}{}\n{INDENT}{INDENT}.def(py::init<>())", handle(class));
    for property in class.properties() {
        let def = if property.is_mutable() {
            "def_readwrite"
        } else {
            "def_readonly"
        };
        let _ = write!(
            out,
            "\n{INDENT}{INDENT}.{def}(\"{0}\", &{path}::{0})",
            property.name()
        );
    }
    for method in class.methods() {
        let _ = write!(
            out,
            "\n{INDENT}{INDENT}.def(\"{0}\", &{path}::{0})",
            method.name()
        );
    }
    out.push_str(";\n\n");
}
