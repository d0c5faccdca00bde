use crate::BindingBuilder;
use std::fmt::Write;

/// Minimum CMake that ships `pybind11_add_module` support via config mode.
const CMAKE_MINIMUM: &str = "3.15";

#[must_use]
pub fn generate(builder: &BindingBuilder) -> String {
    let config = builder.config;
    let name = &config.module_name;
    let mut out = String::new();

    let _ = writeln!(out, "cmake_minimum_required(VERSION {CMAKE_MINIMUM})");
    let _ = writeln!(out, "project({name} LANGUAGES CXX)");
    out.push('\n');
    out.push_str("set(CMAKE_CXX_STANDARD 17)\n");
    out.push_str("set(CMAKE_CXX_STANDARD_REQUIRED ON)\n");
    out.push('\n');
    out.push_str("find_package(pybind11 CONFIG REQUIRED)\n");
    out.push('\n');

    let _ = writeln!(out, "pybind11_add_module({name}");
    let _ = writeln!(out, "    {name}.cpp");
    for source in &config.sources {
        let _ = writeln!(out, "    {}", quote(source));
    }
    out.push_str(")\n");

    if !config.compile_args.is_empty() {
        let args: Vec<_> = config.compile_args.iter().map(|a| quote(a)).collect();
        out.push('\n');
        let _ = writeln!(
            out,
            "target_compile_options({name} PRIVATE {})",
            args.join(" ")
        );
    }

    out
}

// CMake splits unquoted arguments on whitespace and `;`.
fn quote(arg: &str) -> String {
    if arg.contains(|c: char| c.is_whitespace() || c == ';' || c == '"') {
        format!("\"{}\"", arg.replace('"', "\\\""))
    } else {
        arg.to_string()
    }
}
