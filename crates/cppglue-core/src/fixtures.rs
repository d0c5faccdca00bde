//! Declarations and native implementations shared by unit tests.

use crate::{
    assemble::assemble_schema,
    error::NativeError,
    native::{NativeValue, SymbolTable},
    runtime::Runtime,
};
use cppglue_schema::prelude::*;

pub const ALPHA: EntityId = EntityId::new(1);
pub const ZETA: EntityId = EntityId::new(2);
pub const BETA: EntityId = EntityId::new(3);
pub const COMPLEX_WRAPPER: EntityId = EntityId::new(4);
pub const NESTED: EntityId = EntityId::new(5);
pub const EMPTY: EntityId = EntityId::new(6);
pub const COUNTER: EntityId = EntityId::new(7);

pub fn schema() -> Schema {
    Schema::new()
        .with_class(
            ClassDecl::new(ALPHA, "alpha")
                .with_path("n1::n2::n3::alpha")
                .with_field(FieldDecl::new("a", TypeRef::Complex(Precision::Double)))
                .with_field(FieldDecl::new("b", TypeRef::String))
                .with_field(FieldDecl::new("z", ZETA))
                .with_method(MethodDecl::new("print", TypeRef::String).with_param(Primitive::Int32)),
        )
        .with_class(
            ClassDecl::new(COMPLEX_WRAPPER, "ComplexWrapper")
                .with_field(FieldDecl::new("c", TypeRef::Complex(Precision::Single))),
        )
        .with_class(
            ClassDecl::new(NESTED, "Nested")
                .with_field(FieldDecl::new("cw", COMPLEX_WRAPPER))
                .with_method(MethodDecl::new("print", TypeRef::String).with_param(Primitive::Int32))
                .with_method(MethodDecl::new("inner", COMPLEX_WRAPPER))
                .with_method(MethodDecl::new("fresh", COMPLEX_WRAPPER))
                .with_method(MethodDecl::new("scratch", TypeRef::Void))
                .with_method(MethodDecl::new("broken", COMPLEX_WRAPPER)),
        )
        .with_class(ClassDecl::new(EMPTY, "empty"))
        .with_class(
            ClassDecl::new(COUNTER, "counter")
                .with_field(FieldDecl::readonly("limit", Primitive::Nat8))
                .with_field(FieldDecl::new("count", Primitive::Int32))
                .with_field(FieldDecl::new("mode", BETA))
                .with_field(FieldDecl::new("flag", Primitive::Bool))
                .with_field(FieldDecl::new("ratio", Primitive::Float32))
                .with_method(MethodDecl::new("bump", Primitive::Int32).with_param(Primitive::Int32))
                .with_method(MethodDecl::new("current_mode", BETA))
                .with_method(
                    MethodDecl::new("phase", TypeRef::Complex(Precision::Double))
                        .with_param(Primitive::Float64),
                )
                .with_method(MethodDecl::new("unbound", TypeRef::Void)),
        )
        .with_enum(
            EnumDecl::new(ZETA, "zeta")
                .with_value("A", 1)
                .with_next("B")
                .with_next("C"),
        )
        .with_enum(
            EnumDecl::new(BETA, "beta")
                .with_value("A", -1)
                .with_next("B")
                .with_next("C"),
        )
        .with_function(
            FunctionDecl::new("scale", Primitive::Float64)
                .with_path("n1::scale")
                .with_param(Primitive::Float64)
                .with_param(Primitive::Float64),
        )
}

fn int_arg(call: &crate::native::NativeCall<'_>, i: usize) -> Result<i128, NativeError> {
    call.arg(i)?
        .as_int()
        .ok_or_else(|| NativeError::new("expected an integer"))
}

pub fn symbols() -> SymbolTable {
    SymbolTable::new()
        .with_method("alpha", "print", |call| {
            let n = int_arg(call, 0)?;
            let b = call.field("b")?.as_str().unwrap_or_default().to_string();

            Ok(NativeValue::Str(format!("{b}:{n}")))
        })
        .with_method("Nested", "print", |call| {
            let n = int_arg(call, 0)?;
            Ok(NativeValue::Str(format!("nested:{n}")))
        })
        .with_method("Nested", "inner", |call| call.field("cw"))
        .with_method("Nested", "fresh", |call| {
            let id = call.construct("ComplexWrapper")?;
            call.set_field_of(id, "c", NativeValue::Complex32 { re: 1.0, im: 2.0 })?;

            Ok(NativeValue::Object(id))
        })
        .with_method("Nested", "scratch", |call| {
            call.construct("Nested")?;
            Ok(NativeValue::Void)
        })
        .with_method("Nested", "broken", |_| Ok(NativeValue::Str("oops".into())))
        .with_method("counter", "bump", |call| {
            let n = int_arg(call, 0)?;
            let count = call
                .field("count")?
                .as_int()
                .ok_or_else(|| NativeError::new("count is not an integer"))?;
            let next = count + n;
            call.set_field("count", NativeValue::Int(next))?;

            Ok(NativeValue::Int(next))
        })
        .with_method("counter", "current_mode", |call| call.field("mode"))
        .with_method("counter", "phase", |call| match call.arg(0)? {
            NativeValue::Float64(x) => Ok(NativeValue::Complex64 { re: *x, im: -*x }),
            _ => Err(NativeError::new("expected a double")),
        })
        .with_function("scale", |call| match (call.arg(0)?, call.arg(1)?) {
            (NativeValue::Float64(x), NativeValue::Float64(k)) => Ok(NativeValue::Float64(x * k)),
            _ => Err(NativeError::new("expected two doubles")),
        })
}

pub fn runtime() -> Runtime {
    let module = assemble_schema(&schema()).expect("fixture schema assembles");

    Runtime::new(module, symbols())
}
