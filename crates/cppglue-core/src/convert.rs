//! Host ↔ native value conversion, driven by a precomputed strategy.

use crate::{
    error::RuntimeError,
    mapper::{ConversionStrategy, Scalar},
    native::NativeValue,
    runtime::{Link, Object, Shared},
    value::{Complex, Value},
};
use cppglue_schema::types::{Precision, Primitive};
use std::rc::Rc;

///
/// Mismatch
///

#[derive(Debug)]
pub(crate) struct Mismatch {
    expected: String,
    found: String,
}

impl Mismatch {
    fn new(expected: impl Into<String>, found: &Value) -> Self {
        Self {
            expected: expected.into(),
            found: found.kind().to_string(),
        }
    }

    pub(crate) fn into_error(self, context: impl Into<String>) -> RuntimeError {
        RuntimeError::TypeMismatch {
            context: context.into(),
            expected: self.expected,
            found: self.found,
        }
    }
}

/// Convert a host value for storage or for a native argument.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub(crate) fn to_native(
    value: &Value,
    strategy: ConversionStrategy,
    shared: &Shared,
) -> Result<NativeValue, Mismatch> {
    let native = match strategy {
        ConversionStrategy::ByValueCopy(Scalar::String) => match value {
            Value::Str(s) => NativeValue::Str(s.clone()),
            _ => return Err(Mismatch::new("Str", value)),
        },

        ConversionStrategy::ByValueCopy(Scalar::Primitive(p)) => primitive_to_native(value, p)?,

        ConversionStrategy::ByComplexDecompose(precision) => {
            let c = match value {
                Value::Complex(c) => *c,
                Value::Float(f) => Complex::real(*f),
                Value::Int(i) => Complex::real(*i as f64),
                _ => return Err(Mismatch::new("Complex", value)),
            };
            match precision {
                Precision::Single => NativeValue::Complex32 {
                    re: c.re as f32,
                    im: c.im as f32,
                },
                Precision::Double => NativeValue::Complex64 { re: c.re, im: c.im },
            }
        }

        ConversionStrategy::ByEnumCoerce(id) => match value {
            Value::Enum(e) if e.enum_id() == id => NativeValue::Enum(e.value()),
            _ => return Err(Mismatch::new(type_name(strategy, shared), value)),
        },

        ConversionStrategy::ByObjectReference(id) => match value {
            Value::Object(o) if o.class() == id && o.belongs_to(shared) => {
                NativeValue::Object(o.instance())
            }
            _ => return Err(Mismatch::new(type_name(strategy, shared), value)),
        },
    };

    Ok(native)
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn primitive_to_native(value: &Value, p: Primitive) -> Result<NativeValue, Mismatch> {
    let native = match p {
        Primitive::Bool => match value {
            Value::Bool(b) => NativeValue::Bool(*b),
            _ => return Err(Mismatch::new("Bool", value)),
        },
        Primitive::Float32 | Primitive::Float64 => {
            let f = match value {
                Value::Float(f) => *f,
                Value::Int(i) => *i as f64,
                _ => return Err(Mismatch::new("Float", value)),
            };
            if p == Primitive::Float32 {
                NativeValue::Float32(f as f32)
            } else {
                NativeValue::Float64(f)
            }
        }
        _ => {
            let i = match value {
                Value::Int(i) => *i,
                Value::Bool(b) => i128::from(*b),
                _ => return Err(Mismatch::new(format!("Int ({p})"), value)),
            };
            match p.int_range() {
                Some((lo, hi)) if (lo..=hi).contains(&i) => NativeValue::Int(i),
                _ => {
                    return Err(Mismatch {
                        expected: format!("{p} in range"),
                        found: i.to_string(),
                    });
                }
            }
        }
    };

    Ok(native)
}

/// Convert a native value back to the host. Objects are bound with `link`.
pub(crate) fn to_host(
    native: NativeValue,
    strategy: ConversionStrategy,
    shared: &Rc<Shared>,
    link: Link,
) -> Result<Value, String> {
    if !native.fits(strategy) {
        return Err(format!("native value {native:?} does not fit {strategy}"));
    }

    let value = match native {
        NativeValue::Void => Value::None,
        NativeValue::Bool(b) => Value::Bool(b),
        NativeValue::Int(i) => Value::Int(i),
        NativeValue::Float32(f) => Value::Float(f64::from(f)),
        NativeValue::Float64(f) => Value::Float(f),
        NativeValue::Complex32 { re, im } => {
            Value::Complex(Complex::new(f64::from(re), f64::from(im)))
        }
        NativeValue::Complex64 { re, im } => Value::Complex(Complex::new(re, im)),
        NativeValue::Str(s) => Value::Str(s),
        NativeValue::Enum(v) => {
            let ConversionStrategy::ByEnumCoerce(id) = strategy else {
                return Err(format!("enum value {v} outside an enum slot"));
            };
            let ty = shared
                .module
                .enum_type(id)
                .ok_or_else(|| format!("unbound enum {id}"))?;
            Value::Enum(ty.value_of(v))
        }
        NativeValue::Object(instance) => {
            let expected = strategy.object_class();
            let actual = shared.arena.borrow().class_of(instance);
            match (expected, actual) {
                (Some(expected), Some(actual)) if expected == actual => {
                    Value::Object(Object::bind(shared, actual, instance, link))
                }
                (_, None) => return Err(format!("instance {instance} is gone")),
                _ => return Err(format!("instance {instance} is not of class {strategy}")),
            }
        }
    };

    Ok(value)
}

fn type_name(strategy: ConversionStrategy, shared: &Shared) -> String {
    match strategy {
        ConversionStrategy::ByEnumCoerce(id) => shared
            .module
            .enum_type(id)
            .map_or_else(|| strategy.to_string(), |e| e.name().to_string()),
        ConversionStrategy::ByObjectReference(id) => shared
            .module
            .class(id)
            .map_or_else(|| strategy.to_string(), |c| c.name().to_string()),
        _ => strategy.to_string(),
    }
}
