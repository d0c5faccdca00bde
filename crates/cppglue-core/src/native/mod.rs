//! In-process stand-in for the compiled native side: instance storage and
//! the symbol table of native method implementations.

mod arena;
mod symbol;

pub use arena::{Arena, InstanceId, NativeInstance};
pub use symbol::{NativeCall, NativeFn, SymbolTable, method_symbol};

use crate::mapper::{ConversionStrategy, Scalar};
use cppglue_schema::types::{Precision, Primitive};

///
/// NativeValue
///
/// A value in native representation. Integers of every width share one
/// variant; the declared width is enforced at the boundary.
///

#[derive(Clone, Debug, PartialEq)]
pub enum NativeValue {
    Void,
    Bool(bool),
    Int(i128),
    Float32(f32),
    Float64(f64),
    Complex32 { re: f32, im: f32 },
    Complex64 { re: f64, im: f64 },
    Str(String),
    Enum(i64),
    Object(InstanceId),
}

impl NativeValue {
    /// Zero value for a non-object strategy. Object slots are built by the
    /// module, which owns the class layouts.
    #[must_use]
    pub const fn zero(strategy: ConversionStrategy) -> Option<Self> {
        let value = match strategy {
            ConversionStrategy::ByValueCopy(Scalar::String) => Self::Str(String::new()),
            ConversionStrategy::ByValueCopy(Scalar::Primitive(p)) => match p {
                Primitive::Bool => Self::Bool(false),
                Primitive::Float32 => Self::Float32(0.0),
                Primitive::Float64 => Self::Float64(0.0),
                _ => Self::Int(0),
            },
            ConversionStrategy::ByComplexDecompose(Precision::Single) => {
                Self::Complex32 { re: 0.0, im: 0.0 }
            }
            ConversionStrategy::ByComplexDecompose(Precision::Double) => {
                Self::Complex64 { re: 0.0, im: 0.0 }
            }
            ConversionStrategy::ByEnumCoerce(_) => Self::Enum(0),
            ConversionStrategy::ByObjectReference(_) => return None,
        };

        Some(value)
    }

    #[must_use]
    pub const fn as_object(&self) -> Option<InstanceId> {
        match self {
            Self::Object(id) => Some(*id),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<i128> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Whether the value has the representation `strategy` stores. Object
    /// class membership is checked against the arena separately.
    #[must_use]
    pub fn fits(&self, strategy: ConversionStrategy) -> bool {
        match (strategy, self) {
            (ConversionStrategy::ByValueCopy(Scalar::String), Self::Str(_))
            | (ConversionStrategy::ByEnumCoerce(_), Self::Enum(_))
            | (ConversionStrategy::ByObjectReference(_), Self::Object(_))
            | (
                ConversionStrategy::ByComplexDecompose(Precision::Single),
                Self::Complex32 { .. },
            )
            | (
                ConversionStrategy::ByComplexDecompose(Precision::Double),
                Self::Complex64 { .. },
            ) => true,
            (ConversionStrategy::ByValueCopy(Scalar::Primitive(p)), value) => match (p, value) {
                (Primitive::Bool, Self::Bool(_))
                | (Primitive::Float32, Self::Float32(_))
                | (Primitive::Float64, Self::Float64(_)) => true,
                (p, Self::Int(i)) => p
                    .int_range()
                    .is_some_and(|(lo, hi)| (lo..=hi).contains(i)),
                _ => false,
            },
            _ => false,
        }
    }
}
