//! Binding core: maps native declarations to conversion strategies,
//! synthesizes accessors, callables and enumerator sets, and assembles them
//! into a host module that can be loaded into a [`Runtime`](runtime::Runtime).

pub mod accessor;
pub mod assemble;
pub mod enumeration;
pub mod error;
pub mod mapper;
pub mod method;
pub mod module;
pub mod native;
pub mod runtime;
pub mod value;

mod convert;

#[cfg(test)]
mod fixtures;

pub use error::{GenerateError, NativeError, RuntimeError};

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        assemble::{assemble, assemble_schema},
        enumeration::{EnumType, EnumValue},
        error::{GenerateError, NativeError, RuntimeError},
        mapper::{ConversionStrategy, Scalar},
        module::Module,
        native::{InstanceId, NativeCall, NativeValue, SymbolTable},
        runtime::{Object, Runtime},
        value::{Complex, Value},
    };
}
