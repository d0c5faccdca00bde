use cppglue_schema::{error::ErrorTree, types::EntityId};
use thiserror::Error as ThisError;

///
/// GenerateError
///
/// Fatal generation-time failures. A module is either fully assembled or not
/// produced at all; none of these are recovered from.
///

#[derive(Debug, ThisError)]
pub enum GenerateError {
    #[error("'{owner}', member '{member}', references unresolved entity {target}")]
    UnresolvedEntity {
        owner: String,
        member: String,
        target: EntityId,
    },

    #[error("duplicate name '{name}' in {scope}")]
    DuplicateName { scope: String, name: String },

    #[error("entity id {id} is declared by both '{first}' and '{second}'")]
    DuplicateEntityId {
        id: EntityId,
        first: String,
        second: String,
    },

    #[error("'{owner}', member '{member}', has type Void")]
    VoidValue { owner: String, member: String },

    #[error("class '{class}' contains itself by value ({path})")]
    RecursiveLayout { class: String, path: String },

    #[error("schema validation failed:\n{0}")]
    Validation(ErrorTree),
}

impl From<cppglue_schema::Error> for GenerateError {
    fn from(err: cppglue_schema::Error) -> Self {
        match err {
            cppglue_schema::Error::Validation(tree) => Self::Validation(tree),
            cppglue_schema::Error::Json(err) => Self::Validation(ErrorTree::from(err.to_string())),
        }
    }
}

///
/// RuntimeError
///
/// Recoverable failures surfaced to the host caller. A failed call never
/// leaves a native instance or any wrapper half-updated.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum RuntimeError {
    #[error("{callable}() takes {expected} argument(s) but {found} were given")]
    Arity {
        callable: String,
        expected: usize,
        found: usize,
    },

    #[error("{context}: expected {expected}, found {found}")]
    TypeMismatch {
        context: String,
        expected: String,
        found: String,
    },

    #[error("property '{class}.{property}' is read-only")]
    ImmutableProperty { class: String, property: String },

    #[error("'{owner}' has no attribute '{name}'")]
    UnknownAttribute { owner: String, name: String },

    #[error("native call '{symbol}' failed: {message}")]
    Native { symbol: String, message: String },
}

impl RuntimeError {
    pub(crate) fn unknown(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnknownAttribute {
            owner: owner.into(),
            name: name.into(),
        }
    }

    pub(crate) fn native(symbol: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Native {
            symbol: symbol.into(),
            message: message.into(),
        }
    }
}

///
/// NativeError
/// Failure reported by native code; surfaced to the host as `RuntimeError::Native`.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{message}")]
pub struct NativeError {
    pub message: String,
}

impl NativeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
