use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};
use std::fmt;
use xxhash_rust::xxh3::xxh3_64;

///
/// EntityId
///
/// Opaque identifier of a class or enum, unique within one generation run.
/// Parsers that want ids stable across runs derive them from the qualified
/// native path with [`EntityId::from_path`].
///

#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct EntityId(u64);

impl EntityId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn from_path(path: &str) -> Self {
        Self(xxh3_64(path.as_bytes()))
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

///
/// Primitive
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[remain::sorted]
pub enum Primitive {
    Bool,
    Float32,
    Float64,
    Int8,
    Int16,
    Int32,
    Int64,
    Nat8,
    Nat16,
    Nat32,
    Nat64,
}

impl Primitive {
    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    #[must_use]
    pub const fn is_signed_int(self) -> bool {
        matches!(self, Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64)
    }

    #[must_use]
    pub const fn is_unsigned_int(self) -> bool {
        matches!(self, Self::Nat8 | Self::Nat16 | Self::Nat32 | Self::Nat64)
    }

    #[must_use]
    pub const fn is_int(self) -> bool {
        self.is_signed_int() || self.is_unsigned_int()
    }

    /// Inclusive value range of an integer primitive.
    #[must_use]
    pub const fn int_range(self) -> Option<(i128, i128)> {
        let range = match self {
            Self::Int8 => (i8::MIN as i128, i8::MAX as i128),
            Self::Int16 => (i16::MIN as i128, i16::MAX as i128),
            Self::Int32 => (i32::MIN as i128, i32::MAX as i128),
            Self::Int64 => (i64::MIN as i128, i64::MAX as i128),
            Self::Nat8 => (0, u8::MAX as i128),
            Self::Nat16 => (0, u16::MAX as i128),
            Self::Nat32 => (0, u32::MAX as i128),
            Self::Nat64 => (0, u64::MAX as i128),
            Self::Bool | Self::Float32 | Self::Float64 => return None,
        };

        Some(range)
    }
}

///
/// Precision
/// Floating width of both components of a complex value.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum Precision {
    Single,
    Double,
}

///
/// TypeRef
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum TypeRef {
    Primitive(Primitive),
    Complex(Precision),
    String,
    Entity(EntityId),
    Void,
}

impl TypeRef {
    #[must_use]
    pub const fn is_void(self) -> bool {
        matches!(self, Self::Void)
    }

    #[must_use]
    pub const fn entity(self) -> Option<EntityId> {
        match self {
            Self::Entity(id) => Some(id),
            _ => None,
        }
    }
}

impl From<Primitive> for TypeRef {
    fn from(primitive: Primitive) -> Self {
        Self::Primitive(primitive)
    }
}

impl From<EntityId> for TypeRef {
    fn from(id: EntityId) -> Self {
        Self::Entity(id)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(p) => write!(f, "{p}"),
            Self::Complex(p) => write!(f, "Complex<{p}>"),
            Self::String => f.write_str("String"),
            Self::Entity(id) => write!(f, "Entity{id}"),
            Self::Void => f.write_str("Void"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_ids_from_paths_are_stable_and_distinct() {
        let alpha = EntityId::from_path("n1::n2::n3::alpha");

        assert_eq!(alpha, EntityId::from_path("n1::n2::n3::alpha"));
        assert_ne!(alpha, EntityId::from_path("n1::beta"));
    }

    #[test]
    fn int_ranges_follow_declared_width() {
        assert_eq!(Primitive::Int8.int_range(), Some((-128, 127)));
        assert_eq!(Primitive::Nat16.int_range(), Some((0, 65_535)));
        assert_eq!(Primitive::Float64.int_range(), None);
    }

    #[test]
    fn primitives_parse_from_their_names() {
        assert_eq!("Int32".parse::<Primitive>().ok(), Some(Primitive::Int32));
        assert!("int".parse::<Primitive>().is_err());
    }

    #[test]
    fn type_refs_use_externally_tagged_json() {
        let ty: TypeRef = serde_json::from_str(r#"{"Complex":"Double"}"#).unwrap();
        assert_eq!(ty, TypeRef::Complex(Precision::Double));

        let ty: TypeRef = serde_json::from_str(r#"{"Entity":7}"#).unwrap();
        assert_eq!(ty.entity(), Some(EntityId::new(7)));
    }
}
