//! Native type descriptor → conversion strategy.
//!
//! The known set is threaded through explicitly; there is no process-wide
//! registry of entities.

use cppglue_schema::types::{EntityId, Precision, Primitive, TypeRef};
use derive_more::Display;
use std::collections::{BTreeMap, btree_map::Entry};
use thiserror::Error as ThisError;

///
/// Scalar
/// Payload of a by-value copy: which scalar crosses the boundary.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Scalar {
    #[display("{_0}")]
    Primitive(Primitive),
    String,
}

///
/// ConversionStrategy
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum ConversionStrategy {
    #[display("{_0}")]
    ByValueCopy(Scalar),

    #[display("Complex<{_0}>")]
    ByComplexDecompose(Precision),

    #[display("enum {_0}")]
    ByEnumCoerce(EntityId),

    #[display("object {_0}")]
    ByObjectReference(EntityId),
}

impl ConversionStrategy {
    #[must_use]
    pub const fn is_complex(self) -> bool {
        matches!(self, Self::ByComplexDecompose(_))
    }

    /// The class an object reference points at.
    #[must_use]
    pub const fn object_class(self) -> Option<EntityId> {
        match self {
            Self::ByObjectReference(id) => Some(id),
            _ => None,
        }
    }
}

///
/// EntityKind
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum EntityKind {
    Class,
    Enum,
}

///
/// KnownEntity
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KnownEntity {
    pub kind: EntityKind,
    pub name: String,
}

///
/// KnownEntities
///
/// Every class and enum id of one generation run.
///

#[derive(Clone, Debug, Default)]
pub struct KnownEntities {
    entries: BTreeMap<EntityId, KnownEntity>,
}

impl KnownEntities {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity; a taken id hands back the entity already holding it.
    pub fn insert(
        &mut self,
        id: EntityId,
        kind: EntityKind,
        name: impl Into<String>,
    ) -> Result<(), &KnownEntity> {
        match self.entries.entry(id) {
            Entry::Vacant(slot) => {
                slot.insert(KnownEntity {
                    kind,
                    name: name.into(),
                });
                Ok(())
            }
            Entry::Occupied(slot) => Err(slot.into_mut()),
        }
    }

    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&KnownEntity> {
        self.entries.get(&id)
    }

    #[must_use]
    pub fn kind(&self, id: EntityId) -> Option<EntityKind> {
        self.get(id).map(|e| e.kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

///
/// MapError
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum MapError {
    #[error("unresolved entity {0}")]
    Unresolved(EntityId),

    #[error("void is not a value type")]
    Void,
}

/// Strategy for a field or parameter type.
pub fn map(ty: TypeRef, known: &KnownEntities) -> Result<ConversionStrategy, MapError> {
    let strategy = match ty {
        TypeRef::Complex(precision) => ConversionStrategy::ByComplexDecompose(precision),
        TypeRef::Entity(id) => match known.kind(id) {
            Some(EntityKind::Enum) => ConversionStrategy::ByEnumCoerce(id),
            Some(EntityKind::Class) => ConversionStrategy::ByObjectReference(id),
            None => return Err(MapError::Unresolved(id)),
        },
        TypeRef::String => ConversionStrategy::ByValueCopy(Scalar::String),
        TypeRef::Primitive(p) => ConversionStrategy::ByValueCopy(Scalar::Primitive(p)),
        TypeRef::Void => return Err(MapError::Void),
    };

    Ok(strategy)
}

/// Strategy for a return type; `None` when nothing is returned.
pub fn map_return(
    ty: TypeRef,
    known: &KnownEntities,
) -> Result<Option<ConversionStrategy>, MapError> {
    if ty.is_void() {
        Ok(None)
    } else {
        map(ty, known).map(Some)
    }
}

///
/// TypeMapper
///
/// Caches one strategy per `TypeRef` for the lifetime of an assembly run.
///

pub struct TypeMapper<'a> {
    known: &'a KnownEntities,
    cache: BTreeMap<TypeRef, ConversionStrategy>,
}

impl<'a> TypeMapper<'a> {
    #[must_use]
    pub const fn new(known: &'a KnownEntities) -> Self {
        Self {
            known,
            cache: BTreeMap::new(),
        }
    }

    #[must_use]
    pub const fn known(&self) -> &KnownEntities {
        self.known
    }

    pub fn map(&mut self, ty: TypeRef) -> Result<ConversionStrategy, MapError> {
        if let Some(strategy) = self.cache.get(&ty) {
            return Ok(*strategy);
        }

        let strategy = map(ty, self.known)?;
        self.cache.insert(ty, strategy);

        Ok(strategy)
    }

    pub fn map_return(&mut self, ty: TypeRef) -> Result<Option<ConversionStrategy>, MapError> {
        if ty.is_void() {
            Ok(None)
        } else {
            self.map(ty).map(Some)
        }
    }

    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}
