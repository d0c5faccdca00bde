//! Integer-backed enumerator sets.

use cppglue_schema::{node::EnumDecl, types::EntityId};
use std::{
    collections::BTreeMap,
    fmt,
    hash::{Hash, Hasher},
    rc::Rc,
};

///
/// EnumValue
///
/// One host enumerator. Identity is the owning enum plus the integer value,
/// so aliases and anonymous values compare equal to a declared enumerator
/// carrying the same integer.
///

#[derive(Clone, Debug)]
pub struct EnumValue {
    enum_id: EntityId,
    type_name: Rc<str>,
    name: Option<Rc<str>>,
    value: i64,
}

impl EnumValue {
    #[must_use]
    pub const fn enum_id(&self) -> EntityId {
        self.enum_id
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Declared name; `None` for a value outside the declared set.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub const fn value(&self) -> i64 {
        self.value
    }
}

impl PartialEq for EnumValue {
    fn eq(&self, other: &Self) -> bool {
        self.enum_id == other.enum_id && self.value == other.value
    }
}

impl Eq for EnumValue {}

impl Hash for EnumValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.enum_id.hash(state);
        self.value.hash(state);
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}.{name}", self.type_name),
            None => write!(f, "{}({})", self.type_name, self.value),
        }
    }
}

///
/// EnumType
///

#[derive(Clone, Debug)]
pub struct EnumType {
    id: EntityId,
    name: Rc<str>,
    path: String,
    enumerators: Vec<EnumValue>,
    by_name: BTreeMap<String, usize>,
}

impl EnumType {
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Enumerators in declaration order.
    #[must_use]
    pub fn enumerators(&self) -> &[EnumValue] {
        &self.enumerators
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EnumValue> {
        self.by_name.get(name).map(|&i| &self.enumerators[i])
    }

    /// Declared enumerator for `value`; aliases resolve to the first name.
    #[must_use]
    pub fn from_int(&self, value: i64) -> Option<&EnumValue> {
        self.enumerators.iter().find(|e| e.value == value)
    }

    /// Host value for a native integer, declared or not.
    #[must_use]
    pub fn value_of(&self, value: i64) -> EnumValue {
        self.from_int(value).cloned().unwrap_or_else(|| EnumValue {
            enum_id: self.id,
            type_name: Rc::clone(&self.name),
            name: None,
            value,
        })
    }
}

/// Build the host enumerator set. Names are assumed unique; the assembler
/// rejects collisions before synthesis.
#[must_use]
pub fn synthesize(decl: &EnumDecl) -> EnumType {
    let name: Rc<str> = Rc::from(decl.name.as_str());

    let enumerators: Vec<_> = decl
        .enumerators
        .iter()
        .map(|e| EnumValue {
            enum_id: decl.id,
            type_name: Rc::clone(&name),
            name: Some(Rc::from(e.name.as_str())),
            value: e.value,
        })
        .collect();

    let by_name = decl
        .enumerators
        .iter()
        .enumerate()
        .map(|(i, e)| (e.name.clone(), i))
        .collect();

    EnumType {
        id: decl.id,
        name,
        path: decl.resolved_path().to_string(),
        enumerators,
        by_name,
    }
}
