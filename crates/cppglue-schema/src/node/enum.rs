use crate::{
    prelude::*,
    validate::naming::{validate_ident, validate_path},
};

///
/// EnumDecl
///
/// A native enumeration. Values need not be contiguous, start at zero or be
/// non-negative. Enumerators without an explicit value take the previous
/// value plus one (zero for the first), as the native compiler does.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(from = "RawEnumDecl")]
pub struct EnumDecl {
    pub id: EntityId,
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    pub enumerators: Vec<Enumerator>,

    /// First implicit enumerator whose value would pass `i64::MAX`.
    #[serde(skip_serializing)]
    overflow: Option<String>,
}

impl EnumDecl {
    #[must_use]
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            path: None,
            enumerators: Vec::new(),
            overflow: None,
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Append an enumerator with an explicit value.
    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: i64) -> Self {
        self.enumerators.push(Enumerator::new(name, value));
        self
    }

    /// Append an enumerator whose value follows the previous one.
    #[must_use]
    pub fn with_next(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        let value = match self.next_value() {
            Some(value) => value,
            None => {
                self.overflow.get_or_insert_with(|| name.clone());
                i64::MAX
            }
        };
        self.enumerators.push(Enumerator::new(name, value));
        self
    }

    fn next_value(&self) -> Option<i64> {
        self.enumerators.last().map_or(Some(0), |e| e.value.checked_add(1))
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Enumerator> {
        self.enumerators.iter().find(|e| e.name == name)
    }

    /// Qualified native path, falling back to the plain name.
    #[must_use]
    pub fn resolved_path(&self) -> &str {
        self.path.as_deref().unwrap_or(&self.name)
    }
}

impl ValidateNode for EnumDecl {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if let Err(msg) = validate_ident(&self.name) {
            errs.add(msg);
        }
        if let Some(path) = &self.path
            && let Err(msg) = validate_path(path)
        {
            errs.add(msg);
        }
        if let Some(name) = &self.overflow {
            errs.add(format!("enumerator '{name}' overflows the underlying type"));
        }

        errs.result()
    }
}

impl VisitableNode for EnumDecl {
    fn route_key(&self) -> String {
        self.name.clone()
    }

    fn drive<V: Visitor>(&self, v: &mut V) {
        for node in &self.enumerators {
            node.accept(v);
        }
    }
}

///
/// Enumerator
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Enumerator {
    pub name: String,
    pub value: i64,
}

impl Enumerator {
    #[must_use]
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl ValidateNode for Enumerator {
    fn validate(&self) -> Result<(), ErrorTree> {
        validate_ident(&self.name).map_err(ErrorTree::from)
    }
}

impl VisitableNode for Enumerator {
    fn route_key(&self) -> String {
        self.name.clone()
    }
}

///
/// RawEnumDecl
/// Wire form where enumerator values may be omitted.
///

#[derive(Deserialize)]
struct RawEnumDecl {
    id: EntityId,
    name: String,

    #[serde(default)]
    path: Option<String>,

    #[serde(default)]
    enumerators: Vec<RawEnumerator>,
}

#[derive(Deserialize)]
struct RawEnumerator {
    name: String,

    #[serde(default)]
    value: Option<i64>,
}

impl From<RawEnumDecl> for EnumDecl {
    fn from(raw: RawEnumDecl) -> Self {
        let mut decl = Self::new(raw.id, raw.name);
        decl.path = raw.path;

        for e in raw.enumerators {
            decl = match e.value {
                Some(value) => decl.with_value(e.name, value),
                None => decl.with_next(e.name),
            };
        }

        decl
    }
}
