use serde::Serialize;
use std::{collections::BTreeMap, fmt};

///
/// err
/// Push a formatted message onto an `ErrorTree`.
///

#[macro_export]
macro_rules! err {
    ($errs:expr, $($arg:tt)*) => {
        $errs.add(format!($($arg)*))
    };
}

///
/// ErrorTree
///
/// Route-aware collection of validation messages. Messages recorded at the
/// root have no route; nested trees are keyed by the route segment of the
/// node that produced them (`alpha.print`, `zeta.A`, ...).
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ErrorTree {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<String>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub children: BTreeMap<String, Self>,
}

impl ErrorTree {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
            children: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.children.values().all(Self::is_empty)
    }

    pub fn add(&mut self, message: impl fmt::Display) {
        self.messages.push(message.to_string());
    }

    pub fn add_for(&mut self, route: impl Into<String>, message: impl fmt::Display) {
        self.children
            .entry(route.into())
            .or_default()
            .add(message);
    }

    /// Merge another tree into this one at the root.
    pub fn merge(&mut self, other: Self) {
        self.messages.extend(other.messages);
        for (route, child) in other.children {
            self.merge_for(route, child);
        }
    }

    /// Merge another tree under `route`.
    pub fn merge_for(&mut self, route: impl Into<String>, other: Self) {
        if other.is_empty() {
            return;
        }

        self.children.entry(route.into()).or_default().merge(other);
    }

    /// Flatten into `(route, message)` pairs, routes joined with dots.
    #[must_use]
    pub fn flatten(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        self.flatten_into(None, &mut out);

        out
    }

    fn flatten_into(&self, prefix: Option<&str>, out: &mut Vec<(String, String)>) {
        let route = prefix.unwrap_or_default();
        for message in &self.messages {
            out.push((route.to_string(), message.clone()));
        }

        for (key, child) in &self.children {
            let nested = match prefix {
                Some(p) if !p.is_empty() => format!("{p}.{key}"),
                _ => key.clone(),
            };
            child.flatten_into(Some(&nested), out);
        }
    }

    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<String> for ErrorTree {
    fn from(message: String) -> Self {
        let mut tree = Self::new();
        tree.add(message);

        tree
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (route, message)) in self.flatten().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            if route.is_empty() {
                write!(f, "{message}")?;
            } else {
                write!(f, "{route}: {message}")?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for ErrorTree {}
