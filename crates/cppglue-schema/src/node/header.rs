use crate::prelude::*;

///
/// Header
///
/// An include directive seen in the parsed translation unit. User headers
/// are emitted by path, system headers by name.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Header {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default)]
    pub system: bool,
}

impl Header {
    #[must_use]
    pub fn user(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: Some(path.into()),
            system: false,
        }
    }

    #[must_use]
    pub fn system(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            system: true,
        }
    }

    /// The spelling used inside the include directive.
    #[must_use]
    pub fn include_target(&self) -> &str {
        if self.system {
            &self.name
        } else {
            self.path.as_deref().unwrap_or(&self.name)
        }
    }
}

impl ValidateNode for Header {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if self.name.trim().is_empty() {
            err!(errs, "header name is empty");
        }

        errs.result()
    }
}

impl VisitableNode for Header {
    fn route_key(&self) -> String {
        self.name.clone()
    }
}
