//! Locale tags attached to task groups and resolution runs.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A language/region tag such as `en`, `sv-SE` or `fr`.
///
/// Locales are compared by exact tag equality. No language-only fallback is
/// applied, so `en` does not match `en-US`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    /// Create a locale from a tag, rejecting empty tags and tags containing
    /// whitespace.
    pub fn new(tag: &str) -> Result<Self> {
        if tag.is_empty() {
            return Err(Error::Validation("locale tag is empty".to_string()));
        }
        if tag.chars().any(char::is_whitespace) {
            return Err(Error::Validation(format!(
                "locale tag contains whitespace: {:?}",
                tag
            )));
        }
        Ok(Self(tag.to_string()))
    }

    /// The raw tag.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for Locale {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.0
    }
}
