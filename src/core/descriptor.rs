//! Task group descriptors.
//!
//! A descriptor identifies a processing unit by the role it fills in a
//! pipeline (its capability type) and the locale it is specialized for.

use serde::{Deserialize, Serialize};

use super::Locale;

/// The role a task group fills in a pipeline, e.g. `split` or `merge`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilityType(pub String);

impl CapabilityType {
    pub fn new(name: &str) -> Self {
        Self(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CapabilityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CapabilityType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Describes an available task group.
///
/// A descriptor without a locale is generic and usable for any run; one with
/// a locale is only eligible when the run's locale matches it exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskGroupDescriptor {
    /// Human-readable name of the task group.
    pub name: String,
    /// Capability type this group provides.
    #[serde(rename = "type")]
    pub capability: CapabilityType,
    /// Locale this group is specialized for, or `None` if generic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<Locale>,
}

impl TaskGroupDescriptor {
    /// Create a generic (locale-agnostic) descriptor.
    pub fn generic(name: &str, capability: &str) -> Self {
        Self {
            name: name.to_string(),
            capability: CapabilityType::new(capability),
            locale: None,
        }
    }

    /// Create a descriptor specialized for `locale`.
    pub fn localized(name: &str, capability: &str, locale: Locale) -> Self {
        Self {
            name: name.to_string(),
            capability: CapabilityType::new(capability),
            locale: Some(locale),
        }
    }

    pub fn is_generic(&self) -> bool {
        self.locale.is_none()
    }

    /// Whether this descriptor is specialized for exactly `locale`.
    pub fn is_for_locale(&self, locale: &Locale) -> bool {
        self.locale.as_ref() == Some(locale)
    }
}

impl std::fmt::Display for TaskGroupDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.locale {
            Some(locale) => write!(f, "{} ({}, {})", self.name, self.capability, locale),
            None => write!(f, "{} ({}, generic)", self.name, self.capability),
        }
    }
}
