//! Sources of available task group descriptors.
//!
//! A registry file is TOML with one `[[task_group]]` table per descriptor:
//!
//! ```toml
//! [[task_group]]
//! name = "en-splitter"
//! type = "split"
//! locale = "en"
//!
//! [[task_group]]
//! name = "merger"
//! type = "merge"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::TaskGroupDescriptor;
use crate::{tglog_debug, Error, Result};

/// Supplies the raw descriptor pool for a resolution run.
pub trait TaskGroupSource {
    /// All descriptors currently available, in registration order.
    fn descriptors(&self) -> Vec<TaskGroupDescriptor>;
}

/// An in-memory registry of task group descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    #[serde(default, rename = "task_group")]
    task_groups: Vec<TaskGroupDescriptor>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a descriptor. Registration order is preserved.
    pub fn register(&mut self, descriptor: TaskGroupDescriptor) {
        self.task_groups.push(descriptor);
    }

    pub fn len(&self) -> usize {
        self.task_groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.task_groups.is_empty()
    }

    /// Parse a registry from TOML.
    pub fn from_toml(s: &str) -> Result<Self> {
        let registry: Self = toml::from_str(s)?;
        registry.validate()?;
        Ok(registry)
    }

    /// Load a registry file.
    pub fn load(path: &Path) -> Result<Self> {
        tglog_debug!("Registry::load path={}", path.display());
        let registry = Self::from_toml(&fs::read_to_string(path)?)?;
        tglog_debug!("Registry loaded: {} task groups", registry.len());
        Ok(registry)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, toml::to_string_pretty(self)?)?;
        tglog_debug!("Registry saved to {}", path.display());
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        for d in &self.task_groups {
            if d.name.trim().is_empty() {
                return Err(Error::Validation(format!(
                    "task group of type '{}' has an empty name",
                    d.capability
                )));
            }
            if d.capability.as_str().trim().is_empty() {
                return Err(Error::Validation(format!(
                    "task group '{}' has an empty type",
                    d.name
                )));
            }
        }
        Ok(())
    }
}

impl TaskGroupSource for Registry {
    fn descriptors(&self) -> Vec<TaskGroupDescriptor> {
        self.task_groups.clone()
    }
}

impl FromIterator<TaskGroupDescriptor> for Registry {
    fn from_iter<I: IntoIterator<Item = TaskGroupDescriptor>>(iter: I) -> Self {
        Self {
            task_groups: iter.into_iter().collect(),
        }
    }
}
