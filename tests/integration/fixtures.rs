//! Test fixtures for integration tests.
//!
//! Provides helpers for:
//! - Writing registry files into temporary directories
//! - Predefined descriptor pools

use std::path::PathBuf;
use tempfile::TempDir;

use taskgroups::core::{Locale, TaskGroupDescriptor};

/// Registry with a localized and a generic splitter and a generic merger.
pub const BASIC_REGISTRY: &str = r#"
[[task_group]]
name = "en-splitter"
type = "split"
locale = "en"

[[task_group]]
name = "splitter"
type = "split"

[[task_group]]
name = "merger"
type = "merge"
"#;

/// A registry file in its own temporary directory.
pub struct TestRegistry {
    /// Keeps the directory alive for the test's duration.
    pub temp_dir: TempDir,
    /// Path to the registry file.
    pub path: PathBuf,
}

impl TestRegistry {
    pub fn new(contents: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("registry.toml");
        std::fs::write(&path, contents).expect("Failed to write registry");
        Self { temp_dir, path }
    }

    pub fn basic() -> Self {
        Self::new(BASIC_REGISTRY)
    }
}

pub fn locale(tag: &str) -> Locale {
    Locale::new(tag).expect("valid locale")
}

/// Pool mixing several locales, duplicates and generic groups.
pub fn mixed_pool() -> Vec<TaskGroupDescriptor> {
    vec![
        TaskGroupDescriptor::localized("sv-hyphenator", "hyphenate", locale("sv")),
        TaskGroupDescriptor::generic("generic-hyphenator", "hyphenate"),
        TaskGroupDescriptor::localized("en-hyphenator", "hyphenate", locale("en")),
        TaskGroupDescriptor::localized("en-hyphenator-2", "hyphenate", locale("en")),
        TaskGroupDescriptor::localized("de-braille", "braille", locale("de")),
        TaskGroupDescriptor::generic("paginator", "paginate"),
        TaskGroupDescriptor::generic("paginator-2", "paginate"),
        TaskGroupDescriptor::localized("en-US-braille", "braille", locale("en-US")),
    ]
}
