//! Core domain models for task group resolution.
//!
//! This module contains the descriptors of available task groups, the
//! locale tags they are specialized for, and the specifications callers
//! use to request capabilities.

pub mod descriptor;
pub mod locale;
pub mod specification;

pub use descriptor::{CapabilityType, TaskGroupDescriptor};
pub use locale::Locale;
pub use specification::Specification;
