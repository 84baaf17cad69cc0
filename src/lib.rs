pub mod config;
pub mod core;
pub mod error;
pub mod log;
pub mod registry;
pub mod resolution;
pub mod tempfiles;

pub use error::{Error, Result};
pub use resolution::{filter_by_type_and_locale, CandidateSet, Queue, QueueResolver, Resolution};
