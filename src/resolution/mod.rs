//! Task group resolution.
//!
//! Raw descriptors flow through [`filter_by_type_and_locale`] into a
//! [`CandidateSet`], which a [`QueueResolver`] walks in specification order
//! to produce a [`Queue`].

mod filter;
mod queue;

pub use filter::{filter_by_type_and_locale, CandidateEntry, CandidateSet, Precedence};
pub use queue::{Queue, QueueEntry, QueueResolver, Resolution};
