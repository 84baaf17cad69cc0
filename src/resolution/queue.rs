//! Queue resolution.
//!
//! Pairs each requested specification, in order, with the candidate chosen
//! for its capability type. A specification with no candidate is recorded as
//! unresolved rather than failing the whole resolution; whether that is fatal
//! is left to whoever assembles the pipeline from the queue.

use serde::Serialize;

use crate::core::{Locale, Specification, TaskGroupDescriptor};
use crate::{tglog_debug, Error, Result};

use super::filter::{filter_by_type_and_locale, CandidateSet};

/// Outcome of resolving a single specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "task_group")]
pub enum Resolution {
    /// A candidate was found.
    Resolved(TaskGroupDescriptor),
    /// No candidate exists for the requested capability type.
    Unresolved,
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    pub fn descriptor(&self) -> Option<&TaskGroupDescriptor> {
        match self {
            Resolution::Resolved(d) => Some(d),
            Resolution::Unresolved => None,
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resolution::Resolved(d) => write!(f, "{}", d),
            Resolution::Unresolved => write!(f, "unresolved"),
        }
    }
}

/// A specification paired with its resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueEntry {
    pub spec: Specification,
    pub resolution: Resolution,
}

/// Ordered resolution result, one entry per requested specification.
///
/// Entry order matches the specification order and defines the execution
/// order of the pipeline built from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Queue {
    locale: Locale,
    entries: Vec<QueueEntry>,
}

impl Queue {
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[QueueEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QueueEntry> {
        self.entries.iter()
    }

    /// Whether every specification was resolved.
    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(|e| e.resolution.is_resolved())
    }

    /// Specifications that have no candidate, in queue order.
    pub fn unresolved(&self) -> impl Iterator<Item = &Specification> {
        self.entries
            .iter()
            .filter(|e| !e.resolution.is_resolved())
            .map(|e| &e.spec)
    }

    /// Resolved task groups in queue order, skipping unresolved entries.
    pub fn resolved_groups(&self) -> impl Iterator<Item = &TaskGroupDescriptor> {
        self.entries.iter().filter_map(|e| e.resolution.descriptor())
    }

    /// All task groups in queue order, or an error naming every unresolved
    /// capability.
    pub fn require_complete(&self) -> Result<Vec<&TaskGroupDescriptor>> {
        let missing: Vec<String> = self
            .unresolved()
            .map(|s| s.capability.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::Unresolved {
                capabilities: missing,
            });
        }
        Ok(self.resolved_groups().collect())
    }
}

impl<'a> IntoIterator for &'a Queue {
    type Item = &'a QueueEntry;
    type IntoIter = std::slice::Iter<'a, QueueEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Resolves an ordered specification list against a candidate set.
///
/// The resolver owns its own copy of the specifications and of the chosen
/// descriptors, so nothing the caller does to its lists afterwards can change
/// what `resolve` returns.
#[derive(Debug, Clone)]
pub struct QueueResolver {
    candidates: CandidateSet,
    specs: Vec<Specification>,
}

impl QueueResolver {
    /// Filter `descriptors` for `locale` and prepare to resolve `specs`.
    pub fn new(
        descriptors: &[TaskGroupDescriptor],
        specs: &[Specification],
        locale: &Locale,
    ) -> Self {
        Self::with_candidates(filter_by_type_and_locale(descriptors, locale), specs)
    }

    /// Prepare to resolve `specs` against an already filtered candidate set.
    pub fn with_candidates(candidates: CandidateSet, specs: &[Specification]) -> Self {
        Self {
            candidates,
            specs: specs.to_vec(),
        }
    }

    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    /// The requested specifications, in order.
    pub fn specs(&self) -> &[Specification] {
        &self.specs
    }

    pub fn locale(&self) -> &Locale {
        self.candidates.locale()
    }

    /// Build the queue. Never fails; missing candidates become
    /// [`Resolution::Unresolved`].
    pub fn resolve(&self) -> Queue {
        let entries = self
            .specs
            .iter()
            .map(|spec| {
                let resolution = match self.candidates.get(&spec.capability) {
                    Some(d) => Resolution::Resolved(d.clone()),
                    None => {
                        tglog_debug!(
                            "resolve: no task group for '{}' (locale {})",
                            spec.capability,
                            self.candidates.locale()
                        );
                        Resolution::Unresolved
                    }
                };
                QueueEntry {
                    spec: spec.clone(),
                    resolution,
                }
            })
            .collect();

        Queue {
            locale: self.candidates.locale().clone(),
            entries,
        }
    }
}
