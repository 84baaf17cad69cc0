//! Locale-aware candidate filtering.
//!
//! Reduces a raw pool of task group descriptors to at most one usable
//! candidate per capability type for a given locale. A descriptor whose
//! locale equals the target locale takes precedence over a generic one of
//! the same type; descriptors for any other locale are never admitted.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::{CapabilityType, Locale, TaskGroupDescriptor};
use crate::tglog_trace;

/// Which precedence level produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Precedence {
    /// Locale matches the target locale exactly.
    Localized,
    /// No locale; usable for any run.
    Generic,
}

impl std::fmt::Display for Precedence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Precedence::Localized => write!(f, "localized"),
            Precedence::Generic => write!(f, "generic"),
        }
    }
}

/// Survivors for a single capability type.
///
/// Holds at most one locale-specific and at most one generic descriptor.
/// Entries are only created on admission, so at least one is present.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CandidateEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    localized: Option<TaskGroupDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generic: Option<TaskGroupDescriptor>,
}

impl CandidateEntry {
    /// Admit a descriptor at the given level. Returns false if the level is
    /// already occupied, in which case the first descriptor is kept.
    fn admit(&mut self, level: Precedence, descriptor: &TaskGroupDescriptor) -> bool {
        let slot = match level {
            Precedence::Localized => &mut self.localized,
            Precedence::Generic => &mut self.generic,
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(descriptor.clone());
        true
    }

    /// The chosen descriptor: the locale-specific one if present, else the
    /// generic one.
    pub fn chosen(&self) -> Option<&TaskGroupDescriptor> {
        self.localized.as_ref().or(self.generic.as_ref())
    }

    /// The precedence level of [`chosen`](Self::chosen).
    pub fn precedence(&self) -> Precedence {
        if self.localized.is_some() {
            Precedence::Localized
        } else {
            Precedence::Generic
        }
    }

    pub fn localized(&self) -> Option<&TaskGroupDescriptor> {
        self.localized.as_ref()
    }

    pub fn generic(&self) -> Option<&TaskGroupDescriptor> {
        self.generic.as_ref()
    }
}

/// Locale-resolved candidates indexed by capability type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateSet {
    locale: Locale,
    entries: BTreeMap<CapabilityType, CandidateEntry>,
}

impl CandidateSet {
    /// Locale the set was filtered for.
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Chosen descriptor for `capability`, if any.
    pub fn get(&self, capability: &CapabilityType) -> Option<&TaskGroupDescriptor> {
        self.entries.get(capability).and_then(CandidateEntry::chosen)
    }

    /// Full survivor entry for `capability`, for diagnostics.
    pub fn entry(&self, capability: &CapabilityType) -> Option<&CandidateEntry> {
        self.entries.get(capability)
    }

    pub fn contains(&self, capability: &CapabilityType) -> bool {
        self.entries.contains_key(capability)
    }

    /// Number of capability types with a candidate.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate chosen candidates in capability type order.
    pub fn iter(&self) -> impl Iterator<Item = (&CapabilityType, &TaskGroupDescriptor)> {
        self.entries
            .iter()
            .filter_map(|(k, e)| e.chosen().map(|d| (k, d)))
    }

    /// Iterate full survivor entries in capability type order.
    pub fn entries(&self) -> impl Iterator<Item = (&CapabilityType, &CandidateEntry)> {
        self.entries.iter()
    }
}

/// Select, for each capability type in `descriptors`, the descriptor usable
/// for `target`.
///
/// Per type, a descriptor whose locale equals `target` wins over a generic
/// one. Types with neither are omitted. When several descriptors tie at the
/// same level, the first one encountered is kept.
pub fn filter_by_type_and_locale(
    descriptors: &[TaskGroupDescriptor],
    target: &Locale,
) -> CandidateSet {
    let mut entries: BTreeMap<CapabilityType, CandidateEntry> = BTreeMap::new();

    for descriptor in descriptors {
        let level = if descriptor.is_for_locale(target) {
            Precedence::Localized
        } else if descriptor.is_generic() {
            Precedence::Generic
        } else {
            tglog_trace!("filter: skipping {} (locale {} requested)", descriptor, target);
            continue;
        };

        let entry = entries.entry(descriptor.capability.clone()).or_default();
        if entry.admit(level, descriptor) {
            tglog_trace!("filter: admitted {} as {}", descriptor, level);
        } else {
            tglog_trace!("filter: dropping duplicate {} {}", level, descriptor);
        }
    }

    CandidateSet {
        locale: target.clone(),
        entries,
    }
}
