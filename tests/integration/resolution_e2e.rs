//! End-to-end resolution tests.
//!
//! These tests load a registry from disk, filter it for a locale and
//! resolve an ordered specification list into a queue.

use taskgroups::core::{CapabilityType, Specification};
use taskgroups::registry::{Registry, TaskGroupSource};
use taskgroups::resolution::{filter_by_type_and_locale, Precedence, QueueResolver, Resolution};
use taskgroups::Error;

use super::fixtures::{locale, TestRegistry};

/// Test: English run prefers the English splitter
/// Given a registry with en and generic splitters and a generic merger
/// When filtered for "en"
/// Then split resolves to the en descriptor and merge to the generic one
#[test]
fn test_candidates_for_english() {
    let fixture = TestRegistry::basic();
    let registry = Registry::load(&fixture.path).unwrap();

    let set = filter_by_type_and_locale(&registry.descriptors(), &locale("en"));

    assert_eq!(set.len(), 2);
    assert_eq!(set.get(&CapabilityType::new("split")).unwrap().name, "en-splitter");
    assert_eq!(set.get(&CapabilityType::new("merge")).unwrap().name, "merger");
}

/// Test: French run falls back to generic groups
/// Given the same registry
/// When filtered for "fr"
/// Then split resolves to the generic splitter
#[test]
fn test_candidates_for_french() {
    let fixture = TestRegistry::basic();
    let registry = Registry::load(&fixture.path).unwrap();

    let set = filter_by_type_and_locale(&registry.descriptors(), &locale("fr"));

    let split = set.entry(&CapabilityType::new("split")).unwrap();
    assert_eq!(split.chosen().unwrap().name, "splitter");
    assert_eq!(split.precedence(), Precedence::Generic);
    assert!(split.localized().is_none());
    assert_eq!(set.get(&CapabilityType::new("merge")).unwrap().name, "merger");
}

/// Test: Missing capability is recorded, not fatal
/// Given specifications [split, validate]
/// When resolved for "en"
/// Then the queue is [(split, en-splitter), (validate, unresolved)]
#[test]
fn test_queue_with_unresolved_entry() {
    let fixture = TestRegistry::basic();
    let registry = Registry::load(&fixture.path).unwrap();
    let specs = Specification::list(&["split", "validate"]);

    let queue = QueueResolver::new(&registry.descriptors(), &specs, &locale("en")).resolve();

    assert_eq!(queue.len(), 2);
    assert_eq!(queue.entries()[0].spec.capability.as_str(), "split");
    match &queue.entries()[0].resolution {
        Resolution::Resolved(d) => assert_eq!(d.name, "en-splitter"),
        Resolution::Unresolved => panic!("split should resolve"),
    }
    assert_eq!(queue.entries()[1].spec.capability.as_str(), "validate");
    assert_eq!(queue.entries()[1].resolution, Resolution::Unresolved);

    let unresolved: Vec<_> = queue.unresolved().map(|s| s.capability.as_str()).collect();
    assert_eq!(unresolved, vec!["validate"]);
}

/// Test: Strict assembly rejects incomplete queues
#[test]
fn test_require_complete_for_assembly() {
    let fixture = TestRegistry::basic();
    let registry = Registry::load(&fixture.path).unwrap();

    let complete = QueueResolver::new(
        &registry.descriptors(),
        &Specification::list(&["split", "merge"]),
        &locale("en"),
    )
    .resolve();
    let groups: Vec<_> = complete
        .require_complete()
        .unwrap()
        .into_iter()
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(groups, vec!["en-splitter", "merger"]);

    let incomplete = QueueResolver::new(
        &registry.descriptors(),
        &Specification::list(&["split", "validate"]),
        &locale("en"),
    )
    .resolve();
    assert!(matches!(
        incomplete.require_complete(),
        Err(Error::Unresolved { .. })
    ));
}

/// Test: Resolver exposes what it was built from
#[test]
fn test_resolver_accessors_for_assembler() {
    let fixture = TestRegistry::basic();
    let registry = Registry::load(&fixture.path).unwrap();
    let specs = Specification::list(&["merge", "split"]);

    let resolver = QueueResolver::new(&registry.descriptors(), &specs, &locale("en"));

    assert_eq!(resolver.specs(), specs.as_slice());
    assert_eq!(resolver.candidates().len(), 2);
    assert_eq!(resolver.locale(), &locale("en"));
}

/// Test: Queue JSON output is stable across resolutions
#[test]
fn test_queue_json_is_idempotent() {
    let fixture = TestRegistry::basic();
    let registry = Registry::load(&fixture.path).unwrap();
    let specs = Specification::list(&["split", "validate", "merge"]);
    let resolver = QueueResolver::new(&registry.descriptors(), &specs, &locale("en"));

    let first = serde_json::to_string(&resolver.resolve()).unwrap();
    let second = serde_json::to_string(&resolver.resolve()).unwrap();
    assert_eq!(first, second);
}
