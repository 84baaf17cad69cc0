//! Debug temp-file capture tests.

use std::fs;
use tempfile::TempDir;

use taskgroups::config::Config;
use taskgroups::tempfiles::{DefaultTempFileWriter, TempFileWriter};

use super::fixtures::TestRegistry;

fn sequence(name: &str) -> &str {
    name.split('-').nth(1).expect("sequence field")
}

/// Test: N writes produce N strictly increasing sequence numbers
#[test]
fn test_sequence_numbers_strictly_increase() {
    let fixture = TestRegistry::basic();
    let out = TempDir::new().unwrap();
    let mut writer = DefaultTempFileWriter::builder(out.path().to_path_buf())
        .prefix("run")
        .build();

    let ids: Vec<String> = (0..12).map(|i| format!("step {}", i)).collect();
    let names: Vec<String> = ids
        .iter()
        .map(|id| {
            let path = writer.write_temp_file(&fixture.path, id).unwrap();
            path.file_name().unwrap().to_string_lossy().to_string()
        })
        .collect();

    let mut previous = 0;
    for name in &names {
        let seq = sequence(name);
        assert!(seq.len() >= 3, "sequence {:?} should have 3+ digits", seq);
        let n: u32 = seq.parse().unwrap();
        assert!(n > previous);
        previous = n;
    }
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 12);
}

/// Test: Identifiers are sanitized and truncated
#[test]
fn test_identifier_sanitized_and_truncated() {
    let fixture = TestRegistry::basic();
    let out = TempDir::new().unwrap();
    let mut writer = DefaultTempFileWriter::builder(out.path().to_path_buf()).build();

    let path = writer
        .write_temp_file(&fixture.path, "a/b c!@# and a much longer tail")
        .unwrap();
    let stem = path.file_stem().unwrap().to_string_lossy().to_string();

    assert!(stem
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '@' || c == '-' || c == '_'));
    // "a/b c!@# and a much " is the 20 character cut
    assert!(stem.ends_with("-001-a_b_c_@_and_a_much_"));
}

/// Test: Writing over an existing name replaces the file
#[test]
fn test_existing_file_is_overwritten() {
    let fixture = TestRegistry::basic();
    let out = TempDir::new().unwrap();
    let mut writer = DefaultTempFileWriter::builder(out.path().to_path_buf()).build();

    let stale = out.path().join(format!("{}-001-x.tmp", writer.prefix()));
    fs::write(&stale, "stale").unwrap();

    let target = writer.write_temp_file(&fixture.path, "x").unwrap();
    assert_eq!(target, stale);
    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        fs::read_to_string(&fixture.path).unwrap()
    );
}

/// Test: Configured writer captures and cleans up
#[test]
fn test_configured_writer_round_trip() {
    let fixture = TestRegistry::basic();
    let out = TempDir::new().unwrap();
    let config = Config {
        temp_dir: Some(out.path().to_string_lossy().to_string()),
        temp_prefix: Some("capture".to_string()),
        ..Config::default()
    };

    let mut writer = config.temp_file_writer().unwrap();
    let path = writer.write_temp_file(&fixture.path, "registry").unwrap();
    assert!(path.starts_with(out.path()));
    assert!(path
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("capture@"));

    let report = writer.delete_temp_files();
    assert!(report.is_success());
    assert_eq!(report.removed_count(), 1);
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}
