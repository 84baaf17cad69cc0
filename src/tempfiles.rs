//! Debug capture of intermediate files.
//!
//! A [`TempFileWriter`] copies files into a temp folder under sanitized,
//! sequentially numbered names so the inputs and outputs of each pipeline
//! step can be inspected after a run.
//!
//! File names have the form `<prefix>@<run>-<NNN>-<identifier>.tmp`, where
//! `<run>` is a token unique to the writer instance, `<NNN>` is a sequence
//! number of at least three digits and `<identifier>` is truncated to 20
//! characters. Runs of characters other than ASCII letters, digits, `@` and
//! `-` are collapsed to a single `_`.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::{TimeZone, Utc};
use regex::Regex;

use crate::{tglog_debug, tglog_warn, Error, Result};

const MAX_IDENTIFIER_CHARS: usize = 20;

/// Run tokens count milliseconds from 2009-12-22T00:00:00Z.
const RUN_TOKEN_EPOCH_MS: i64 = 1_261_440_000_000;

static UNSAFE_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9@\-]+").unwrap());

/// Writes debug copies of files and removes them again.
pub trait TempFileWriter {
    /// Copy `source` into the temp folder under a name derived from
    /// `identifier`, returning the path written.
    ///
    /// # Errors
    /// Returns an error if the copy fails.
    fn write_temp_file(&mut self, source: &Path, identifier: &str) -> Result<PathBuf>;

    /// Remove every file written so far. Never fails; files that cannot be
    /// removed are reported as deferred.
    fn delete_temp_files(&mut self) -> CleanupReport;
}

/// Outcome of removing a single temp file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Removed,
    /// Direct removal failed; removal is retried when the writer is dropped.
    Deferred(String),
}

/// Report of a [`TempFileWriter::delete_temp_files`] call.
#[derive(Debug, Clone, Default)]
pub struct CleanupReport {
    /// Files that were removed.
    pub removed: Vec<PathBuf>,
    /// Files that could not be removed, with the reason.
    pub deferred: Vec<(PathBuf, String)>,
}

impl CleanupReport {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, path: PathBuf, outcome: DeleteOutcome) {
        match outcome {
            DeleteOutcome::Removed => self.removed.push(path),
            DeleteOutcome::Deferred(reason) => self.deferred.push((path, reason)),
        }
    }

    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }

    pub fn deferred_count(&self) -> usize {
        self.deferred.len()
    }

    /// Whether every file was removed directly.
    pub fn is_success(&self) -> bool {
        self.deferred.is_empty()
    }
}

/// Builder for [`DefaultTempFileWriter`].
#[derive(Debug, Clone)]
pub struct Builder {
    temp_files_folder: PathBuf,
    prefix: String,
    delete_on_drop: bool,
}

impl Builder {
    /// Start a builder writing into `default_folder`.
    ///
    /// The folder is usually [`Config::resolve_temp_dir`](crate::config::Config::resolve_temp_dir).
    pub fn new(default_folder: PathBuf) -> Self {
        Self {
            temp_files_folder: default_folder,
            prefix: String::new(),
            delete_on_drop: false,
        }
    }

    /// Set the prefix of written file names.
    pub fn prefix(mut self, value: &str) -> Self {
        self.prefix = value.to_string();
        self
    }

    /// Remove every written file when the writer is dropped, not only the
    /// ones whose removal was deferred.
    pub fn delete_on_drop(mut self, value: bool) -> Self {
        self.delete_on_drop = value;
        self
    }

    /// Set the folder to write into.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `value` is not an existing directory.
    pub fn temp_files_folder(mut self, value: PathBuf) -> Result<Self> {
        if !value.is_dir() {
            return Err(Error::InvalidArgument(format!(
                "{} is not an existing directory",
                value.display()
            )));
        }
        self.temp_files_folder = value;
        Ok(self)
    }

    /// Like [`temp_files_folder`](Self::temp_files_folder), but an empty
    /// string keeps the current folder.
    pub fn temp_files_folder_str(self, value: &str) -> Result<Self> {
        if value.is_empty() {
            return Ok(self);
        }
        self.temp_files_folder(PathBuf::from(value))
    }

    pub fn build(self) -> DefaultTempFileWriter {
        DefaultTempFileWriter::new(self)
    }
}

/// Default [`TempFileWriter`] that copies files into a single folder.
#[derive(Debug)]
pub struct DefaultTempFileWriter {
    folder: PathBuf,
    prefix: String,
    next_sequence: usize,
    delete_on_drop: bool,
    written: Vec<PathBuf>,
    deferred: Vec<PathBuf>,
}

impl DefaultTempFileWriter {
    pub fn builder(default_folder: PathBuf) -> Builder {
        Builder::new(default_folder)
    }

    fn new(builder: Builder) -> Self {
        Self {
            folder: builder.temp_files_folder,
            prefix: format!("{}@{}", builder.prefix, run_token()),
            next_sequence: 1,
            delete_on_drop: builder.delete_on_drop,
            written: Vec::new(),
            deferred: Vec::new(),
        }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Prefix including the run token.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Files written and not yet deleted, in write order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn file_name(&self, sequence: usize, identifier: &str) -> String {
        let raw = format!(
            "{}-{:03}-{}",
            self.prefix,
            sequence,
            truncate(identifier, MAX_IDENTIFIER_CHARS)
        );
        format!("{}.tmp", sanitize(&raw))
    }
}

impl TempFileWriter for DefaultTempFileWriter {
    fn write_temp_file(&mut self, source: &Path, identifier: &str) -> Result<PathBuf> {
        let target = self
            .folder
            .join(self.file_name(self.next_sequence, identifier));
        tglog_debug!("Writing debug file: {}", target.display());
        fs::copy(source, &target)?;
        self.next_sequence += 1;
        self.written.push(target.clone());
        Ok(target)
    }

    fn delete_temp_files(&mut self) -> CleanupReport {
        let mut report = CleanupReport::new();
        for path in self.written.drain(..) {
            let outcome = remove(&path);
            if let DeleteOutcome::Deferred(reason) = &outcome {
                tglog_warn!("Deferring removal of {}: {}", path.display(), reason);
                self.deferred.push(path.clone());
            }
            report.record(path, outcome);
        }
        report
    }
}

impl Drop for DefaultTempFileWriter {
    fn drop(&mut self) {
        if self.delete_on_drop {
            self.delete_temp_files();
        }
        for path in self.deferred.drain(..) {
            if let DeleteOutcome::Deferred(reason) = remove(&path) {
                tglog_warn!("Giving up on {}: {}", path.display(), reason);
            }
        }
    }
}

fn remove(path: &Path) -> DeleteOutcome {
    match fs::remove_file(path) {
        Ok(()) => DeleteOutcome::Removed,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => DeleteOutcome::Removed,
        Err(e) => DeleteOutcome::Deferred(e.to_string()),
    }
}

/// Lowercase hex of the milliseconds elapsed since the run token epoch,
/// truncated to 32 bits.
fn run_token() -> String {
    let epoch = Utc
        .timestamp_millis_opt(RUN_TOKEN_EPOCH_MS)
        .single()
        .unwrap_or_default();
    let elapsed = (Utc::now() - epoch).num_milliseconds();
    format!("{:x}", elapsed as u32)
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn sanitize(s: &str) -> String {
    UNSAFE_CHARS_RE.replace_all(s, "_").into_owned()
}
