//! Public-record and key-store writer.
//!
//! Ordering is the integrity guarantee: for a published event the key
//! store is written (and hashed) first, and the public record embeds
//! that freshly computed digest. There is no window in which a `KH`
//! commitment exists on disk without the matching key store beside it.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::codec::reader::deduce_key_store_path;
use crate::codec::{integrity, keystore};
use crate::error::SquareDealError;
use crate::event::Event;

/// Options for [`write_event`].
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Explicit key-store path; derived from the record path when `None`.
    pub key_store_path: Option<PathBuf>,
    /// Copy pre-existing files to sibling `.bak` paths before overwriting.
    pub make_backups: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            key_store_path: None,
            make_backups: true,
        }
    }
}

/// Outcome of a successful write.
#[derive(Debug, Default)]
pub struct WriteReport {
    /// Non-fatal problems, currently only failed backup copies. A failed
    /// backup undermines tamper recovery, so it is surfaced rather than
    /// swallowed, but it never aborts the write itself.
    pub warnings: Vec<String>,
}

/// Persists an event to its two-file representation.
///
/// When the event is published this assigns `event.integrity_hash` from
/// the key-store bytes just written.
///
/// # Errors
///
/// - [`crate::error::IntegrityError::MissingKey`] when a published
///   phase lacks a key for one of its sessions.
/// - [`SquareDealError::Io`] when either file cannot be written.
pub fn write_event(
    event: &mut Event,
    path: &Path,
    options: &WriteOptions,
) -> Result<WriteReport, SquareDealError> {
    let key_store_path = options
        .key_store_path
        .clone()
        .unwrap_or_else(|| deduce_key_store_path(path));

    let mut report = WriteReport::default();
    if options.make_backups {
        for original in [path, key_store_path.as_path()] {
            if let Some(warning) = backup(original) {
                report.warnings.push(warning);
            }
        }
    }

    if event.is_published() {
        let bytes = keystore::serialize_key_store(event.phases())?;
        std::fs::write(&key_store_path, &bytes)?;
        event.integrity_hash = Some(integrity::bytes_hash(&bytes));
    }

    let mut record = String::new();
    let _ = writeln!(record, "TN {}", event.name());
    let _ = writeln!(record, "DI {}", event.delayed_info());
    if event.is_published() {
        let _ = writeln!(record, "DV {}", event.delayed_value());
    }
    for phase in event.phases() {
        let _ = writeln!(
            record,
            "SN {}:{}:{}:{}",
            phase.sessions(),
            phase.boards(),
            phase.prefix(),
            phase.info()
        );
    }
    if event.is_published() {
        let _ = writeln!(
            record,
            "KH {}",
            event.integrity_hash().unwrap_or_default()
        );
    }
    std::fs::write(path, record)?;

    Ok(report)
}

/// Best-effort copy of `original` to `original.bak`; a failure becomes
/// a warning string, never an error.
fn backup(original: &Path) -> Option<String> {
    if !original.exists() {
        return None;
    }
    let mut bak = original.as_os_str().to_os_string();
    bak.push(".bak");
    match std::fs::copy(original, PathBuf::from(bak)) {
        Ok(_) => None,
        Err(e) => Some(format!("backup of {} failed: {e}", original.display())),
    }
}
