//! Public-record reader and key-store verification.
//!
//! Reading is a two-stage protocol: the public record (SQD) is parsed
//! fully first, and only when it carries a `KH` commitment is the key
//! store (SQK) consulted at all. A published record whose key store is
//! absent, incomplete, over-complete, or hash-divergent is a detected
//! integrity breach, reported as such and never repaired.

use std::path::{Path, PathBuf};

use crate::codec::{integrity, keystore};
use crate::error::{FormatError, IntegrityError, SquareDealError};
use crate::event::{Event, Phase, SessionKey};

/// Options for [`read_event`].
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Explicit key-store path; derived from the record path when `None`.
    pub key_store_path: Option<PathBuf>,
}

/// Derives the key-store path from a public-record path by swapping the
/// extension for `.sqk`.
#[must_use]
pub fn deduce_key_store_path(record_path: &Path) -> PathBuf {
    record_path.with_extension("sqk")
}

/// Loads an event from its public record, verifying the key store when
/// the record is published.
///
/// # Errors
///
/// - [`SquareDealError::Io`] when the record itself cannot be read.
/// - [`FormatError`] for unrecognized tags or malformed phase lines,
///   naming the 1-based line.
/// - [`IntegrityError`] for a missing key store, an undeclared or
///   unfilled key slot, or a digest mismatch.
pub fn read_event(path: &Path, options: &ReadOptions) -> Result<Event, SquareDealError> {
    let contents = std::fs::read_to_string(path)?;
    let mut event = Event::default();

    for (idx, raw) in contents.lines().enumerate() {
        let line = raw.trim();
        if line.starts_with('#') {
            continue;
        }
        let (tag, payload) = line.split_once(' ').unwrap_or((line, ""));
        match tag {
            "TN" => event.name = payload.to_string(),
            "DI" => event.delayed_info = payload.to_string(),
            "DV" => event.delayed_value = payload.to_string(),
            "KH" => {
                // The commitment's presence is itself the publication signal.
                event.integrity_hash = Some(payload.to_string());
                event.published = true;
            }
            "SN" => event.phases.push(parse_phase_line(payload, idx + 1)?),
            other => {
                return Err(FormatError::UnrecognizedTag {
                    tag: other.to_string(),
                    line: idx + 1,
                }
                .into());
            }
        }
    }

    if event.published {
        let key_store_path = options
            .key_store_path
            .clone()
            .unwrap_or_else(|| deduce_key_store_path(path));
        load_key_store(&mut event, &key_store_path)?;
    }

    Ok(event)
}

/// Parses an `SN` payload: `sessions:boards:prefix:info`.
fn parse_phase_line(payload: &str, line: usize) -> Result<Phase, FormatError> {
    let parts: Vec<&str> = payload.split(':').collect();
    if parts.len() != 4 {
        return Err(FormatError::MalformedPhase {
            payload: payload.to_string(),
            line,
        });
    }
    let sessions: usize = parts[0].parse().map_err(|_| FormatError::InvalidSessionCount {
        value: parts[0].to_string(),
        line,
    })?;
    if sessions == 0 {
        return Err(FormatError::InvalidSessionCount {
            value: parts[0].to_string(),
            line,
        });
    }
    Ok(Phase::new(sessions, parts[1], parts[2], parts[3]))
}

/// Populates every session-key slot from the key store and verifies the
/// digest commitment.
fn load_key_store(event: &mut Event, path: &Path) -> Result<(), SquareDealError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(IntegrityError::KeyStoreMissing {
                path: path.to_path_buf(),
            }
            .into());
        }
        Err(e) => return Err(e.into()),
    };

    let mut slots: Vec<Vec<Option<SessionKey>>> = event
        .phases
        .iter()
        .map(|phase| vec![None; phase.sessions()])
        .collect();

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let parsed = keystore::parse_key_line(line)?;
        let undeclared = || IntegrityError::UndeclaredSession {
            phase: parsed.phase,
            session: parsed.session,
        };
        if parsed.phase == 0 || parsed.session == 0 {
            return Err(undeclared().into());
        }
        let slot = slots
            .get_mut(parsed.phase - 1)
            .and_then(|phase_slots| phase_slots.get_mut(parsed.session - 1))
            .ok_or_else(undeclared)?;
        *slot = Some(SessionKey::from_string(parsed.key));
    }

    for (phase_idx, phase_slots) in slots.iter().enumerate() {
        for (session_idx, slot) in phase_slots.iter().enumerate() {
            if slot.is_none() {
                return Err(IntegrityError::MissingKey {
                    phase: phase_idx + 1,
                    session: session_idx + 1,
                }
                .into());
            }
        }
    }
    for (phase, phase_slots) in event.phases.iter_mut().zip(slots) {
        phase.session_keys = phase_slots.into_iter().flatten().collect();
    }

    // Verify the commitment last, over the exact bytes on disk.
    let actual = integrity::file_hash(path)?;
    let expected = event.integrity_hash.as_deref().unwrap_or_default();
    if actual != expected {
        return Err(IntegrityError::HashMismatch {
            expected: expected.to_string(),
            actual,
        }
        .into());
    }

    Ok(())
}
