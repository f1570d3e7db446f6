//! Secret key store (SQK) line codec.
//!
//! One `phase,session:key` line per session, 1-based indices, CRLF
//! terminated on write. Line order is irrelevant on read and blank
//! lines are tolerated; every declared slot must end up with exactly
//! one key.

use crate::error::{FormatError, IntegrityError};
use crate::event::Phase;

/// A parsed key-store line.
#[derive(Debug)]
pub(crate) struct KeyLine {
    /// 1-based phase number.
    pub phase: usize,
    /// 1-based session number within the phase.
    pub session: usize,
    /// The key material.
    pub key: String,
}

/// Parses one non-blank key-store line.
pub(crate) fn parse_key_line(line: &str) -> Result<KeyLine, FormatError> {
    let malformed = || FormatError::MalformedKeyLine {
        line: line.to_string(),
    };

    let parts: Vec<&str> = line.split(':').collect();
    if parts.len() != 2 {
        return Err(malformed());
    }
    let indices: Vec<&str> = parts[0].split(',').collect();
    if indices.len() != 2 {
        return Err(malformed());
    }
    let phase: usize = indices[0].parse().map_err(|_| malformed())?;
    let session: usize = indices[1].parse().map_err(|_| malformed())?;
    Ok(KeyLine {
        phase,
        session,
        key: parts[1].to_string(),
    })
}

/// Serializes every phase's key material to the key-store byte format.
///
/// Slots are written in ascending phase-then-session order. A phase
/// whose key list is shorter than its session count aborts the write:
/// persisting a published event with missing keys would create an
/// unverifiable commitment.
pub(crate) fn serialize_key_store(phases: &[Phase]) -> Result<Vec<u8>, IntegrityError> {
    let mut out = Vec::new();
    for (phase_idx, phase) in phases.iter().enumerate() {
        if phase.session_keys().len() < phase.sessions() {
            return Err(IntegrityError::MissingKey {
                phase: phase_idx + 1,
                session: phase.session_keys().len() + 1,
            });
        }
        for (session_idx, key) in phase.session_keys().iter().enumerate() {
            out.extend_from_slice(
                format!("{},{}:{}\r\n", phase_idx + 1, session_idx + 1, key.as_str()).as_bytes(),
            );
        }
    }
    Ok(out)
}
