//! Error types for `squaredeal`
//!
//! Every failure mode stays a distinguishable kind so callers can tell
//! "your input was bad" from "your files were tampered with". Nothing in
//! this hierarchy is ever retried or silently repaired.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `squaredeal` CLI operations.
///
/// These codes follow Unix conventions; each error kind maps to its own
/// code so scripts can branch on the class of failure.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Format error (malformed record or key-store line)
    pub const FORMAT_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Integrity error (hash mismatch, missing or undeclared key slot)
    pub const INTEGRITY_ERROR: i32 = 4;

    /// State error (operation illegal for the current publication state)
    pub const STATE_ERROR: i32 = 5;

    /// Range error (malformed or out-of-bounds selector)
    pub const RANGE_ERROR: i32 = 6;

    /// Adapter error (external deal generator failed)
    pub const ADAPTER_ERROR: i32 = 10;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;

    /// Interrupted by SIGINT (Ctrl+C)
    pub const INTERRUPTED: i32 = 130;

    /// Terminated by SIGTERM
    pub const TERMINATED: i32 = 143;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `squaredeal` operations.
///
/// Aggregates the domain-specific errors and provides a unified
/// interface for error handling and exit-code mapping.
#[derive(Debug, Error)]
pub enum SquareDealError {
    /// Malformed public record or key store
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Tamper-evidence violation
    #[error(transparent)]
    Integrity(#[from] IntegrityError),

    /// Operation illegal for the current publication state
    #[error(transparent)]
    State(#[from] StateError),

    /// Malformed or out-of-bounds range expression
    #[error(transparent)]
    Range(#[from] RangeError),

    /// External deal generator failure
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SquareDealError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Format(_) => ExitCode::FORMAT_ERROR,
            Self::Integrity(_) => ExitCode::INTEGRITY_ERROR,
            Self::State(_) => ExitCode::STATE_ERROR,
            Self::Range(_) => ExitCode::RANGE_ERROR,
            Self::Adapter(_) => ExitCode::ADAPTER_ERROR,
            Self::Io(_) => ExitCode::IO_ERROR,
            Self::Json(_) => ExitCode::ERROR,
        }
    }
}

// ============================================================================
// Format Errors
// ============================================================================

/// Malformed public-record or key-store content.
///
/// Always fatal; every variant names the offending line or token.
#[derive(Debug, Error)]
pub enum FormatError {
    /// A public-record line carries a tag outside the known set
    #[error("unrecognized tag '{tag}' on line {line}")]
    UnrecognizedTag {
        /// The tag as it appeared in the file
        tag: String,
        /// 1-based line number
        line: usize,
    },

    /// An `SN` payload did not split into the four expected fields
    #[error("malformed phase definition on line {line}: {payload}")]
    MalformedPhase {
        /// The payload after the `SN` tag
        payload: String,
        /// 1-based line number
        line: usize,
    },

    /// The session count of a phase line is not a positive integer
    #[error("invalid session count '{value}' on line {line}")]
    InvalidSessionCount {
        /// The field as it appeared in the file
        value: String,
        /// 1-based line number
        line: usize,
    },

    /// A key-store line did not match `phase,session:key`
    #[error("malformed key store line: {line}")]
    MalformedKeyLine {
        /// The full offending line
        line: String,
    },
}

// ============================================================================
// Integrity Errors
// ============================================================================

/// Tamper-evidence violations detected while loading a published event.
///
/// These are never downgraded, repaired, or ignored; detecting them is
/// the entire purpose of the commit/reveal protocol.
#[derive(Debug, Error)]
pub enum IntegrityError {
    /// The public record commits to a key store that is not on disk
    #[error("unable to locate key store at {path} for a published event")]
    KeyStoreMissing {
        /// The derived or supplied key-store path
        path: PathBuf,
    },

    /// A key-store line addresses a slot the public record never declared
    #[error("session {phase},{session} in key store is not declared in the public record")]
    UndeclaredSession {
        /// 1-based phase number from the key-store line
        phase: usize,
        /// 1-based session number from the key-store line
        session: usize,
    },

    /// A declared slot received no key line
    #[error("session {phase},{session} is missing a key in the key store")]
    MissingKey {
        /// 1-based phase number of the empty slot
        phase: usize,
        /// 1-based session number of the empty slot
        session: usize,
    },

    /// The key-store digest does not match the recorded commitment
    #[error("key store hash mismatch: {expected} recorded, {actual} actual")]
    HashMismatch {
        /// Hex digest recorded in the public record
        expected: String,
        /// Hex digest of the key store actually on disk
        actual: String,
    },
}

// ============================================================================
// State Errors
// ============================================================================

/// Operation rejected by the publication-state machine.
///
/// Each variant names the specific precondition that failed; no partial
/// mutation is applied when one of these is returned.
#[derive(Debug, Error)]
pub enum StateError {
    /// Mutation attempted after the commitment point
    #[error("cannot {operation}: event already published")]
    AlreadyPublished {
        /// The rejected operation, in imperative form
        operation: &'static str,
    },

    /// Operation requires the event to be published first
    #[error("cannot {operation}: event is not published")]
    NotPublished {
        /// The rejected operation, in imperative form
        operation: &'static str,
    },

    /// Publish requires an event name
    #[error("cannot publish: event name is not set")]
    NameNotSet,

    /// Publish requires a delayed-information description
    #[error("cannot publish: delayed information is not set")]
    DelayedInfoNotSet,

    /// Publish requires at least one phase
    #[error("cannot publish: no phases are defined")]
    NoPhases,

    /// Generation requires the disclosed value
    #[error("cannot generate deal files: delayed information value is not set")]
    DelayedValueNotSet,

    /// A field failed validation independent of publication state
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// Name of the offending field
        field: &'static str,
        /// What was expected
        reason: String,
    },
}

// ============================================================================
// Range Errors
// ============================================================================

/// Malformed or out-of-bounds range expression.
#[derive(Debug, Error)]
pub enum RangeError {
    /// A board-spec token is neither an integer nor `A-B`
    #[error("invalid board range definition: '{token}'")]
    InvalidBoardRange {
        /// The offending token
        token: String,
    },

    /// A phase/session selector matched neither `K` nor `A-B`
    #[error("invalid range string: '{input}'")]
    InvalidSelection {
        /// The offending selector
        input: String,
    },

    /// A selector resolved outside `[1, max]`
    #[error("value out of range: {value}")]
    OutOfRange {
        /// The 1-based boundary that fell outside the addressable set
        value: i64,
    },
}

// ============================================================================
// Adapter Errors
// ============================================================================

/// External deal-generator failures.
///
/// Fatal for the remainder of the batch; deals already written by
/// earlier invocations are left in place.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// No executable path was supplied
    #[error("bigdealx path not set (use --bigdealx-path or the BIGDEALX_PATH environment variable)")]
    NotConfigured,

    /// The generator process could not be started
    #[error("failed to launch deal generator: {message}")]
    SpawnFailed {
        /// Spawn failure detail from the OS
        message: String,
    },

    /// The generator exited unsuccessfully
    #[error("deal generator failed with {}: {stderr}", code.map_or_else(|| "no exit code".to_string(), |c| format!("exit code {c}")))]
    NonZeroExit {
        /// Exit code, if the process was not killed by a signal
        code: Option<i32>,
        /// Captured diagnostic output
        stderr: String,
    },

    /// The generator exceeded the configured deadline
    #[error("deal generator timed out after {seconds}s")]
    Timeout {
        /// The configured timeout
        seconds: u64,
    },
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `squaredeal` operations.
pub type Result<T> = std::result::Result<T, SquareDealError>;

// ============================================================================
// Tests
// ============================================================================
