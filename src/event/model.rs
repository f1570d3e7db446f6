//! Event document model.
//!
//! In-memory representation of an event and its ordered phases. Every
//! mutation goes through a publication-state guard: before publication
//! the commitment fields are editable and phases can be appended; after
//! publication both are frozen and only disclosure remains.

use serde::Serialize;

use crate::error::StateError;
use crate::event::keys::SessionKey;

/// A group of sessions sharing a board layout and output naming scheme.
///
/// Phases are addressed by 1-based position within their event; they
/// carry no back-reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phase {
    pub(crate) sessions: usize,
    pub(crate) boards: String,
    pub(crate) prefix: String,
    pub(crate) info: String,
    pub(crate) session_keys: Vec<SessionKey>,
}

impl Phase {
    /// Creates an unpublished phase with no key material.
    ///
    /// `boards` is stored as entered; it is validated by the range
    /// algebra at argument-parse time and again when deals are
    /// generated.
    #[must_use]
    pub fn new(
        sessions: usize,
        boards: impl Into<String>,
        prefix: impl Into<String>,
        info: impl Into<String>,
    ) -> Self {
        Self {
            sessions,
            boards: boards.into(),
            prefix: prefix.into(),
            info: info.into(),
            session_keys: Vec::new(),
        }
    }

    /// Number of sessions in this phase.
    #[must_use]
    pub const fn sessions(&self) -> usize {
        self.sessions
    }

    /// The stored board spec (single token or comma list).
    #[must_use]
    pub fn boards(&self) -> &str {
        &self.boards
    }

    /// Output-file-name template (`#` runs substitute the session number).
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Free-text phase description; empty when unset.
    #[must_use]
    pub fn info(&self) -> &str {
        &self.info
    }

    /// Session keys, one per session once the owning event is published.
    #[must_use]
    pub fn session_keys(&self) -> &[SessionKey] {
        &self.session_keys
    }
}

/// The top-level record describing a dealing schedule and its
/// disclosure commitment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Event {
    pub(crate) name: String,
    pub(crate) delayed_info: String,
    pub(crate) delayed_value: String,
    pub(crate) published: bool,
    pub(crate) integrity_hash: Option<String>,
    pub(crate) phases: Vec<Phase>,
}

impl Event {
    /// Creates an empty draft event.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Event name; empty when unset.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description of the information to be disclosed later.
    #[must_use]
    pub fn delayed_info(&self) -> &str {
        &self.delayed_info
    }

    /// The disclosed value; empty until disclosure.
    #[must_use]
    pub fn delayed_value(&self) -> &str {
        &self.delayed_value
    }

    /// Whether the event has passed its commitment point.
    #[must_use]
    pub const fn is_published(&self) -> bool {
        self.published
    }

    /// Hex digest of the key store; present exactly when published and
    /// persisted.
    #[must_use]
    pub fn integrity_hash(&self) -> Option<&str> {
        self.integrity_hash.as_deref()
    }

    /// The ordered phases; index + 1 is the phase number.
    #[must_use]
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Sets the event name.
    ///
    /// # Errors
    ///
    /// Fails with [`StateError::AlreadyPublished`] once the event is
    /// published; the name is part of the commitment.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), StateError> {
        if self.published {
            return Err(StateError::AlreadyPublished {
                operation: "change name",
            });
        }
        self.name = name.into();
        Ok(())
    }

    /// Sets the delayed-information description.
    ///
    /// # Errors
    ///
    /// Fails with [`StateError::AlreadyPublished`] once the event is
    /// published.
    pub fn set_delayed_info(&mut self, info: impl Into<String>) -> Result<(), StateError> {
        if self.published {
            return Err(StateError::AlreadyPublished {
                operation: "change delayed information description",
            });
        }
        self.delayed_info = info.into();
        Ok(())
    }

    /// Discloses the delayed value.
    ///
    /// # Errors
    ///
    /// Fails with [`StateError::NotPublished`] before publication: there
    /// is nothing to disclose before committing.
    pub fn set_delayed_value(&mut self, value: impl Into<String>) -> Result<(), StateError> {
        if !self.published {
            return Err(StateError::NotPublished {
                operation: "set delayed information value",
            });
        }
        self.delayed_value = value.into();
        Ok(())
    }

    /// Appends a phase.
    ///
    /// # Errors
    ///
    /// Fails with [`StateError::AlreadyPublished`] once the event is
    /// published, and with [`StateError::InvalidField`] for a phase
    /// declaring zero sessions.
    pub fn add_phase(&mut self, phase: Phase) -> Result<(), StateError> {
        if self.published {
            return Err(StateError::AlreadyPublished {
                operation: "add phase",
            });
        }
        if phase.sessions == 0 {
            return Err(StateError::InvalidField {
                field: "sessions",
                reason: "session count must be positive".to_string(),
            });
        }
        self.phases.push(phase);
        Ok(())
    }

    /// Publishes the event: the irreversible commitment point.
    ///
    /// Preconditions are checked in order and the first failure wins;
    /// nothing is mutated on failure. On success every phase receives a
    /// fresh [`SessionKey`] per session. The integrity hash itself is
    /// assigned by the codec when the key store is written, since it
    /// commits to the exact bytes on disk.
    ///
    /// # Errors
    ///
    /// [`StateError::AlreadyPublished`], [`StateError::NameNotSet`],
    /// [`StateError::DelayedInfoNotSet`] or [`StateError::NoPhases`],
    /// in that order.
    pub fn publish(&mut self) -> Result<(), StateError> {
        if self.published {
            return Err(StateError::AlreadyPublished {
                operation: "mark as published",
            });
        }
        if self.name.is_empty() {
            return Err(StateError::NameNotSet);
        }
        if self.delayed_info.is_empty() {
            return Err(StateError::DelayedInfoNotSet);
        }
        if self.phases.is_empty() {
            return Err(StateError::NoPhases);
        }
        for phase in &mut self.phases {
            phase.session_keys = (0..phase.sessions).map(|_| SessionKey::generate()).collect();
        }
        self.published = true;
        Ok(())
    }

    /// A serializable view of the event with all key material stripped.
    #[must_use]
    pub fn summary(&self) -> EventSummary {
        EventSummary {
            name: self.name.clone(),
            delayed_info: self.delayed_info.clone(),
            delayed_value: self.delayed_value.clone(),
            published: self.published,
            integrity_hash: self.integrity_hash.clone(),
            phases: self
                .phases
                .iter()
                .map(|phase| PhaseSummary {
                    sessions: phase.sessions,
                    boards: phase.boards.clone(),
                    prefix: phase.prefix.clone(),
                    info: phase.info.clone(),
                    keys_present: !phase.session_keys.is_empty(),
                })
                .collect(),
        }
    }
}

/// Key-free view of an [`Event`] for display and JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct EventSummary {
    /// Event name.
    pub name: String,
    /// Delayed-information description.
    pub delayed_info: String,
    /// Disclosed value; empty until disclosure.
    pub delayed_value: String,
    /// Publication state.
    pub published: bool,
    /// Commitment digest, when published.
    pub integrity_hash: Option<String>,
    /// Per-phase views.
    pub phases: Vec<PhaseSummary>,
}

/// Key-free view of a [`Phase`].
#[derive(Debug, Clone, Serialize)]
pub struct PhaseSummary {
    /// Number of sessions.
    pub sessions: usize,
    /// Stored board spec.
    pub boards: String,
    /// Output-file-name template.
    pub prefix: String,
    /// Free-text description.
    pub info: String,
    /// Whether key material is loaded for this phase.
    pub keys_present: bool,
}
