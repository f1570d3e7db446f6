//! Event document model: the record, its phases, and their key material.

pub mod keys;
pub mod model;

pub use keys::{SESSION_KEY_LEN, SessionKey};
pub use model::{Event, EventSummary, Phase, PhaseSummary};
