//! Deal generation adapter.
//!
//! `squaredeal` does not deal cards itself: it hands each session's
//! committed key halves, the disclosed value, and a board selection to
//! an external generator and expects deal files in return. The trait
//! seam keeps orchestration testable without the real executable.

mod bigdeal;

pub use bigdeal::{BigDealX, DEFAULT_TIMEOUT_SECS};

use async_trait::async_trait;

use crate::error::AdapterError;

/// One generator invocation: a single session's worth of deals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRequest {
    /// Left key half, seeding the visible deal information.
    pub visible_key: String,
    /// Right key half, seeding the deal kept hidden until disclosure.
    pub hidden_key: String,
    /// Base64 encoding of the disclosed value.
    pub delayed_value_b64: String,
    /// Whether this is a reserve board set.
    pub reserve: bool,
    /// Output file name, session number already substituted.
    pub output_name: String,
    /// Board count or `A-B` range token for this session.
    pub board_range: String,
}

/// Seam for the external deal generator.
#[async_trait]
pub trait DealGenerator {
    /// Produces the deal files for one session.
    ///
    /// # Errors
    ///
    /// Returns an [`AdapterError`] when the generator cannot be
    /// launched, exits non-zero, or exceeds its deadline.
    async fn generate_session(&self, request: &SessionRequest) -> Result<(), AdapterError>;
}
