//! Generation orchestration.
//!
//! Resolves the phase and session selectors, then walks the selected
//! sessions in ascending phase-then-session order, invoking the deal
//! generator once per session. The first failure aborts the remainder;
//! deals already produced are left in place (the external tool
//! overwrites idempotently on a rerun).

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;
use tracing::info;

use crate::adapter::{DealGenerator, SessionRequest};
use crate::error::{SquareDealError, StateError};
use crate::event::Event;
use crate::range;

/// Selector and mode inputs for one `generate` call.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Phase selector (`K` or `A-B`); all phases when absent.
    pub phase_selector: Option<String>,
    /// Session selector, resolved against each selected phase; all
    /// sessions when absent.
    pub session_selector: Option<String>,
    /// Generate the reserve board set instead of the original one.
    pub reserve: bool,
}

/// What a `generate` call produced, in invocation order.
#[derive(Debug, Default, Serialize)]
pub struct GenerateSummary {
    /// Output names handed to the generator, one per session.
    pub files: Vec<String>,
}

/// Generates deal files for the selected phases and sessions.
///
/// # Errors
///
/// - [`StateError::NotPublished`] / [`StateError::DelayedValueNotSet`]
///   when the event is not ready for generation.
/// - [`crate::error::RangeError`] for a malformed or out-of-bounds
///   selector or board spec.
/// - [`crate::error::AdapterError`] from the first failing invocation;
///   earlier sessions' output is not rolled back.
pub async fn generate_deals(
    event: &Event,
    options: &GenerateOptions,
    generator: &dyn DealGenerator,
) -> Result<GenerateSummary, SquareDealError> {
    if !event.is_published() {
        return Err(StateError::NotPublished {
            operation: "generate deal files",
        }
        .into());
    }
    if event.delayed_value().is_empty() {
        return Err(StateError::DelayedValueNotSet.into());
    }

    let delayed_value_b64 = BASE64.encode(event.delayed_value().as_bytes());
    let phase_range =
        range::parse_selection_range(options.phase_selector.as_deref(), event.phases().len())?;

    let mut summary = GenerateSummary::default();
    for phase_idx in phase_range {
        let phase = &event.phases()[phase_idx];
        let session_range =
            range::parse_selection_range(options.session_selector.as_deref(), phase.sessions())?;
        let board_ranges = range::expand_board_spec(phase.boards(), phase.sessions())?;

        for session_idx in session_range {
            let (visible, hidden) = phase.session_keys()[session_idx].halves();
            let output_name =
                range::output_file_name(phase.prefix(), session_idx + 1, options.reserve);
            let request = SessionRequest {
                visible_key: visible.to_string(),
                hidden_key: hidden.to_string(),
                delayed_value_b64: delayed_value_b64.clone(),
                reserve: options.reserve,
                output_name: output_name.clone(),
                board_range: board_ranges[session_idx].clone(),
            };

            info!(
                phase = phase_idx + 1,
                session = session_idx + 1,
                output = %output_name,
                "generating session deals"
            );
            generator.generate_session(&request).await?;
            summary.files.push(output_name);
        }
    }

    Ok(summary)
}
