//! The `generate` command handler.
//!
//! Wires the CLI inputs into an explicit adapter configuration — the
//! executable path comes from the flag or `BIGDEALX_PATH`, never from
//! hidden global state — and drives the orchestration.

use std::path::Path;
use std::time::Duration;

use tracing::info;

use crate::adapter::BigDealX;
use crate::cli::args::GenerateArgs;
use crate::codec::{ReadOptions, read_event};
use crate::error::{AdapterError, SquareDealError};
use crate::generate::{GenerateOptions, generate_deals};

/// Generate deal files for the selected phases and sessions.
///
/// # Errors
///
/// Fails when the event is not ready for generation, a selector is out
/// of bounds, the adapter is unconfigured, or an invocation fails.
pub async fn run(args: &GenerateArgs) -> Result<(), SquareDealError> {
    let event = read_event(
        &args.file.sqd_file,
        &ReadOptions {
            key_store_path: args.file.sqk_file.clone(),
        },
    )?;

    let Some(executable) = args.bigdealx_path.clone() else {
        return Err(AdapterError::NotConfigured.into());
    };

    // Deal files land next to the public record.
    let working_dir = args
        .file
        .sqd_file
        .canonicalize()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf));

    let adapter = BigDealX::new(executable)
        .with_working_dir(working_dir)
        .with_timeout(Duration::from_secs(args.adapter_timeout));

    let options = GenerateOptions {
        phase_selector: args.phase.clone(),
        session_selector: args.session.clone(),
        reserve: args.reserve,
    };

    let summary = generate_deals(&event, &options, &adapter).await?;
    info!(sessions = summary.files.len(), "deal generation complete");
    Ok(())
}
