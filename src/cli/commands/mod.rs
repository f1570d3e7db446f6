//! CLI command dispatch and handlers.
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod completions;
pub mod event;
pub mod generate;
pub mod show;
pub mod version;

use crate::cli::args::{Cli, Commands};
use crate::error::SquareDealError;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub async fn dispatch(cli: Cli) -> Result<(), SquareDealError> {
    match cli.command {
        Commands::Create(args) => event::create(&args),
        Commands::SetName(args) => event::set_name(&args),
        Commands::SetDi(args) => event::set_delayed_info(&args),
        Commands::AddPhase(args) => event::add_phase(&args),
        Commands::Publish(args) => event::publish(&args),
        Commands::SetDv(args) => event::set_delayed_value(&args),
        Commands::Generate(args) => generate::run(&args).await,
        Commands::Show(args) => show::run(&args),
        Commands::Completions(args) => {
            completions::run(&args);
            Ok(())
        }
        Commands::Version(args) => {
            version::run(&args);
            Ok(())
        }
    }
}
