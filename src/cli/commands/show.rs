//! The `show` command handler.
//!
//! Prints a key-free view of the event record. Loading a published
//! record verifies the key store, so `show` doubles as an integrity
//! check.

use crate::cli::args::{OutputFormat, ShowArgs};
use crate::codec::{ReadOptions, read_event};
use crate::error::SquareDealError;
use crate::event::EventSummary;

/// Display the event record in human or JSON form.
///
/// # Errors
///
/// Fails when the record cannot be loaded or fails integrity checks.
pub fn run(args: &ShowArgs) -> Result<(), SquareDealError> {
    let event = read_event(
        &args.file.sqd_file,
        &ReadOptions {
            key_store_path: args.file.sqk_file.clone(),
        },
    )?;
    let summary = event.summary();

    match args.format {
        OutputFormat::Human => print_human(&summary),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }
    Ok(())
}

fn print_human(summary: &EventSummary) {
    println!("Event name:    {}", display_or_unset(&summary.name));
    println!("Delayed info:  {}", display_or_unset(&summary.delayed_info));
    println!(
        "Published:     {}",
        if summary.published { "yes" } else { "no" }
    );
    if summary.published {
        println!(
            "Delayed value: {}",
            display_or_unset(&summary.delayed_value)
        );
        if let Some(hash) = &summary.integrity_hash {
            println!("Key hash:      {hash}");
        }
    }
    if summary.phases.is_empty() {
        println!("Phases:        (none)");
        return;
    }
    println!("Phases:");
    for (idx, phase) in summary.phases.iter().enumerate() {
        let info = if phase.info.is_empty() {
            String::new()
        } else {
            format!("  ({})", phase.info)
        };
        println!(
            "  {}. {} session(s), boards {}, prefix '{}'{}",
            idx + 1,
            phase.sessions,
            phase.boards,
            phase.prefix,
            info
        );
    }
}

fn display_or_unset(value: &str) -> &str {
    if value.is_empty() { "(not set)" } else { value }
}
