//! Event lifecycle command handlers.
//!
//! Each handler is the same read–mutate–write sandwich: load the event
//! through the codec (which verifies integrity for published records),
//! apply one state-machine-gated mutation, persist the result.

use tracing::{info, warn};

use crate::cli::args::{
    AddPhaseArgs, CreateArgs, FileArgs, PublishArgs, SetDiArgs, SetDvArgs, SetNameArgs,
};
use crate::codec::{ReadOptions, WriteOptions, read_event, write_event};
use crate::error::SquareDealError;
use crate::event::{Event, Phase};

fn load(file: &FileArgs) -> Result<Event, SquareDealError> {
    read_event(
        &file.sqd_file,
        &ReadOptions {
            key_store_path: file.sqk_file.clone(),
        },
    )
}

fn store(event: &mut Event, file: &FileArgs, no_backup: bool) -> Result<(), SquareDealError> {
    let report = write_event(
        event,
        &file.sqd_file,
        &WriteOptions {
            key_store_path: file.sqk_file.clone(),
            make_backups: !no_backup,
        },
    )?;
    for warning in &report.warnings {
        warn!("{warning}");
    }
    Ok(())
}

/// Create a fresh draft event record.
///
/// # Errors
///
/// Fails when the record cannot be written.
pub fn create(args: &CreateArgs) -> Result<(), SquareDealError> {
    let mut event = Event::new();
    if let Some(name) = args.event_name.as_deref() {
        event.set_name(name)?;
    }
    if let Some(info) = args.delayed_information.as_deref() {
        event.set_delayed_info(info)?;
    }
    store(&mut event, &args.file, args.no_backup)?;
    info!(path = %args.file.sqd_file.display(), "created event record");
    Ok(())
}

/// Edit the event name.
///
/// # Errors
///
/// Fails with a state error once the event is published.
pub fn set_name(args: &SetNameArgs) -> Result<(), SquareDealError> {
    let mut event = load(&args.file)?;
    event.set_name(args.event_name.as_str())?;
    store(&mut event, &args.file, args.no_backup)
}

/// Edit the delayed-information description.
///
/// # Errors
///
/// Fails with a state error once the event is published.
pub fn set_delayed_info(args: &SetDiArgs) -> Result<(), SquareDealError> {
    let mut event = load(&args.file)?;
    event.set_delayed_info(args.delayed_information.as_str())?;
    store(&mut event, &args.file, args.no_backup)
}

/// Append an event phase.
///
/// # Errors
///
/// Fails with a state error once the event is published.
pub fn add_phase(args: &AddPhaseArgs) -> Result<(), SquareDealError> {
    let mut event = load(&args.file)?;
    event.add_phase(Phase::new(
        args.sessions,
        args.boards.clone(),
        args.prefix.clone(),
        args.description.clone().unwrap_or_default(),
    ))?;
    store(&mut event, &args.file, args.no_backup)?;
    info!(phases = event.phases().len(), "phase added");
    Ok(())
}

/// Publish the event: generate session keys and commit to them.
///
/// # Errors
///
/// Fails with a state error when a publish precondition does not hold.
pub fn publish(args: &PublishArgs) -> Result<(), SquareDealError> {
    let mut event = load(&args.file)?;
    event.publish()?;
    store(&mut event, &args.file, args.no_backup)?;
    info!(
        hash = event.integrity_hash().unwrap_or_default(),
        "event published"
    );
    Ok(())
}

/// Disclose the delayed-information value.
///
/// # Errors
///
/// Fails with a state error before the event is published.
pub fn set_delayed_value(args: &SetDvArgs) -> Result<(), SquareDealError> {
    let mut event = load(&args.file)?;
    event.set_delayed_value(args.delayed_value.as_str())?;
    store(&mut event, &args.file, args.no_backup)
}
