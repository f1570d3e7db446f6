//! Shared helpers for the e2e suites: spawn the real binary and build
//! stub deal generators.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Handle for spawning the compiled `squaredeal` binary.
pub struct SquareDealProcess;

impl SquareDealProcess {
    /// Runs the binary with the given arguments in the caller's
    /// working directory and waits for completion.
    pub fn spawn_command(args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_squaredeal"))
            .args(args)
            .output()
            .expect("failed to spawn squaredeal binary")
    }

    /// Runs the binary with the given arguments inside `dir`.
    pub fn spawn_in(dir: &Path, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_squaredeal"))
            .args(args)
            .current_dir(dir)
            .env_remove("BIGDEALX_PATH")
            .env_remove("SQUAREDEAL_LOG_LEVEL")
            .output()
            .expect("failed to spawn squaredeal binary")
    }
}

/// Creates a draft event with one 2-session phase inside `dir` and
/// returns the record path.
pub fn create_draft(dir: &Path) -> PathBuf {
    let sqd = dir.join("event.sqd");
    let sqd_str = sqd.to_str().unwrap().to_string();

    let output = SquareDealProcess::spawn_in(
        dir,
        &[
            "create",
            &sqd_str,
            "--event-name",
            "Club Championship",
            "--delayed-information",
            "Hand records",
        ],
    );
    assert!(
        output.status.success(),
        "create failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let output = SquareDealProcess::spawn_in(
        dir,
        &["add-phase", &sqd_str, "2", "1-10", "sess#"],
    );
    assert!(
        output.status.success(),
        "add-phase failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    sqd
}

/// Creates, publishes, and discloses an event, returning the record path.
pub fn create_published(dir: &Path) -> PathBuf {
    let sqd = create_draft(dir);
    let sqd_str = sqd.to_str().unwrap();

    let output = SquareDealProcess::spawn_in(dir, &["publish", sqd_str]);
    assert!(
        output.status.success(),
        "publish failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let output = SquareDealProcess::spawn_in(dir, &["set-dv", sqd_str, "north wins"]);
    assert!(
        output.status.success(),
        "set-dv failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    sqd
}

/// Writes an executable stub generator script into `dir`.
#[cfg(unix)]
pub fn write_stub_generator(dir: &Path, name: &str, script: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, script).expect("failed to write stub generator");
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}
