//! Persistence codec for the two-file event representation.
//!
//! An event lives on disk as a public record (SQD: tagged lines, safe
//! to distribute) and a secret key store (SQK: one key per session).
//! Publication binds the two with a SHA-256 commitment recorded in the
//! public record, so any later edit to the key material is detectable.

pub mod integrity;
pub(crate) mod keystore;
pub mod reader;
pub mod writer;

pub use reader::{ReadOptions, deduce_key_store_path, read_event};
pub use writer::{WriteOptions, WriteReport, write_event};
