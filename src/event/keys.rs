//! Session key material.
//!
//! A session key is a fixed-length alphanumeric secret generated at
//! publish time, one per session. The left half seeds the visible deal
//! information handed to the generator; the right half seeds the deal
//! kept hidden until disclosure. A key belongs to exactly one
//! phase/session slot and is never regenerated.

use rand::distr::{Alphanumeric, SampleString};

/// Length of a generated session key in characters.
pub const SESSION_KEY_LEN: usize = 60;

/// A per-session secret.
///
/// `Debug` deliberately redacts the material so keys cannot leak
/// through logs or panic messages.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionKey(String);

impl SessionKey {
    /// Generates a fresh key from the thread-local CSPRNG.
    ///
    /// Uniform over `[A-Za-z0-9]`, [`SESSION_KEY_LEN`] characters. These
    /// keys seed a delayed-disclosure protocol, so the randomness source
    /// must be cryptographically secure.
    #[must_use]
    pub fn generate() -> Self {
        Self(Alphanumeric.sample_string(&mut rand::rng(), SESSION_KEY_LEN))
    }

    /// Wraps a key string read back from a key store.
    #[must_use]
    pub fn from_string(key: String) -> Self {
        Self(key)
    }

    /// Returns the key material.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits the key into its (visible, hidden) halves.
    ///
    /// Generated keys are ASCII; for foreign key stores the split point
    /// is floored to a character boundary rather than panicking.
    #[must_use]
    pub fn halves(&self) -> (&str, &str) {
        let mut mid = self.0.len() / 2;
        while !self.0.is_char_boundary(mid) {
            mid -= 1;
        }
        self.0.split_at(mid)
    }
}

impl std::fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SessionKey(<{} chars>)", self.0.len())
    }
}
