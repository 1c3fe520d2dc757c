//! Error types for streaming encryption and decryption.

use thiserror::Error;

/// Errors surfaced by the stream transforms and key helpers.
///
/// There is no retry anywhere in this crate: cryptographic failures are not
/// transient, and every variant is raised directly to the caller of the
/// affected stream.
#[derive(Debug, Error)]
pub enum StreamError {
    /// No key (or an empty key) was supplied at construction.
    #[error("key is required: expected a non-empty byte sequence")]
    KeyRequired,

    /// The key is not the 32 bytes AES-256 requires.
    #[error("invalid key length: expected 32 bytes, got {0}")]
    InvalidKeyLength(usize),

    /// An encoded key could not be decoded.
    #[error("invalid encoded key: {0}")]
    KeyDecode(String),

    /// Key derivation failed.
    #[error("key derivation failed")]
    KeyDerivationFailed,

    /// The authentication tag did not verify at end-of-stream.
    ///
    /// Raised for tag mismatch, tampered or truncated frames, and wrong-key
    /// use. No plaintext is released for the failing stream.
    #[error("authentication failed: tag mismatch or truncated stream")]
    AuthenticationFailed,

    /// The stream exceeded the AES-GCM per-invocation plaintext limit.
    #[error("plaintext exceeds the AES-GCM per-stream length limit")]
    MessageTooLong,

    /// The OS entropy source failed.
    ///
    /// Fatal and propagated as-is: retrying a failed entropy source without
    /// operator awareness risks weak randomness.
    #[error("entropy source failure: {0}")]
    Entropy(String),

    /// I/O error from a reader or writer adapter.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
