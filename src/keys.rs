//! Key validation, generation, and encoding helpers.
//!
//! Everything here is convenience around the OS CSPRNG and PBKDF2; the
//! stream transforms themselves only require a 32-byte key from somewhere
//! trustworthy.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::Hmac;
use pbkdf2::pbkdf2;
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::core::constants::{KEY_LEN, PBKDF2_ITERATIONS, PBKDF2_PASS_LEN, PBKDF2_SALT_LEN};
use crate::core::error::StreamError;

/// A validated AES-256 key, zeroized on drop.
///
/// Transforms copy the caller's key bytes into this wrapper at construction;
/// the caller's own copy is never mutated and may be shared across any
/// number of encrypt and decrypt sessions.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub(crate) struct Key(pub(crate) [u8; KEY_LEN]);

impl Key {
    /// Validate and copy key bytes.
    ///
    /// An empty key is a construction error in its own right; any other
    /// length mismatch is reported as the cipher-level rejection it is.
    pub(crate) fn from_slice(key: &[u8]) -> Result<Self, StreamError> {
        validate_key(key)?;
        let bytes: [u8; KEY_LEN] = key
            .try_into()
            .map_err(|_| StreamError::InvalidKeyLength(key.len()))?;
        Ok(Self(bytes))
    }
}

/// Check that a key was actually supplied.
///
/// Only presence is enforced here; exact length is left to cipher
/// construction, which rejects anything other than 32 bytes.
///
/// # Errors
///
/// [`StreamError::KeyRequired`] if `key` is empty.
pub fn validate_key(key: &[u8]) -> Result<(), StreamError> {
    if key.is_empty() {
        return Err(StreamError::KeyRequired);
    }
    Ok(())
}

/// Fill a buffer from the OS CSPRNG, propagating entropy failure.
pub(crate) fn fill_random(dest: &mut [u8]) -> Result<(), StreamError> {
    OsRng
        .try_fill_bytes(dest)
        .map_err(|e| StreamError::Entropy(e.to_string()))
}

/// Return `len` cryptographically random bytes.
///
/// # Errors
///
/// [`StreamError::Entropy`] if the OS entropy source fails. The failure is
/// never masked by retrying or by substituting weaker randomness.
pub fn create_salt(len: usize) -> Result<Vec<u8>, StreamError> {
    let mut salt = vec![0u8; len];
    fill_random(&mut salt)?;
    Ok(salt)
}

/// Generate a 32-byte high-entropy key.
///
/// Runs PBKDF2-HMAC-SHA256 over freshly drawn random passphrase and salt
/// material. Both inputs come from the CSPRNG, so the KDF acts as a second
/// source of randomness rather than as password stretching; there is no
/// password involved and this provides no password-based security.
///
/// # Errors
///
/// [`StreamError::Entropy`] if random material cannot be drawn;
/// [`StreamError::KeyDerivationFailed`] if the KDF rejects its parameters.
pub fn create_key() -> Result<[u8; KEY_LEN], StreamError> {
    let passphrase = Zeroizing::new(create_salt(PBKDF2_PASS_LEN)?);
    let salt = create_salt(PBKDF2_SALT_LEN)?;

    let mut key = [0u8; KEY_LEN];
    pbkdf2::<Hmac<Sha256>>(&passphrase, &salt, PBKDF2_ITERATIONS, &mut key)
        .map_err(|_| StreamError::KeyDerivationFailed)?;
    Ok(key)
}

/// Text encodings for keys at rest.
///
/// An explicit value passed to the helpers that need it, deliberately not a
/// process-wide setting that unrelated encode and decode calls could race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyEncoding {
    /// Standard base64 with padding.
    #[default]
    Base64,
    /// Lowercase hexadecimal.
    Hex,
}

/// Encode key bytes as text.
pub fn encode_key(key: &[u8], encoding: KeyEncoding) -> String {
    match encoding {
        KeyEncoding::Base64 => BASE64.encode(key),
        KeyEncoding::Hex => hex::encode(key),
    }
}

/// Decode a textual key back to bytes.
///
/// # Errors
///
/// [`StreamError::KeyDecode`] if `encoded` is not valid for `encoding`.
pub fn decode_key(encoded: &str, encoding: KeyEncoding) -> Result<Vec<u8>, StreamError> {
    match encoding {
        KeyEncoding::Base64 => BASE64
            .decode(encoded)
            .map_err(|e| StreamError::KeyDecode(e.to_string())),
        KeyEncoding::Hex => hex::decode(encoded).map_err(|e| StreamError::KeyDecode(e.to_string())),
    }
}

/// Generate a fresh key and return it already encoded.
///
/// # Errors
///
/// Same failure modes as [`create_key`].
pub fn create_encoded_key(encoding: KeyEncoding) -> Result<String, StreamError> {
    Ok(encode_key(&create_key()?, encoding))
}
