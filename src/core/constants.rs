//! Framing protocol constants.
//!
//! These values define the wire format and MUST NOT be changed: both
//! transforms, and every frame already written to disk or the network,
//! depend on them.

// =============================================================================
// FRAME LAYOUT
// =============================================================================

/// AES-256 key size in bytes.
pub const KEY_LEN: usize = 32;

/// GCM nonce size in bytes (96-bit, the standard GCM nonce length).
pub const NONCE_LEN: usize = 12;

/// GCM authentication tag size in bytes (128-bit).
pub const TAG_LEN: usize = 16;

/// Smallest valid frame: a nonce and a tag around zero bytes of ciphertext.
pub const MIN_FRAME_LEN: usize = NONCE_LEN + TAG_LEN;

/// Maximum plaintext bytes a single stream may carry.
///
/// GCM's 32-bit block counter caps one (key, nonce) invocation at
/// 2^39 - 256 bits of plaintext.
pub const MAX_PLAINTEXT_LEN: u64 = (1 << 36) - 32;

// =============================================================================
// KEY GENERATION (see `keys::create_key`)
// =============================================================================

/// Random passphrase material fed to the KDF, in bytes.
pub const PBKDF2_PASS_LEN: usize = 256;

/// Random salt fed to the KDF, in bytes.
pub const PBKDF2_SALT_LEN: usize = 32;

/// PBKDF2 iteration count for key generation.
///
/// Low by password-hashing standards, and deliberately so: the input is
/// 256 bytes of CSPRNG output, not a password, so the KDF is conditioning
/// randomness rather than stretching a guessable secret.
pub const PBKDF2_ITERATIONS: u32 = 5_000;
