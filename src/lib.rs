//! # gcm-stream
//!
//! Streaming AES-256-GCM authenticated encryption.
//!
//! Plaintext flows into an [`EncryptStream`] and comes out as a
//! self-describing frame: a 12-byte nonce, the ciphertext, and a trailing
//! 16-byte authentication tag. A [`DecryptStream`] consumes that frame in
//! arbitrarily-sized chunks, recovers the nonce incrementally, and releases
//! plaintext only after the tag has been verified.
//!
//! ## Wire format
//!
//! ```text
//! [ nonce (12) | ciphertext (N) | tag (16) ]
//! ```
//!
//! No length prefix, no version byte. An empty message produces exactly
//! 28 bytes. Because the tag trails the ciphertext and the stream carries no
//! length information, the decrypting side must buffer everything after the
//! nonce until end-of-input before it can verify and release anything.
//!
//! ## Example
//!
//! ```rust
//! use gcm_stream::{ByteTransform, DecryptStream, EncryptStream, create_key};
//!
//! let key = create_key()?;
//!
//! let mut encrypt = EncryptStream::new(&key)?;
//! let mut frame = encrypt.update(b"attack at dawn")?;
//! frame.extend(encrypt.finish()?);
//!
//! let mut decrypt = DecryptStream::new(&key)?;
//! decrypt.update(&frame)?;
//! assert_eq!(decrypt.finish()?, b"attack at dawn");
//! # Ok::<(), gcm_stream::StreamError>(())
//! ```
//!
//! ## Modules
//!
//! - [`core`]: constants, error type, and the [`ByteTransform`] interface
//! - [`stream`]: the encrypting and decrypting transforms plus I/O adapters
//! - [`keys`]: key validation, generation, and encoding helpers
//!
//! ## Security notes
//!
//! - A nonce must never be reused with the same key. [`EncryptStream::new`]
//!   draws a fresh random nonce per stream; reuse detection across sessions
//!   is the caller's responsibility.
//! - No plaintext is ever released by a decrypting stream before the tag
//!   verifies. Tampering, truncation, and wrong-key use all surface as
//!   [`StreamError::AuthenticationFailed`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod core;
pub mod keys;
pub mod stream;

mod cipher;

pub use crate::core::constants::{KEY_LEN, MIN_FRAME_LEN, NONCE_LEN, TAG_LEN};
pub use crate::core::error::StreamError;
pub use crate::core::traits::ByteTransform;
pub use crate::keys::{
    KeyEncoding, create_encoded_key, create_key, create_salt, decode_key, encode_key,
    validate_key,
};
pub use crate::stream::{DecryptStream, EncryptStream, decrypt_stream, encrypt_stream};
