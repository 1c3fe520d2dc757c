//! The encrypting transform.

use crate::cipher::GcmEncryptor;
use crate::core::constants::{NONCE_LEN, TAG_LEN};
use crate::core::error::StreamError;
use crate::core::traits::ByteTransform;
use crate::keys::{Key, fill_random};

/// Encrypts a plaintext stream into a `nonce ‖ ciphertext ‖ tag` frame.
///
/// The nonce is emitted exactly once, ahead of any ciphertext. Each
/// plaintext chunk is encrypted and emitted immediately: encryption never
/// needs future bytes, so nothing is buffered and memory stays bounded to
/// the chunk in flight. Only the tag, which authenticates the whole stream,
/// waits for [`finish`](ByteTransform::finish).
///
/// # Example
///
/// ```rust
/// use gcm_stream::{ByteTransform, EncryptStream};
///
/// let key = [0u8; 32];
/// let mut encrypt = EncryptStream::new(&key)?;
/// let mut frame = Vec::new();
/// frame.extend(encrypt.update(b"chunk one ")?);
/// frame.extend(encrypt.update(b"chunk two")?);
/// frame.extend(encrypt.finish()?);
/// assert_eq!(frame.len(), 12 + 19 + 16);
/// # Ok::<(), gcm_stream::StreamError>(())
/// ```
pub struct EncryptStream {
    cipher: GcmEncryptor,
    nonce: [u8; NONCE_LEN],
    nonce_emitted: bool,
}

impl EncryptStream {
    /// Create an encrypting stream with a fresh random nonce.
    ///
    /// # Errors
    ///
    /// [`StreamError::KeyRequired`] or [`StreamError::InvalidKeyLength`] for
    /// a bad key; [`StreamError::Entropy`] if the nonce cannot be drawn.
    pub fn new(key: &[u8]) -> Result<Self, StreamError> {
        let mut nonce = [0u8; NONCE_LEN];
        fill_random(&mut nonce)?;
        Self::with_nonce(key, nonce)
    }

    /// Create an encrypting stream with a caller-supplied nonce.
    ///
    /// The nonce must be unique per (key, message) pair; reusing one under
    /// the same key voids GCM's guarantees. Prefer [`EncryptStream::new`]
    /// unless the nonce is managed externally.
    ///
    /// # Errors
    ///
    /// [`StreamError::KeyRequired`] or [`StreamError::InvalidKeyLength`] for
    /// a bad key.
    pub fn with_nonce(key: &[u8], nonce: [u8; NONCE_LEN]) -> Result<Self, StreamError> {
        let key = Key::from_slice(key)?;
        Ok(Self {
            cipher: GcmEncryptor::new(&key.0, &nonce),
            nonce,
            nonce_emitted: false,
        })
    }

    /// The nonce this stream emits as its first 12 output bytes.
    pub fn nonce(&self) -> &[u8; NONCE_LEN] {
        &self.nonce
    }
}

impl ByteTransform for EncryptStream {
    fn update(&mut self, input: &[u8]) -> Result<Vec<u8>, StreamError> {
        // Encrypt before flipping the flag: a failed update must leave the
        // nonce still owed, so the frame can never start with ciphertext.
        let ciphertext = self.cipher.update(input)?;
        let mut out = Vec::with_capacity(
            ciphertext.len() + if self.nonce_emitted { 0 } else { NONCE_LEN },
        );
        if !self.nonce_emitted {
            self.nonce_emitted = true;
            out.extend_from_slice(&self.nonce);
        }
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    fn finish(self) -> Result<Vec<u8>, StreamError> {
        let mut out = Vec::with_capacity(NONCE_LEN + TAG_LEN);
        if !self.nonce_emitted {
            // Empty message: no update ever ran, so the nonce is still owed.
            out.extend_from_slice(&self.nonce);
        }
        out.extend_from_slice(&self.cipher.finalize());
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::MIN_FRAME_LEN;

    const KEY: [u8; 32] = [0x11; 32];

    #[test]
    fn nonce_leads_ciphertext_trails_tag() {
        let nonce = [0xAB; NONCE_LEN];
        let mut enc = EncryptStream::with_nonce(&KEY, nonce).unwrap();

        let first = enc.update(b"hello").unwrap();
        assert_eq!(&first[..NONCE_LEN], &nonce);
        assert_eq!(first.len(), NONCE_LEN + 5);

        let second = enc.update(b" world").unwrap();
        assert_eq!(second.len(), 6, "nonce is emitted exactly once");

        let tail = enc.finish().unwrap();
        assert_eq!(tail.len(), TAG_LEN);
    }

    #[test]
    fn empty_message_frame_is_28_bytes() {
        let enc = EncryptStream::with_nonce(&KEY, [0; NONCE_LEN]).unwrap();
        let frame = enc.finish().unwrap();
        assert_eq!(frame.len(), MIN_FRAME_LEN);
        assert_eq!(&frame[..NONCE_LEN], &[0u8; NONCE_LEN]);
    }

    #[test]
    fn generated_nonces_differ_between_streams() {
        let a = EncryptStream::new(&KEY).unwrap();
        let b = EncryptStream::new(&KEY).unwrap();
        assert_ne!(a.nonce(), b.nonce());
    }

    #[test]
    fn construction_rejects_bad_keys() {
        assert!(matches!(
            EncryptStream::new(b""),
            Err(StreamError::KeyRequired)
        ));
        assert!(matches!(
            EncryptStream::new(&[1u8; 31]),
            Err(StreamError::InvalidKeyLength(31))
        ));
    }

    #[test]
    fn failed_update_leaves_nonce_owed() {
        use crate::core::constants::MAX_PLAINTEXT_LEN;

        let mut enc = EncryptStream::with_nonce(&KEY, [9; NONCE_LEN]).unwrap();
        enc.cipher.assume_processed(MAX_PLAINTEXT_LEN);
        assert!(matches!(enc.update(b"x"), Err(StreamError::MessageTooLong)));

        // The nonce was never emitted, so the frame still starts with it.
        let tail = enc.finish().unwrap();
        assert_eq!(tail.len(), MIN_FRAME_LEN);
        assert_eq!(&tail[..NONCE_LEN], &[9u8; NONCE_LEN]);
    }

    #[test]
    fn empty_update_still_emits_nonce_first() {
        let mut enc = EncryptStream::with_nonce(&KEY, [7; NONCE_LEN]).unwrap();
        let out = enc.update(b"").unwrap();
        assert_eq!(out, [7u8; NONCE_LEN]);
        assert!(enc.update(b"").unwrap().is_empty());
    }
}
