//! The decrypting transform.

use zeroize::{Zeroize, Zeroizing};

use crate::cipher::GcmDecryptor;
use crate::core::constants::{NONCE_LEN, TAG_LEN};
use crate::core::error::StreamError;
use crate::core::traits::ByteTransform;
use crate::keys::Key;

/// Where the transform is in the frame.
///
/// `Drained` only exists so `finish` can take the live state out of a stream
/// by value; a stream is never observable in that state.
enum DecryptState {
    /// Accumulating the leading 12 nonce bytes.
    CollectingNonce {
        nonce: [u8; NONCE_LEN],
        filled: usize,
    },
    /// Nonce recovered, cipher initialized; retaining all further bytes.
    Buffering {
        cipher: GcmDecryptor,
        buffered: Zeroizing<Vec<u8>>,
    },
    Drained,
}

/// Decrypts a `nonce ‖ ciphertext ‖ tag` frame fed in arbitrary chunks.
///
/// The first 12 bytes of input are taken as the nonce, however they happen
/// to be split across chunks. Everything after that is retained undecrypted:
/// the frame carries no length prefix, so the tag's position is only known
/// once the source signals end-of-input, and GCM forbids releasing plaintext
/// before the tag verifies. [`finish`](ByteTransform::finish) slices the
/// trailing 16 bytes off as the tag, decrypts, authenticates, and only then
/// returns the plaintext, or [`StreamError::AuthenticationFailed`] and
/// nothing at all.
///
/// Memory therefore grows with total ciphertext length; callers handling
/// very large inputs must size accordingly.
///
/// Dropping the stream mid-frame zeroizes the key copy and everything
/// buffered.
pub struct DecryptStream {
    key: Key,
    state: DecryptState,
}

impl DecryptStream {
    /// Create a decrypting stream.
    ///
    /// No nonce is supplied here; it is read from the input stream.
    ///
    /// # Errors
    ///
    /// [`StreamError::KeyRequired`] or [`StreamError::InvalidKeyLength`] for
    /// a bad key.
    pub fn new(key: &[u8]) -> Result<Self, StreamError> {
        Ok(Self {
            key: Key::from_slice(key)?,
            state: DecryptState::CollectingNonce {
                nonce: [0u8; NONCE_LEN],
                filled: 0,
            },
        })
    }
}

impl ByteTransform for DecryptStream {
    /// Consume one frame chunk.
    ///
    /// A single chunk may hold part of the nonce, all of it, or the nonce
    /// plus ciphertext plus part of the tag; the offset loop below splits it
    /// across states in one pass. The returned vector is always empty:
    /// plaintext is withheld until [`finish`](ByteTransform::finish)
    /// authenticates the stream.
    fn update(&mut self, input: &[u8]) -> Result<Vec<u8>, StreamError> {
        let mut offset = 0;

        if let DecryptState::CollectingNonce { nonce, filled } = &mut self.state {
            let take = (NONCE_LEN - *filled).min(input.len());
            nonce[*filled..*filled + take].copy_from_slice(&input[..take]);
            *filled += take;
            offset = take;

            if *filled == NONCE_LEN {
                let cipher = GcmDecryptor::new(&self.key.0, nonce);
                self.state = DecryptState::Buffering {
                    cipher,
                    buffered: Zeroizing::new(Vec::new()),
                };
            }
        }

        // Not an `else`: the same chunk that completed the nonce may carry
        // ciphertext (and tag) bytes after it.
        if let DecryptState::Buffering { buffered, .. } = &mut self.state {
            buffered.extend_from_slice(&input[offset..]);
        }

        Ok(Vec::new())
    }

    fn finish(mut self) -> Result<Vec<u8>, StreamError> {
        match std::mem::replace(&mut self.state, DecryptState::Drained) {
            // Input ended before even the nonce arrived: the frame cannot
            // be at least NONCE_LEN + TAG_LEN bytes, so it cannot verify.
            DecryptState::CollectingNonce { .. } => Err(StreamError::AuthenticationFailed),

            DecryptState::Buffering {
                mut cipher,
                buffered,
            } => {
                let Some(split) = buffered.len().checked_sub(TAG_LEN) else {
                    return Err(StreamError::AuthenticationFailed);
                };
                let mut tag = [0u8; TAG_LEN];
                tag.copy_from_slice(&buffered[split..]);

                let mut plaintext = cipher.update(&buffered[..split])?;
                match cipher.finalize(&tag) {
                    Ok(()) => Ok(plaintext),
                    Err(e) => {
                        plaintext.zeroize();
                        Err(e)
                    }
                }
            }

            DecryptState::Drained => Err(StreamError::AuthenticationFailed),
        }
    }
}
