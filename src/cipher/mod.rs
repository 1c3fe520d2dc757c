//! Incremental AES-256-GCM.
//!
//! The RustCrypto `aes-gcm` crate only offers a one-shot AEAD interface, but
//! the encrypting transform must emit ciphertext chunk-by-chunk without
//! buffering plaintext. This module composes the same primitives `aes-gcm`
//! is built from (AES-256 in 32-bit big-endian counter mode, plus GHASH)
//! into handles with an `update*`/`finalize` shape:
//!
//! - [`GcmEncryptor`]: `update(plaintext) -> ciphertext`, then
//!   `finalize() -> tag`.
//! - [`GcmDecryptor`]: `update(ciphertext) -> plaintext`, then
//!   `finalize(tag)` which verifies in constant time.
//!
//! The composition follows NIST SP 800-38D with a 96-bit nonce and no
//! associated data: `J0 = nonce || 0x00000001`, the first keystream block
//! (`E_K(J0)`) is reserved as the tag mask, and the tag is
//! `E_K(J0) XOR GHASH(ciphertext || len64(aad) || len64(ciphertext))`.

use aes::Aes256;
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockEncrypt, KeyInit, KeyIvInit, StreamCipher};
use ghash::GHash;
use ghash::universal_hash::UniversalHash;
use subtle::ConstantTimeEq;

use crate::core::constants::{KEY_LEN, MAX_PLAINTEXT_LEN, NONCE_LEN, TAG_LEN};
use crate::core::error::StreamError;

/// AES block / GHASH block size in bytes.
const BLOCK_LEN: usize = 16;

type Ctr32 = ctr::Ctr32BE<Aes256>;

/// GHASH over a byte stream absorbed in arbitrarily-sized chunks.
///
/// GHASH itself only consumes whole 16-byte blocks, so a partial block is
/// carried between `absorb` calls and flushed (zero-padded) at finalization,
/// followed by the SP 800-38D length block.
struct GhashAcc {
    ghash: GHash,
    partial: [u8; BLOCK_LEN],
    partial_len: usize,
    msg_len: u64,
}

impl GhashAcc {
    fn new(h: &ghash::Key) -> Self {
        Self {
            ghash: GHash::new(h),
            partial: [0u8; BLOCK_LEN],
            partial_len: 0,
            msg_len: 0,
        }
    }

    fn absorb(&mut self, mut data: &[u8]) {
        self.msg_len += data.len() as u64;

        if self.partial_len > 0 {
            let take = (BLOCK_LEN - self.partial_len).min(data.len());
            self.partial[self.partial_len..self.partial_len + take]
                .copy_from_slice(&data[..take]);
            self.partial_len += take;
            data = &data[take..];

            if self.partial_len < BLOCK_LEN {
                return;
            }
            self.ghash.update(&[self.partial.into()]);
            self.partial_len = 0;
        }

        let mut blocks = data.chunks_exact(BLOCK_LEN);
        for block in &mut blocks {
            self.ghash.update(&[ghash::Block::clone_from_slice(block)]);
        }

        let rest = blocks.remainder();
        self.partial[..rest.len()].copy_from_slice(rest);
        self.partial_len = rest.len();
    }

    /// Flush the trailing partial block and absorb the length block, then
    /// return the raw GHASH output (not yet masked with `E_K(J0)`).
    fn finalize(mut self) -> [u8; BLOCK_LEN] {
        if self.partial_len > 0 {
            let mut block = [0u8; BLOCK_LEN];
            block[..self.partial_len].copy_from_slice(&self.partial[..self.partial_len]);
            self.ghash.update(&[block.into()]);
        }

        // len(AAD) || len(C), both in bits, big-endian. This format carries
        // no associated data, so the first eight bytes stay zero.
        let mut lengths = [0u8; BLOCK_LEN];
        lengths[8..].copy_from_slice(&(self.msg_len * 8).to_be_bytes());
        self.ghash.update(&[lengths.into()]);

        self.ghash.finalize().into()
    }
}

/// Derive the CTR keystream, GHASH accumulator, and tag mask for one
/// (key, nonce) invocation.
fn init_parts(key: &[u8; KEY_LEN], nonce: &[u8; NONCE_LEN]) -> (Ctr32, GhashAcc, [u8; BLOCK_LEN]) {
    let block_cipher = Aes256::new(GenericArray::from_slice(key));

    // GHASH subkey: H = E_K(0^128)
    let mut h = GenericArray::default();
    block_cipher.encrypt_block(&mut h);
    let acc = GhashAcc::new(&h);

    // J0 = nonce || 0^31 || 1 for a 96-bit nonce
    let mut j0 = [0u8; BLOCK_LEN];
    j0[..NONCE_LEN].copy_from_slice(nonce);
    j0[BLOCK_LEN - 1] = 1;

    let mut keystream = Ctr32::new(GenericArray::from_slice(key), GenericArray::from_slice(&j0));

    // The first keystream block is E_K(J0), reserved for masking the tag;
    // consuming it here leaves the counter at inc32(J0) for the payload.
    let mut tag_mask = [0u8; BLOCK_LEN];
    keystream.apply_keystream(&mut tag_mask);

    (keystream, acc, tag_mask)
}

fn check_length(acc: &GhashAcc, incoming: usize) -> Result<(), StreamError> {
    if acc.msg_len + incoming as u64 > MAX_PLAINTEXT_LEN {
        return Err(StreamError::MessageTooLong);
    }
    Ok(())
}

/// Streaming AES-256-GCM in encrypt mode.
pub(crate) struct GcmEncryptor {
    keystream: Ctr32,
    acc: GhashAcc,
    tag_mask: [u8; BLOCK_LEN],
}

impl GcmEncryptor {
    pub(crate) fn new(key: &[u8; KEY_LEN], nonce: &[u8; NONCE_LEN]) -> Self {
        let (keystream, acc, tag_mask) = init_parts(key, nonce);
        Self {
            keystream,
            acc,
            tag_mask,
        }
    }

    /// Encrypt one plaintext chunk. Chunks may be any size, including empty.
    pub(crate) fn update(&mut self, plaintext: &[u8]) -> Result<Vec<u8>, StreamError> {
        check_length(&self.acc, plaintext.len())?;
        let mut ciphertext = plaintext.to_vec();
        self.keystream.apply_keystream(&mut ciphertext);
        self.acc.absorb(&ciphertext);
        Ok(ciphertext)
    }

    /// Complete authentication over everything encrypted so far and return
    /// the 16-byte tag. No further `update` calls are possible.
    pub(crate) fn finalize(self) -> [u8; TAG_LEN] {
        let mut tag = self.acc.finalize();
        for (byte, mask) in tag.iter_mut().zip(self.tag_mask) {
            *byte ^= mask;
        }
        tag
    }
}

#[cfg(test)]
impl GcmEncryptor {
    /// Pretend `len` bytes have already been absorbed, to reach the GCM
    /// length cap without feeding gigabytes through a test.
    pub(crate) fn assume_processed(&mut self, len: u64) {
        self.acc.msg_len = len;
    }
}

/// Streaming AES-256-GCM in decrypt mode.
///
/// Decryption is only safe under a buffer-then-verify discipline: the caller
/// must hold back decrypted output until [`GcmDecryptor::finalize`] accepts
/// the tag.
pub(crate) struct GcmDecryptor {
    keystream: Ctr32,
    acc: GhashAcc,
    tag_mask: [u8; BLOCK_LEN],
}

impl GcmDecryptor {
    pub(crate) fn new(key: &[u8; KEY_LEN], nonce: &[u8; NONCE_LEN]) -> Self {
        let (keystream, acc, tag_mask) = init_parts(key, nonce);
        Self {
            keystream,
            acc,
            tag_mask,
        }
    }

    /// Decrypt one ciphertext chunk (tag excluded).
    pub(crate) fn update(&mut self, ciphertext: &[u8]) -> Result<Vec<u8>, StreamError> {
        check_length(&self.acc, ciphertext.len())?;
        self.acc.absorb(ciphertext);
        let mut plaintext = ciphertext.to_vec();
        self.keystream.apply_keystream(&mut plaintext);
        Ok(plaintext)
    }

    /// Verify the received tag against everything decrypted so far.
    ///
    /// Comparison is constant-time. On mismatch the caller must discard all
    /// plaintext produced by this handle.
    pub(crate) fn finalize(self, tag: &[u8; TAG_LEN]) -> Result<(), StreamError> {
        let mut expected = self.acc.finalize();
        for (byte, mask) in expected.iter_mut().zip(self.tag_mask) {
            *byte ^= mask;
        }
        if bool::from(expected.ct_eq(tag)) {
            Ok(())
        } else {
            Err(StreamError::AuthenticationFailed)
        }
    }
}
