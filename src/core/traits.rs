//! The shared stream-transform interface.

use super::error::StreamError;

/// A byte-in, byte-out transform with an explicit end-of-input signal.
///
/// Both [`EncryptStream`](crate::EncryptStream) and
/// [`DecryptStream`](crate::DecryptStream) implement this interface
/// independently; neither shares state with the other beyond it.
///
/// # Contract
///
/// - `update` may be called any number of times with chunks of any size,
///   including empty ones. Output bytes preserve input order; the transform
///   is never re-entered concurrently for the same stream.
/// - `finish` consumes the transform, so finalization happens exactly once
///   and a finished stream cannot accept further input.
/// - Dropping a transform without calling `finish` cancels the stream:
///   buffered sensitive material is released and no further output is
///   produced.
pub trait ByteTransform {
    /// Feed one input chunk, returning whatever output it produces.
    ///
    /// A transform is free to return no bytes (the decrypting side buffers
    /// until end-of-input by design).
    fn update(&mut self, input: &[u8]) -> Result<Vec<u8>, StreamError>;

    /// Signal end-of-input and return the final output bytes.
    fn finish(self) -> Result<Vec<u8>, StreamError>;
}
