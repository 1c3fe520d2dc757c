//! `std::io` adapters for the stream transforms.

use std::io::{ErrorKind, Read, Write};

use crate::core::error::StreamError;
use crate::core::traits::ByteTransform;
use crate::stream::{DecryptStream, EncryptStream};

/// Chunk size for pumping a reader through a transform.
const COPY_BUF_LEN: usize = 8 * 1024;

/// Drive a transform over a reader/writer pair until the source is drained.
fn pump<T, R, W>(mut transform: T, mut source: R, mut destination: W) -> Result<(), StreamError>
where
    T: ByteTransform,
    R: Read,
    W: Write,
{
    let mut buf = [0u8; COPY_BUF_LEN];
    loop {
        let n = match source.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            // A signal mid-read is not end-of-input.
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        destination.write_all(&transform.update(&buf[..n])?)?;
    }
    destination.write_all(&transform.finish()?)?;
    destination.flush()?;
    Ok(())
}

/// Encrypt everything from `source` into `destination` as one frame.
///
/// A fresh random nonce is drawn for the stream. File, network, and
/// in-memory readers and writers are interchangeable here.
///
/// # Errors
///
/// Construction errors for a bad key, [`StreamError::Entropy`] for nonce
/// generation, and [`StreamError::Io`] from either endpoint.
pub fn encrypt_stream<R, W>(source: R, destination: W, key: &[u8]) -> Result<(), StreamError>
where
    R: Read,
    W: Write,
{
    pump(EncryptStream::new(key)?, source, destination)
}

/// Decrypt one frame from `source` into `destination`.
///
/// Plaintext is written only after the whole frame has been read and its
/// tag verified; on [`StreamError::AuthenticationFailed`] nothing is
/// written at all.
///
/// # Errors
///
/// Construction errors for a bad key, [`StreamError::AuthenticationFailed`]
/// for a frame that does not verify, and [`StreamError::Io`] from either
/// endpoint.
pub fn decrypt_stream<R, W>(source: R, destination: W, key: &[u8]) -> Result<(), StreamError>
where
    R: Read,
    W: Write,
{
    pump(DecryptStream::new(key)?, source, destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const KEY: [u8; 32] = [0x33; 32];

    /// Fails every other read with `Interrupted`, like a signal landing
    /// between retries.
    struct InterruptingReader<R> {
        inner: R,
        interrupt_next: bool,
    }

    impl<R: Read> Read for InterruptingReader<R> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            self.interrupt_next = !self.interrupt_next;
            if self.interrupt_next {
                return Err(std::io::Error::new(ErrorKind::Interrupted, "signal"));
            }
            self.inner.read(buf)
        }
    }

    #[test]
    fn reader_writer_round_trip() {
        let plaintext = b"pumped through io adapters".repeat(1000);

        let mut frame = Vec::new();
        encrypt_stream(Cursor::new(&plaintext), &mut frame, &KEY).unwrap();
        assert_eq!(frame.len(), plaintext.len() + 28);

        let mut recovered = Vec::new();
        decrypt_stream(Cursor::new(&frame), &mut recovered, &KEY).unwrap();
        assert_eq!(recovered, plaintext);
    }

    #[test]
    fn interrupted_reads_are_retried() {
        let plaintext = b"kept reading through signals".repeat(500);

        let mut frame = Vec::new();
        let source = InterruptingReader {
            inner: Cursor::new(&plaintext),
            interrupt_next: false,
        };
        encrypt_stream(source, &mut frame, &KEY).unwrap();
        assert_eq!(frame.len(), plaintext.len() + 28);

        let mut recovered = Vec::new();
        let source = InterruptingReader {
            inner: Cursor::new(&frame),
            interrupt_next: false,
        };
        decrypt_stream(source, &mut recovered, &KEY).unwrap();
        assert_eq!(recovered, plaintext);
    }

    #[test]
    fn failed_authentication_writes_nothing() {
        let mut frame = Vec::new();
        encrypt_stream(Cursor::new(b"secret".as_slice()), &mut frame, &KEY).unwrap();
        let last = frame.len() - 1;
        frame[last] ^= 0x80;

        let mut sink = Vec::new();
        let err = decrypt_stream(Cursor::new(&frame), &mut sink, &KEY).unwrap_err();
        assert!(matches!(err, StreamError::AuthenticationFailed));
        assert!(sink.is_empty());
    }
}
