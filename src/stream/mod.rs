//! The encrypting and decrypting stream transforms.
//!
//! Both sides implement [`ByteTransform`](crate::ByteTransform) over the
//! same frame contract and are composable with any upstream source or
//! downstream sink; [`encrypt_stream`] and [`decrypt_stream`] wire them to
//! `std::io` readers and writers.

mod decrypt;
mod encrypt;
mod io;

pub use self::decrypt::DecryptStream;
pub use self::encrypt::EncryptStream;
pub use self::io::{decrypt_stream, encrypt_stream};
