//! Core constants, error types, and the transform interface.

pub mod constants;
pub mod error;
pub mod traits;

pub use self::constants::{KEY_LEN, MIN_FRAME_LEN, NONCE_LEN, TAG_LEN};
pub use self::error::StreamError;
pub use self::traits::ByteTransform;
