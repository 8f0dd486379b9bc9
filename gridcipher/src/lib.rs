pub mod types;
pub mod error;
pub mod bits;
pub mod layout;
pub mod image;
pub mod infer;
pub mod grid;
pub mod crypto;
pub mod config;
pub mod codec;

pub use codec::{decode_message, encode_message, Codec, EncodedGrid};
pub use config::{CodecConfig, ColorPolicy};
pub use error::Error;
