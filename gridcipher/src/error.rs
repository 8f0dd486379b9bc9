use thiserror::Error;

use crate::types::Rgb;

/// Errors from planning a grid layout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("cannot lay out an empty bit sequence")]
    EmptyPayload,

    #[error("{bits} bits need a {grid}x{grid} grid, which does not fit in {budget} pixels")]
    Infeasible { bits: usize, grid: usize, budget: u32 },
}

/// Errors from recovering the tile size from pixels.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InferenceError {
    #[error("no color transitions found in the first {rows_scanned} rows; cannot detect tile size")]
    NoColorTransition { rows_scanned: u32 },
}

/// Errors from sampling tiles (strict mode only).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReadError {
    #[error("tile at row {row}, column {col} has unrecognized color {color}")]
    UnrecognizedTileColor { row: u32, col: u32, color: Rgb },
}

/// Errors from the cipher collaborator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("ciphertext is {0} bytes, shorter than the 16-byte IV")]
    CiphertextTooShort(usize),

    #[error("ciphertext body of {0} bytes is not a whole number of 16-byte blocks")]
    NotBlockAligned(usize),

    #[error("decryption failed: invalid padding (wrong key or corrupted data)")]
    Padding,
}

/// Any failure of an encode or decode call.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error(transparent)]
    Read(#[from] ReadError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error("decrypted message is not valid UTF-8 (wrong key?)")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

impl Error {
    /// True when the image decoded but the key did not fit it.
    ///
    /// Layout, inference and ciphertext length failures mean the input is not
    /// a valid grid image, whatever the key.
    pub fn is_key_error(&self) -> bool {
        matches!(self, Error::Crypto(CryptoError::Padding) | Error::InvalidUtf8(_))
    }
}
