//! This module contains the error type that pertains to encoding and decoding
//! values against the ABI type model.

use thiserror::Error;

/// Errors that occur while marshalling values to or from their on-wire form.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    #[error("The value {value} does not fit into the type `{tp}`")]
    TypeOverflow { tp: String, value: String },

    #[error("Expected a value compatible with `{expected}` but found {actual}")]
    ShapeMismatch { expected: String, actual: String },

    #[error("The type `{tp}` has no unambiguous packed encoding")]
    UnsupportedInPackedMode { tp: String },

    #[error("The input ended at byte {at} where {need} more bytes were needed")]
    TruncatedInput { at: usize, need: usize },

    #[error("Encountered the invalid boolean byte {_0:#04x}")]
    InvalidBoolean(u8),

    #[error("The decoded string payload is not valid UTF-8")]
    InvalidString,

    #[error("Values of type `{descriptor}` cannot be marshalled")]
    UnsupportedType { descriptor: String },
}

/// The result type for functions that may return codec errors.
pub type Result<T> = std::result::Result<T, Error>;
