//! This module contains the error type that pertains to parsing textual
//! signatures and type strings.

use thiserror::Error;

use crate::error::container;

/// Errors that occur while lexing or parsing a textual signature into the
/// library's rich [`crate::types::AbiType`] representation.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    #[error("Encountered unexpected character {_0:?} in the signature")]
    UnexpectedCharacter(char),

    #[error("Encountered `{found}` where {expected} was expected")]
    UnexpectedToken { found: String, expected: String },

    #[error("The signature ended where {_0} was expected")]
    UnexpectedEndOfInput(String),

    #[error("The parentheses in the signature are unbalanced")]
    UnbalancedParentheses,

    #[error("`{_0}` is not a known base type")]
    UnknownBaseType(String),

    #[error("`{_0}` is not a valid size for this type")]
    InvalidSize(String),

    #[error("The size {_0} is not a multiple of 8")]
    SizeNotMultipleOfEight(u16),

    #[error("`bytes{_0}` is outside of the supported widths 1 to 32")]
    InvalidBytesWidth(u16),

    #[error("The signature continues with `{_0}` after the parse completed")]
    TrailingInput(String),
}

/// A parse error with an associated byte offset in the input text.
pub type LocatedError = container::Located<Error>;

/// The result type for functions that may return parse errors.
pub type Result<T> = std::result::Result<T, LocatedError>;

/// Make it possible to attach locations to these errors.
impl container::Locatable for Error {
    type Located = LocatedError;

    fn locate(self, position: u32) -> Self::Located {
        container::Located {
            location: position,
            payload:  self,
        }
    }
}
