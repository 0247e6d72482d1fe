//! This module contains the definition of the Solidity ABI types that the
//! codec is capable of dealing with.

use std::fmt::{Display, Formatter};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Concretely known Solidity ABI types.
///
/// # Invariants
///
/// Each individual variant in the enum describes the invariants placed upon
/// it. It is the responsibility of the code constructing these values to
/// ensure that the invariants are satisfied. Code utilising them will assume
/// that the data has been correctly constructed.
///
/// # Fixed-Point Numbers
///
/// Solidity supports a `fixed` and `ufixed` type in the ABI, but the language
/// support for them is lacking. The codec follows suit: both types parse, but
/// attempting to marshal a value against either of them is an error.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AbiType {
    /// Unsigned integers of a given `size` in bits, where `8 <= size <= 256
    /// && size % 8 == 0`.
    UInt { size: u16 },

    /// Signed (two's complement) integers of a given `size` in bits, where
    /// `8 <= size <= 256 && size % 8 == 0`.
    Int { size: u16 },

    /// Addresses, encoded equivalently to `UInt { size: 160 }` except for
    /// interpretation.
    Address,

    /// Booleans, occupying a full word of which only the lowest byte may be
    /// set.
    Bool,

    /// An external function reference, consisting of an [`Self::Address`]
    /// followed by a method identifier. This is encoded as `bytes24`.
    Function,

    /// Byte arrays of a fixed `length`, where `0 < length <= 32`.
    Bytes { length: u16 },

    /// A dynamically-sized byte array.
    DynBytes,

    /// A dynamically-sized UTF-8 string.
    String,

    /// Signed fixed-point numbers of `size` bits scaled by `10^-exponent`.
    ///
    /// Parse-only; values of this type cannot be marshalled.
    Fixed { size: u16, exponent: u8 },

    /// Unsigned fixed-point numbers of `size` bits scaled by `10^-exponent`.
    ///
    /// Parse-only; values of this type cannot be marshalled.
    UFixed { size: u16, exponent: u8 },

    /// A fixed-`length` array containing elements of an element type `tp`,
    /// where `length >= 0`.
    Array {
        length: usize,
        #[serde(rename = "type")]
        tp:     Box<AbiType>,
    },

    /// A dynamically-sized array containing elements of a type `tp`.
    DynArray {
        #[serde(rename = "type")]
        tp: Box<AbiType>,
    },

    /// An ordered, possibly empty, sequence of component types.
    Tuple { types: Vec<AbiType> },
}

impl AbiType {
    /// Checks whether the encoded length of this type depends on the value
    /// being encoded.
    ///
    /// Dynamic types are referred to through an offset slot in the head
    /// portion of an encoding, with their payload living in the tail.
    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        match self {
            Self::String | Self::DynBytes | Self::DynArray { .. } => true,
            Self::Array { length, tp } => *length >= 1 && tp.is_dynamic(),
            Self::Tuple { types } => types.iter().any(AbiType::is_dynamic),
            _ => false,
        }
    }
}

/// Displays the type in its canonical signature form: the whitespace-free
/// rendering that is hashed when deriving method and topic identifiers.
///
/// Tuple components are inlined and struct names are never emitted, so for
/// example a pair nested in a dynamic array renders as `(uint256,bool)[]`.
impl Display for AbiType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UInt { size } => write!(f, "uint{size}"),
            Self::Int { size } => write!(f, "int{size}"),
            Self::Address => write!(f, "address"),
            Self::Bool => write!(f, "bool"),
            Self::Function => write!(f, "function"),
            Self::Bytes { length } => write!(f, "bytes{length}"),
            Self::DynBytes => write!(f, "bytes"),
            Self::String => write!(f, "string"),
            Self::Fixed { size, exponent } => write!(f, "fixed{size}x{exponent}"),
            Self::UFixed { size, exponent } => write!(f, "ufixed{size}x{exponent}"),
            Self::Array { length, tp } => write!(f, "{tp}[{length}]"),
            Self::DynArray { tp } => write!(f, "{tp}[]"),
            Self::Tuple { types } => {
                write!(f, "({})", types.iter().map(ToString::to_string).join(","))
            }
        }
    }
}
