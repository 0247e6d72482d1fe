//! This module contains the runtime representation of the values that are
//! marshalled against the ABI type model.

use ethnum::{I256, U256};

/// A runtime value that can be encoded against an [`crate::types::AbiType`].
///
/// The value model is deliberately looser than the type model: an
/// [`Self::UInt`] carries no bit width, for example, as the width to encode
/// at always comes from the type the value is paired with. The encoder
/// enforces the pairing and rejects values that do not inhabit their type.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AbiValue {
    /// A 20-byte account or contract address.
    Address([u8; 20]),

    /// An unsigned integer of up to 256 bits.
    UInt(U256),

    /// A signed (two's complement) integer of up to 256 bits.
    Int(I256),

    /// A boolean.
    Bool(bool),

    /// An external function reference: an address followed by a method
    /// identifier.
    Function([u8; 24]),

    /// The payload for a fixed-width `bytesN` type.
    FixedBytes(Vec<u8>),

    /// The payload for the dynamically-sized `bytes` type.
    Bytes(Vec<u8>),

    /// A UTF-8 string.
    String(String),

    /// The elements of a dynamically-sized array.
    Array(Vec<AbiValue>),

    /// The elements of a fixed-length array.
    FixedArray(Vec<AbiValue>),

    /// The components of a tuple.
    Tuple(Vec<AbiValue>),
}

impl AbiValue {
    /// Describes the shape of the value for use in diagnostics.
    #[must_use]
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Address(_) => "an address",
            Self::UInt(_) => "an unsigned integer",
            Self::Int(_) => "a signed integer",
            Self::Bool(_) => "a boolean",
            Self::Function(_) => "a function reference",
            Self::FixedBytes(_) => "fixed-width bytes",
            Self::Bytes(_) => "a byte string",
            Self::String(_) => "a string",
            Self::Array(_) => "an array",
            Self::FixedArray(_) => "a fixed-length array",
            Self::Tuple(_) => "a tuple",
        }
    }

    /// Gets the contained unsigned integer, if there is one.
    #[must_use]
    pub fn as_uint(&self) -> Option<&U256> {
        match self {
            Self::UInt(value) => Some(value),
            _ => None,
        }
    }

    /// Gets the contained signed integer, if there is one.
    #[must_use]
    pub fn as_int(&self) -> Option<&I256> {
        match self {
            Self::Int(value) => Some(value),
            _ => None,
        }
    }

    /// Gets the contained boolean, if there is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Gets the contained address, if there is one.
    #[must_use]
    pub fn as_address(&self) -> Option<&[u8; 20]> {
        match self {
            Self::Address(value) => Some(value),
            _ => None,
        }
    }

    /// Gets the contained string slice, if there is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Gets the contained byte payload, if there is one.
    ///
    /// Both the fixed-width and dynamically-sized byte shapes answer here, as
    /// callers inspecting a decoded value rarely care which of the two was on
    /// the wire.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::FixedBytes(value) | Self::Bytes(value) => Some(value.as_slice()),
            _ => None,
        }
    }

    /// Gets the contained sequence of element values, if there is one.
    ///
    /// Arrays of both kinds and tuples all answer here.
    #[must_use]
    pub fn as_elements(&self) -> Option<&[AbiValue]> {
        match self {
            Self::Array(values) | Self::FixedArray(values) | Self::Tuple(values) => {
                Some(values.as_slice())
            }
            _ => None,
        }
    }
}

impl From<u128> for AbiValue {
    fn from(value: u128) -> Self {
        Self::UInt(U256::from(value))
    }
}

impl From<U256> for AbiValue {
    fn from(value: U256) -> Self {
        Self::UInt(value)
    }
}

impl From<i128> for AbiValue {
    fn from(value: i128) -> Self {
        Self::Int(I256::from(value))
    }
}

impl From<I256> for AbiValue {
    fn from(value: I256) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for AbiValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for AbiValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for AbiValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<[u8; 20]> for AbiValue {
    fn from(value: [u8; 20]) -> Self {
        Self::Address(value)
    }
}

impl From<Vec<u8>> for AbiValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

#[cfg(test)]
mod test {
    use ethnum::U256;

    use crate::value::AbiValue;

    #[test]
    fn converts_from_common_rust_shapes() {
        assert_eq!(AbiValue::from(42u128), AbiValue::UInt(U256::from(42u128)));
        assert_eq!(AbiValue::from(true), AbiValue::Bool(true));
        assert_eq!(
            AbiValue::from("gavofyork"),
            AbiValue::String("gavofyork".to_string())
        );
    }

    #[test]
    fn accessors_reject_other_shapes() {
        let value = AbiValue::from(42u128);
        assert_eq!(value.as_uint(), Some(&U256::from(42u128)));
        assert_eq!(value.as_bool(), None);
        assert_eq!(value.as_str(), None);
    }
}
