//! This module contains the packed-mode encoder: the non-standard layout in
//! which primitives are emitted at their natural widths with no padding and
//! no length prefixes.
//!
//! The mode exists solely to feed off-chain hashing; there is deliberately no
//! decoder for it, as the layout is ambiguous the moment two variable-width
//! values sit next to each other. Tuples and arrays of dynamic elements are
//! refused for the same reason.

use crate::{
    codec::encoder::{int_word, minimal_be_bytes, uint_word},
    constant::WORD_SIZE_BYTES,
    error::codec::{Error, Result},
    types::AbiType,
    value::AbiValue,
};

/// Encodes `values` against `types` in packed mode.
///
/// # Errors
///
/// When any type is a tuple or an array of dynamic elements, when an integer
/// value exceeds its declared width, or when a value does not inhabit its
/// paired type.
pub fn encode_sequence(types: &[AbiType], values: &[AbiValue]) -> Result<Vec<u8>> {
    if types.len() != values.len() {
        return Err(Error::ShapeMismatch {
            expected: format!("{} values", types.len()),
            actual:   format!("{} values", values.len()),
        });
    }

    let mut out = Vec::new();
    for (tp, value) in types.iter().zip(values) {
        encode_element(tp, value, &mut out)?;
    }

    Ok(out)
}

/// Appends the packed form of a single element to `out`.
fn encode_element(tp: &AbiType, value: &AbiValue, out: &mut Vec<u8>) -> Result<()> {
    match (tp, value) {
        (AbiType::UInt { size }, AbiValue::UInt(v)) => {
            let word = uint_word(*size, v)?;
            out.extend_from_slice(&word[WORD_SIZE_BYTES - usize::from(size / 8)..]);
        }
        (AbiType::Int { size }, AbiValue::Int(v)) => {
            let word = int_word(*size, v)?;
            out.extend_from_slice(&word[WORD_SIZE_BYTES - usize::from(size / 8)..]);
        }
        (AbiType::Address, AbiValue::Address(address)) => out.extend_from_slice(address),
        (AbiType::Address, AbiValue::UInt(v)) => {
            let word = uint_word(160, v)?;
            out.extend_from_slice(&word[12..]);
        }
        (AbiType::Bool, AbiValue::Bool(b)) => out.push(u8::from(*b)),
        (AbiType::Bytes { length }, AbiValue::FixedBytes(data)) => {
            if data.len() > usize::from(*length) {
                return Err(Error::ShapeMismatch {
                    expected: format!("bytes{length}"),
                    actual:   format!("{} bytes", data.len()),
                });
            }
            out.extend_from_slice(data);
        }
        (AbiType::Bytes { length }, AbiValue::UInt(v)) => {
            let data = minimal_be_bytes(v);
            if data.len() > usize::from(*length) {
                return Err(Error::TypeOverflow {
                    tp:    format!("bytes{length}"),
                    value: v.to_string(),
                });
            }
            out.extend_from_slice(&data);
        }
        (AbiType::DynBytes, AbiValue::Bytes(data)) => out.extend_from_slice(data),
        (AbiType::String, AbiValue::String(data)) => out.extend_from_slice(data.as_bytes()),
        (AbiType::Function, AbiValue::Function(reference)) => out.extend_from_slice(reference),
        (AbiType::DynArray { tp }, AbiValue::Array(elements))
        | (AbiType::Array { tp, .. }, AbiValue::FixedArray(elements)) => {
            if tp.is_dynamic() {
                return Err(Error::UnsupportedInPackedMode { tp: tp.to_string() });
            }
            for element in elements {
                encode_element(tp, element, out)?;
            }
        }
        (tp @ AbiType::Tuple { .. }, _) => {
            return Err(Error::UnsupportedInPackedMode { tp: tp.to_string() })
        }
        (tp @ (AbiType::Fixed { .. } | AbiType::UFixed { .. }), _) => {
            return Err(Error::UnsupportedType { descriptor: tp.to_string() })
        }
        (tp, value) => {
            return Err(Error::ShapeMismatch {
                expected: tp.to_string(),
                actual:   value.shape().to_string(),
            })
        }
    }

    Ok(())
}
