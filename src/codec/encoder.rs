//! This module contains the standard-mode encoder: the head/tail layout in
//! which statically-sized slots and offsets come first, followed by the
//! concatenated payloads of every dynamic element.

use ethnum::{I256, U256};

use crate::{
    codec::{pad_right_to_word, pad_usize},
    constant::WORD_SIZE_BYTES,
    error::codec::{Error, Result},
    types::AbiType,
    value::AbiValue,
};

/// A single element's contribution to an encoding, produced by the first of
/// the encoder's two passes.
enum Slot {
    /// Statically-encoded bytes that sit directly in the head. Composite
    /// static elements occupy several contiguous words here.
    Inline(Vec<u8>),

    /// The self-contained payload of a dynamic element. The head holds one
    /// offset word for it; the payload itself goes to the tail.
    Deferred(Vec<u8>),
}

/// Encodes `values` against `types` in the standard head/tail layout.
///
/// The encoding proceeds in two passes: the first walks values and types in
/// lock-step, producing an inline slot for each static element and a deferred
/// payload for each dynamic one; the second knows the total head size and can
/// therefore rewrite each deferred marker into the byte offset, relative to
/// the start of this sequence, at which its payload lands.
///
/// The payload of a dynamic tuple or array is produced by recursing into this
/// same routine, which makes it self-contained: offsets inside it are
/// relative to its own start.
///
/// # Errors
///
/// When the value and type counts differ, or any value does not inhabit its
/// paired type.
pub fn encode_sequence(types: &[AbiType], values: &[AbiValue]) -> Result<Vec<u8>> {
    if types.len() != values.len() {
        return Err(Error::ShapeMismatch {
            expected: format!("{} values", types.len()),
            actual:   format!("{} values", values.len()),
        });
    }

    let slots = types
        .iter()
        .zip(values)
        .map(|(tp, value)| encode_element(tp, value))
        .collect::<Result<Vec<Slot>>>()?;

    let head_size: usize = slots
        .iter()
        .map(|slot| match slot {
            Slot::Inline(bytes) => bytes.len(),
            Slot::Deferred(_) => WORD_SIZE_BYTES,
        })
        .sum();

    let mut head = Vec::with_capacity(head_size);
    let mut tail = Vec::new();
    let mut offset = head_size;

    for slot in slots {
        match slot {
            Slot::Inline(bytes) => head.extend_from_slice(&bytes),
            Slot::Deferred(payload) => {
                head.extend_from_slice(&pad_usize(offset));
                offset += payload.len();
                tail.extend(payload);
            }
        }
    }

    head.extend(tail);
    Ok(head)
}

/// Encodes a single element as its slot contribution.
fn encode_element(tp: &AbiType, value: &AbiValue) -> Result<Slot> {
    if tp.is_dynamic() {
        Ok(Slot::Deferred(encode_dynamic(tp, value)?))
    } else {
        Ok(Slot::Inline(encode_static(tp, value)?))
    }
}

/// Encodes the self-contained payload of a dynamic element.
fn encode_dynamic(tp: &AbiType, value: &AbiValue) -> Result<Vec<u8>> {
    match (tp, value) {
        (AbiType::DynBytes, AbiValue::Bytes(data)) => Ok(length_prefixed(data)),
        (AbiType::String, AbiValue::String(data)) => Ok(length_prefixed(data.as_bytes())),
        (AbiType::DynArray { tp }, AbiValue::Array(elements)) => {
            let element_types = vec![(**tp).clone(); elements.len()];
            let mut out = pad_usize(elements.len()).to_vec();
            out.extend(encode_sequence(&element_types, elements)?);
            Ok(out)
        }
        (AbiType::Array { length, tp }, AbiValue::FixedArray(elements)) => {
            if elements.len() != *length {
                return Err(Error::ShapeMismatch {
                    expected: tp_with_length(tp, *length),
                    actual:   format!("{} elements", elements.len()),
                });
            }
            let element_types = vec![(**tp).clone(); elements.len()];
            encode_sequence(&element_types, elements)
        }
        (AbiType::Tuple { types }, AbiValue::Tuple(components)) => {
            encode_sequence(types, components)
        }
        (tp, value) => Err(Error::ShapeMismatch {
            expected: tp.to_string(),
            actual:   value.shape().to_string(),
        }),
    }
}

/// Encodes a static element, producing one word for a primitive and several
/// contiguous words for a static composite.
fn encode_static(tp: &AbiType, value: &AbiValue) -> Result<Vec<u8>> {
    match (tp, value) {
        (AbiType::UInt { size }, AbiValue::UInt(v)) => Ok(uint_word(*size, v)?.to_vec()),
        (AbiType::Int { size }, AbiValue::Int(v)) => Ok(int_word(*size, v)?.to_vec()),
        (AbiType::Address, AbiValue::Address(address)) => {
            let mut word = [0u8; 32];
            word[12..].copy_from_slice(address);
            Ok(word.to_vec())
        }
        // An address is just a uint160 with a different interpretation, so
        // integer values are accepted here as well.
        (AbiType::Address, AbiValue::UInt(v)) => Ok(uint_word(160, v)?.to_vec()),
        (AbiType::Bool, AbiValue::Bool(b)) => {
            let mut word = [0u8; 32];
            word[31] = u8::from(*b);
            Ok(word.to_vec())
        }
        (AbiType::Bytes { length }, AbiValue::FixedBytes(data)) => {
            fixed_bytes_word(*length, data).map(|w| w.to_vec())
        }
        (AbiType::Bytes { length }, AbiValue::UInt(v)) => {
            fixed_bytes_word(*length, &minimal_be_bytes(v)).map(|w| w.to_vec())
        }
        (AbiType::Function, AbiValue::Function(reference)) => {
            let mut word = [0u8; 32];
            word[..24].copy_from_slice(reference);
            Ok(word.to_vec())
        }
        (AbiType::Function, AbiValue::FixedBytes(data)) => {
            fixed_bytes_word(24, data).map(|w| w.to_vec())
        }
        (AbiType::Array { length, tp }, AbiValue::FixedArray(elements)) => {
            if elements.len() != *length {
                return Err(Error::ShapeMismatch {
                    expected: tp_with_length(tp, *length),
                    actual:   format!("{} elements", elements.len()),
                });
            }
            let element_types = vec![(**tp).clone(); elements.len()];
            encode_sequence(&element_types, elements)
        }
        (AbiType::Tuple { types }, AbiValue::Tuple(components)) => {
            encode_sequence(types, components)
        }
        (tp @ (AbiType::Fixed { .. } | AbiType::UFixed { .. }), _) => {
            Err(Error::UnsupportedType { descriptor: tp.to_string() })
        }
        (tp, value) => Err(Error::ShapeMismatch {
            expected: tp.to_string(),
            actual:   value.shape().to_string(),
        }),
    }
}

/// Encodes an unsigned integer into a single left-padded big-endian word,
/// rejecting values that need more than `size` bits.
pub fn uint_word(size: u16, value: &U256) -> Result<[u8; 32]> {
    let bytes = value.to_be_bytes();
    let unused = WORD_SIZE_BYTES - usize::from(size / 8);
    if bytes[..unused].iter().any(|b| *b != 0) {
        return Err(Error::TypeOverflow {
            tp:    format!("uint{size}"),
            value: value.to_string(),
        });
    }

    Ok(bytes)
}

/// Encodes a signed integer into a single two's-complement word.
///
/// The accepted range is `-2^(size-1)+1 ..= 2^(size-1)-1`: the minimum
/// two's-complement value itself is refused.
pub fn int_word(size: u16, value: &I256) -> Result<[u8; 32]> {
    let out_of_range = if size == 256 {
        *value == I256::MIN
    } else {
        let bound = I256::ONE << u32::from(size - 1);
        *value >= bound || *value <= -bound
    };

    if out_of_range {
        return Err(Error::TypeOverflow {
            tp:    format!("int{size}"),
            value: value.to_string(),
        });
    }

    Ok(value.to_be_bytes())
}

/// Encodes a fixed-width byte payload into a single right-padded word,
/// rejecting payloads longer than `length`.
fn fixed_bytes_word(length: u16, data: &[u8]) -> Result<[u8; 32]> {
    if data.len() > usize::from(length) {
        return Err(Error::ShapeMismatch {
            expected: format!("bytes{length}"),
            actual:   format!("{} bytes", data.len()),
        });
    }

    let mut word = [0u8; 32];
    word[..data.len()].copy_from_slice(data);
    Ok(word)
}

/// Renders an unsigned integer as its shortest big-endian byte string, with
/// zero rendering as the empty string.
pub fn minimal_be_bytes(value: &U256) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let first_used = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    bytes[first_used..].to_vec()
}

/// Encodes a byte payload as a length word followed by the data right-padded
/// to a whole number of words.
fn length_prefixed(data: &[u8]) -> Vec<u8> {
    let mut out = pad_usize(data.len()).to_vec();
    out.extend(pad_right_to_word(data));
    out
}

/// Renders a fixed array's expected shape for diagnostics.
fn tp_with_length(tp: &AbiType, length: usize) -> String {
    format!("{tp}[{length}]")
}

#[cfg(test)]
mod test {
    use ethnum::{I256, U256};

    use crate::codec::encoder::{int_word, minimal_be_bytes, uint_word};

    #[test]
    fn rejects_uints_wider_than_their_type() {
        assert!(uint_word(8, &U256::from(255u128)).is_ok());
        assert!(uint_word(8, &U256::from(256u128)).is_err());
        assert!(uint_word(16, &U256::from(65535u128)).is_ok());
        assert!(uint_word(16, &U256::from(65536u128)).is_err());
    }

    #[test]
    fn refuses_the_minimum_twos_complement_value() {
        assert!(int_word(8, &I256::from(127i128)).is_ok());
        assert!(int_word(8, &I256::from(-127i128)).is_ok());
        assert!(int_word(8, &I256::from(-128i128)).is_err());
        assert!(int_word(8, &I256::from(128i128)).is_err());
        assert!(int_word(256, &I256::MIN).is_err());
        assert!(int_word(256, &I256::MAX).is_ok());
    }

    #[test]
    fn encodes_negative_values_as_twos_complement() {
        let word = int_word(8, &I256::from(-1i128)).unwrap();
        assert_eq!(word, [0xffu8; 32]);

        let word = int_word(16, &I256::from(-256i128)).unwrap();
        assert_eq!(word[30..], [0xff, 0x00]);
        assert_eq!(word[..30], [0xffu8; 30]);
    }

    #[test]
    fn renders_minimal_big_endian_bytes() {
        assert_eq!(minimal_be_bytes(&U256::ZERO), Vec::<u8>::new());
        assert_eq!(minimal_be_bytes(&U256::from(0x12345678u128)), vec![
            0x12, 0x34, 0x56, 0x78
        ]);
    }
}
