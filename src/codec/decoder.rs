//! This module contains the standard-mode decoder: the inverse of the
//! head/tail encoder, recovering values from a byte string and a type list.
//!
//! # Bases and Cursors
//!
//! Offsets in an encoding are relative to the start of the sequence whose
//! head contains them, not to the start of the overall buffer. The decoder
//! therefore threads two positions through every step: the cursor, which
//! walks the head of the sequence currently being decoded, and the region the
//! sequence owns, against whose start all of its offsets are resolved. When
//! the decoder follows an offset into the payload of a nested dynamic tuple
//! or array, that payload becomes the region for everything inside it.

use ethnum::{I256, U256};

use crate::{
    codec::word_to_usize,
    constant::{ADDRESS_SIZE_BYTES, FUNCTION_SIZE_BYTES, WORD_SIZE_BYTES},
    error::codec::{Error, Result},
    types::AbiType,
    value::AbiValue,
};

/// Decodes `data` as a sequence of values with the given `types`, as laid out
/// by the standard-mode encoder.
///
/// Trailing bytes after the described sequence are permitted and ignored, as
/// callers routinely decode a prefix view of a larger buffer.
///
/// # Errors
///
/// When the input is truncated, an offset or length escapes the buffer, a
/// boolean word holds anything other than 0 or 1, or a string payload is not
/// valid UTF-8.
pub fn decode_sequence(types: &[AbiType], data: &[u8]) -> Result<Vec<AbiValue>> {
    let mut cursor = 0usize;
    types
        .iter()
        .map(|tp| decode_element(tp, data, &mut cursor))
        .collect()
}

/// Decodes one element of a sequence, advancing `cursor` past its head slot
/// or slots. `region` is the sequence's own region: the view that the
/// element's offset, if it has one, is relative to.
fn decode_element(tp: &AbiType, region: &[u8], cursor: &mut usize) -> Result<AbiValue> {
    if tp.is_dynamic() {
        let offset = read_usize_word(region, *cursor)?;
        *cursor += WORD_SIZE_BYTES;

        let payload = region.get(offset..).ok_or_else(|| Error::TruncatedInput {
            at:   region.len(),
            need: offset - region.len(),
        })?;
        decode_dynamic(tp, payload)
    } else {
        decode_static(tp, region, cursor)
    }
}

/// Decodes a dynamic element from its payload. The payload is self-contained:
/// it is the region for every offset inside it.
fn decode_dynamic(tp: &AbiType, payload: &[u8]) -> Result<AbiValue> {
    match tp {
        AbiType::DynBytes => Ok(AbiValue::Bytes(read_length_prefixed(payload)?)),
        AbiType::String => {
            let bytes = read_length_prefixed(payload)?;
            let string = String::from_utf8(bytes).map_err(|_| Error::InvalidString)?;
            Ok(AbiValue::String(string))
        }
        AbiType::DynArray { tp } => {
            let count = read_usize_word(payload, 0)?;
            let elements_region = &payload[WORD_SIZE_BYTES..];

            // Each element owns at least one head word, so a count that
            // cannot fit rejects before any allocation happens.
            let minimum = count.checked_mul(WORD_SIZE_BYTES).ok_or(Error::TruncatedInput {
                at:   WORD_SIZE_BYTES,
                need: usize::MAX,
            })?;
            if minimum > elements_region.len() {
                return Err(Error::TruncatedInput {
                    at:   WORD_SIZE_BYTES + elements_region.len(),
                    need: minimum - elements_region.len(),
                });
            }

            let element_types = vec![(**tp).clone(); count];
            Ok(AbiValue::Array(decode_sequence(&element_types, elements_region)?))
        }
        AbiType::Array { length, tp } => {
            let element_types = vec![(**tp).clone(); *length];
            Ok(AbiValue::FixedArray(decode_sequence(&element_types, payload)?))
        }
        AbiType::Tuple { types } => Ok(AbiValue::Tuple(decode_sequence(types, payload)?)),
        _ => Err(Error::UnsupportedType { descriptor: tp.to_string() }),
    }
}

/// Decodes a static element in place, advancing `cursor` past the words it
/// occupies.
fn decode_static(tp: &AbiType, region: &[u8], cursor: &mut usize) -> Result<AbiValue> {
    match tp {
        AbiType::UInt { .. } => {
            let word = read_word(region, cursor)?;
            Ok(AbiValue::UInt(U256::from_be_bytes(word)))
        }
        AbiType::Int { .. } => {
            let word = read_word(region, cursor)?;
            Ok(AbiValue::Int(I256::from_be_bytes(word)))
        }
        AbiType::Address => {
            let word = read_word(region, cursor)?;
            let mut address = [0u8; 20];
            address.copy_from_slice(&word[WORD_SIZE_BYTES - ADDRESS_SIZE_BYTES..]);
            Ok(AbiValue::Address(address))
        }
        AbiType::Bool => {
            let word = read_word(region, cursor)?;
            if word[..31].iter().any(|b| *b != 0) || word[31] > 1 {
                return Err(Error::InvalidBoolean(word[31]));
            }
            Ok(AbiValue::Bool(word[31] == 1))
        }
        AbiType::Bytes { length } => {
            let word = read_word(region, cursor)?;
            Ok(AbiValue::FixedBytes(word[..usize::from(*length)].to_vec()))
        }
        AbiType::Function => {
            let word = read_word(region, cursor)?;
            let mut reference = [0u8; 24];
            reference.copy_from_slice(&word[..FUNCTION_SIZE_BYTES]);
            Ok(AbiValue::Function(reference))
        }
        AbiType::Array { length, tp } => {
            let elements = (0..*length)
                .map(|_| decode_static(tp, region, cursor))
                .collect::<Result<Vec<AbiValue>>>()?;
            Ok(AbiValue::FixedArray(elements))
        }
        AbiType::Tuple { types } => {
            let components = types
                .iter()
                .map(|tp| decode_static(tp, region, cursor))
                .collect::<Result<Vec<AbiValue>>>()?;
            Ok(AbiValue::Tuple(components))
        }
        _ => Err(Error::UnsupportedType { descriptor: tp.to_string() }),
    }
}

/// Reads the word at the cursor, advancing it.
fn read_word(region: &[u8], cursor: &mut usize) -> Result<[u8; 32]> {
    let bytes = region
        .get(*cursor..*cursor + WORD_SIZE_BYTES)
        .ok_or_else(|| Error::TruncatedInput {
            at:   region.len(),
            need: *cursor + WORD_SIZE_BYTES - region.len(),
        })?;

    let mut word = [0u8; 32];
    word.copy_from_slice(bytes);
    *cursor += WORD_SIZE_BYTES;
    Ok(word)
}

/// Reads the word at `at` as an offset or length that must fit in `usize`.
fn read_usize_word(region: &[u8], at: usize) -> Result<usize> {
    let bytes = region
        .get(at..at + WORD_SIZE_BYTES)
        .ok_or_else(|| Error::TruncatedInput {
            at:   region.len(),
            need: at + WORD_SIZE_BYTES - region.len(),
        })?;

    word_to_usize(bytes).ok_or(Error::TruncatedInput {
        at,
        need: usize::MAX,
    })
}

/// Reads a length-prefixed byte payload: a length word followed by that many
/// bytes of data, right-padded to a whole number of words by the encoder.
fn read_length_prefixed(payload: &[u8]) -> Result<Vec<u8>> {
    let length = read_usize_word(payload, 0)?;
    let end = WORD_SIZE_BYTES.checked_add(length).ok_or(Error::TruncatedInput {
        at:   payload.len(),
        need: usize::MAX,
    })?;
    let data = payload
        .get(WORD_SIZE_BYTES..end)
        .ok_or_else(|| Error::TruncatedInput {
            at:   payload.len(),
            need: end - payload.len(),
        })?;

    Ok(data.to_vec())
}
