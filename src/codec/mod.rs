//! This module contains the value codec: the standard head/tail encoder and
//! decoder, the packed encoder, and the signature-driven convenience entry
//! points that tie them to the parser.

pub mod decoder;
pub mod encoder;
pub mod packed;

use crate::{
    constant::WORD_SIZE_BYTES,
    error::Result,
    selector::{parse_signature, Direction},
    types::AbiType,
    value::AbiValue,
};

/// Encodes `values` against the signature in `text`, in the standard layout.
///
/// When the signature names a function, the resulting bytes begin with its
/// 4-byte method identifier and are therefore complete call data. An
/// anonymous signature such as `(string)` encodes its bare type list with no
/// identifier.
///
/// # Errors
///
/// When the signature does not parse, or any value does not inhabit its
/// declared type.
pub fn encode(text: &str, values: &[AbiValue]) -> Result<Vec<u8>> {
    parse_signature(text)?.encode(values, Direction::Input)
}

/// Decodes `data` against the signature in `text`.
///
/// When the signature names a function and `data` begins with its method
/// identifier, the identifier is stripped before decoding.
///
/// # Errors
///
/// When the signature does not parse, or the data does not decode at the
/// declared types.
pub fn decode(text: &str, data: &[u8]) -> Result<Vec<AbiValue>> {
    parse_signature(text)?.decode(data, Direction::Input)
}

/// Encodes `values` against `types` in packed mode: natural widths, no
/// padding, no length prefixes, and no decode path.
///
/// # Errors
///
/// When any type has no unambiguous packed form (tuples, arrays of dynamic
/// elements), or a value does not inhabit its declared type.
pub fn encode_packed(types: &[AbiType], values: &[AbiValue]) -> Result<Vec<u8>> {
    Ok(packed::encode_sequence(types, values)?)
}

/// Left-pads a byte count into a single big-endian word, as used for offsets
/// and length prefixes.
#[must_use]
pub(crate) fn pad_usize(value: usize) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[WORD_SIZE_BYTES - 8..].copy_from_slice(&(value as u64).to_be_bytes());
    word
}

/// Right-pads `data` to a whole number of words. Empty data stays empty.
#[must_use]
pub(crate) fn pad_right_to_word(data: &[u8]) -> Vec<u8> {
    let padded_length = data.len().div_ceil(WORD_SIZE_BYTES) * WORD_SIZE_BYTES;
    let mut out = vec![0u8; padded_length];
    out[..data.len()].copy_from_slice(data);
    out
}

/// Interprets a 32-byte word as a `usize`, returning [`None`] when the value
/// does not fit.
#[must_use]
pub(crate) fn word_to_usize(word: &[u8]) -> Option<usize> {
    if word.len() != WORD_SIZE_BYTES || word[..WORD_SIZE_BYTES - 8].iter().any(|b| *b != 0) {
        return None;
    }

    let mut tail = [0u8; 8];
    tail.copy_from_slice(&word[WORD_SIZE_BYTES - 8..]);
    usize::try_from(u64::from_be_bytes(tail)).ok()
}
