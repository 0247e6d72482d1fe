//! This module contains constants that are needed throughout the codebase.

/// The width of an EVM word in bytes.
///
/// Every slot in the head portion of a standard ABI encoding occupies exactly
/// one word.
pub const WORD_SIZE_BYTES: usize = 32;

/// The number of bits in a byte.
pub const BYTE_SIZE_BITS: u16 = 8;

/// The width in bytes of a function's method identifier, being the truncated
/// KECCAK-256 hash of its canonical signature.
pub const METHOD_ID_SIZE_BYTES: usize = 4;

/// The width in bytes of an event's topic identifier, being the full
/// KECCAK-256 hash of its canonical signature.
pub const TOPIC_SIZE_BYTES: usize = 32;

/// The width of an EVM address in bytes.
pub const ADDRESS_SIZE_BYTES: usize = 20;

/// The width of an external function reference in bytes.
///
/// This is an address followed by a method identifier, and hence is
/// equivalent in width to `bytes24`.
pub const FUNCTION_SIZE_BYTES: usize = 24;

/// The largest number of bits that an ABI integer type can have.
pub const MAXIMUM_INTEGER_BITS: u16 = 256;

/// The number of bits given to the `uint` and `int` types when written
/// without an explicit size.
pub const DEFAULT_INTEGER_BITS: u16 = 256;

/// The number of bits used to encode an `enum` in a textual signature.
pub const ENUM_INTEGER_BITS: u16 = 8;

/// The largest length that the fixed-size `bytesN` type can have.
pub const MAXIMUM_FIXED_BYTES_LENGTH: u16 = 32;

/// The number of bits given to the `fixed` and `ufixed` types when written
/// without an explicit size.
pub const DEFAULT_FIXED_POINT_BITS: u16 = 128;

/// The exponent given to the `fixed` and `ufixed` types when written without
/// an explicit exponent.
pub const DEFAULT_FIXED_POINT_EXPONENT: u8 = 18;

/// The largest exponent that the `fixed` and `ufixed` types can declare.
pub const MAXIMUM_FIXED_POINT_EXPONENT: u8 = 80;
