//! This library implements the [Solidity contract
//! ABI](https://docs.soliditylang.org/en/latest/abi-spec.html): the
//! bytes-on-the-wire contract by which external callers package arguments
//! for, and interpret return values from, code running on the EVM. It is a
//! pure codec with no I/O, no network, and no execution.
//!
//! # How it Works
//!
//! Everything revolves around a small pipeline:
//!
//! 1. A compact textual signature (`transfer(address,uint256)`) or a
//!    descriptive JSON ABI entry is parsed into an [`types::AbiType`] tree
//!    held by a [`selector::Selector`].
//! 2. The selector's canonical signature is hashed with KECCAK-256 to derive
//!    its 4-byte method identifier, or its full 32-byte topic for events.
//! 3. The [`codec`] marshals values against the type tree: the standard mode
//!    produces the head/tail layout the EVM expects, while the packed mode
//!    produces the unpadded concatenation used for off-chain hashing.
//! 4. [`dispatch`] goes the other way, matching incoming call data or log
//!    topics against a set of selectors and decoding what it finds.
//!
//! # Basic Usage
//!
//! For the most basic usage of the library, the signature-driven entry
//! points cover encoding and decoding without any further setup:
//!
//! ```
//! use solidity_abi_codec::{decode, encode, value::AbiValue};
//!
//! let data = encode(
//!     "baz(uint256,address)",
//!     &[AbiValue::from(50u128), AbiValue::from(1u128)],
//! )
//! .unwrap();
//!
//! // The first four bytes are the method identifier.
//! assert_eq!(hex::encode(&data[..4]), "a291add6");
//!
//! let values = decode("baz(uint256,address)", &data).unwrap();
//! assert_eq!(values[0], AbiValue::from(50u128));
//! ```
//!
//! Hashing is performed by a pluggable [`keccak::Keccak`] provider, with
//! [`keccak::Sha3Keccak`] used by every convenience function.

#![warn(clippy::all, clippy::cargo, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // Allows for better API naming

pub mod codec;
pub mod constant;
pub mod dispatch;
pub mod document;
pub mod error;
pub mod keccak;
pub mod parser;
pub mod selector;
pub mod types;
pub mod value;

// Re-exports to provide the library interface.
pub use codec::{decode, encode, encode_packed};
pub use dispatch::{decode_event, find_and_decode, find_by_method_id, find_event};
pub use document::{parse_abi, parse_abi_with};
pub use parser::parse_type;
pub use selector::{parse_signature, parse_signature_with};
