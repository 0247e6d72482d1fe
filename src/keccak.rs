//! This module contains the type definitions for the pluggable KECCAK-256
//! provider used when deriving method and topic identifiers.
//!
//! # Ethereum Keccak
//!
//! Note that the hash required here is the original Keccak submission as used
//! by Ethereum, and _not_ the padded NIST SHA-3 standardisation of it. Any
//! conforming implementation can be substituted, as identifier derivation is
//! the only place in the library where hashing occurs.

use std::fmt::Debug;

use sha3::{Digest, Keccak256};

/// The interface to an object that can compute KECCAK-256 digests for the
/// library.
///
/// Implementations must be pure: the same input must always produce the same
/// digest, as selector identifiers are derived from it and compared
/// bit-for-bit.
pub trait Keccak
where
    Self: Debug,
{
    /// Computes the 32-byte KECCAK-256 digest of `data`.
    #[must_use]
    fn hash256(&self, data: &[u8]) -> [u8; 32];
}

/// An implementation of the [`Keccak`] trait backed by the [`sha3`] crate's
/// `Keccak256`.
///
/// This is the provider used by every convenience function in the library
/// that needs to hash.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Sha3Keccak;

impl Keccak for Sha3Keccak {
    fn hash256(&self, data: &[u8]) -> [u8; 32] {
        let mut hasher = Keccak256::new();
        hasher.update(data);
        hasher.finalize().into()
    }
}
