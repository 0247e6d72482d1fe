//! This module contains common testing utilities for testing this library.
#![cfg(test)]

use anyhow::anyhow;

/// Decodes a hex string into bytes, ignoring any whitespace.
///
/// This allows the expected byte vectors in the tests to be written one word
/// per line.
#[allow(unused)] // It is actually
pub fn bytes_from_hex(hex_text: &str) -> anyhow::Result<Vec<u8>> {
    let compact: String = hex_text.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(compact).map_err(|_| anyhow!("Could not decode hex"))
}

/// Constructs an address whose 20 bytes all hold `byte`.
#[allow(unused)] // It is actually
pub fn address_of(byte: u8) -> [u8; 20] {
    [byte; 20]
}

/// Constructs a 32-byte topic word holding an address in its low 20 bytes.
#[allow(unused)] // It is actually
pub fn address_topic(byte: u8) -> [u8; 32] {
    let mut topic = [0u8; 32];
    topic[12..].copy_from_slice(&address_of(byte));
    topic
}
