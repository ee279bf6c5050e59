//! Ethereum addresses with EIP-55 mixed-case checksums.

use crate::config::{HASH160_LENGTH, SCALAR_LENGTH};
use crate::crypto::{keccak256, PublicKeyPoint};

/// `0x` + EIP-55 checksummed hex of the last 20 bytes of
/// `keccak256(x || y)`.
pub fn ethereum_address(pubkey: &PublicKeyPoint) -> String {
    let uncompressed = pubkey.uncompressed();
    let digest = keccak256(&uncompressed[1..]);
    let tail = &digest[SCALAR_LENGTH - HASH160_LENGTH..];
    to_checksum_address(&hex::encode(tail))
}

/// Apply EIP-55 casing to 40 lowercase hex characters.
///
/// A letter is uppercased when the matching nibble of
/// `keccak256(lowercase_hex)` is 8 or more.
pub fn to_checksum_address(lower_hex: &str) -> String {
    let lower = lower_hex.to_ascii_lowercase();
    let digest = keccak256(lower.as_bytes());
    let mut out = String::with_capacity(2 + lower.len());
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let byte = digest[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}
