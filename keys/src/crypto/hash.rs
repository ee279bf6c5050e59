//! # Hashing Utilities
//!
//! The four digests the key and address pipeline needs:
//!
//! - **SHA-256**, and its doubled form `SHA-256(SHA-256(x))`, for Base58Check
//!   checksums and the signed-message digest.
//! - **HASH160** = `RIPEMD-160(SHA-256(x))`, the public key hash behind every
//!   P2PKH and P2WPKH address.
//! - **Keccak-256** (the pre-NIST padding, not SHA3-256) for Ethereum
//!   addresses and their EIP-55 checksum casing.
//!
//! All functions return fixed-size arrays. The callers either slice the
//! result or feed it straight into another hash.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use sha3::Keccak256;

use crate::config::HASH160_LENGTH;

/// Compute the SHA-256 hash of the input data.
///
/// # Example
///
/// ```
/// use opendime_keys::crypto::sha256;
///
/// let hash = sha256(b"");
/// assert_eq!(hash[0], 0xe3);
/// ```
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute the double-SHA-256 hash: `SHA-256(SHA-256(data))`.
///
/// Base58Check takes the first four bytes of this as its checksum, and the
/// signed-message digest is exactly this over the framed message.
///
/// # Example
///
/// ```
/// use opendime_keys::crypto::double_sha256;
///
/// let digest = double_sha256(&[0xde, 0xad, 0xbe, 0xef]);
/// assert_eq!(&digest[..4], &[0x28, 0x1d, 0xd5, 0x0f]);
/// ```
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// `RIPEMD-160(SHA-256(data))`.
pub fn hash160(data: &[u8]) -> [u8; HASH160_LENGTH] {
    let mut hasher = Ripemd160::new();
    hasher.update(sha256(data));
    hasher.finalize().into()
}

/// Keccak-256 as used by Ethereum.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}
