//! # Text Codecs
//!
//! The string formats keys and addresses travel in:
//!
//! - [`base58`]: plain Base58 and Base58Check (4-byte double-SHA256 checksum).
//! - [`bech32`]: segwit version 0 addresses.
//! - [`wif`]: Wallet Import Format private keys.

pub mod base58;
pub mod bech32;
pub mod wif;

pub use base58::{compute_checksum, decode_check, encode_check};
pub use bech32::{decode_segwit, encode_segwit_v0, SegwitAddress};
pub use wif::WifKey;
