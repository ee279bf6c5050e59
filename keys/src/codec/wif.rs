//! # Wallet Import Format
//!
//! A WIF is `base58(prefix || scalar || [0x01] || checksum)`:
//!
//! | bytes  | uncompressed | compressed |
//! |--------|--------------|------------|
//! | prefix | 1            | 1          |
//! | scalar | 32           | 32         |
//! | flag   | -            | 1 (`0x01`) |
//! | check  | 4            | 4          |
//!
//! The prefix byte names the chain (`0x80` Bitcoin, `0xB0` Litecoin,
//! `0x9E` Dogecoin). The flag says the matching public key is used in its
//! compressed form.

use std::fmt;

use super::base58;
use crate::config::{
    Chain, CHECKSUM_LENGTH, SCALAR_LENGTH, WIF_COMPRESSED_LENGTH, WIF_COMPRESSION_FLAG,
    WIF_UNCOMPRESSED_LENGTH,
};
use crate::crypto::PrivateKeyScalar;
use crate::error::{Error, Result};

/// A decoded WIF private key.
#[derive(Clone, PartialEq, Eq)]
pub struct WifKey {
    prefix: u8,
    secret: PrivateKeyScalar,
    compressed: bool,
    checksum: [u8; CHECKSUM_LENGTH],
}

impl WifKey {
    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    pub fn secret(&self) -> &PrivateKeyScalar {
        &self.secret
    }

    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    pub fn checksum(&self) -> &[u8; CHECKSUM_LENGTH] {
        &self.checksum
    }

    /// The chain whose WIF prefix this key carries.
    pub fn chain(&self) -> Option<Chain> {
        Chain::from_wif_prefix(self.prefix)
    }

    /// Re-encode this key as WIF text.
    pub fn to_wif(&self) -> String {
        encode(self.prefix, self.secret.as_bytes(), self.compressed)
    }
}

impl fmt::Debug for WifKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WifKey")
            .field("prefix", &format_args!("0x{:02x}", self.prefix))
            .field("secret", &self.secret)
            .field("compressed", &self.compressed)
            .finish()
    }
}

fn body(prefix: u8, scalar: &[u8; SCALAR_LENGTH], compressed: bool) -> Vec<u8> {
    let mut out = Vec::with_capacity(WIF_COMPRESSED_LENGTH);
    out.push(prefix);
    out.extend_from_slice(scalar);
    if compressed {
        out.push(WIF_COMPRESSION_FLAG);
    }
    out
}

/// Encode a scalar as WIF. No range check: callers hold a scalar that was
/// already validated.
pub fn encode(prefix: u8, scalar: &[u8; SCALAR_LENGTH], compressed: bool) -> String {
    base58::encode_check(&body(prefix, scalar, compressed))
}

/// Decode a WIF, accepting only the given prefix bytes.
///
/// Checks run in a fixed order, so a given bad input always reports the
/// same error: encoding, prefix, length, compression flag, checksum, scalar
/// range.
pub fn decode(wif: &str, expected_prefixes: &[u8]) -> Result<WifKey> {
    let raw = base58::decode(wif.trim())?;

    // base58::decode never yields an empty payload
    let prefix = raw[0];
    if !expected_prefixes.contains(&prefix) {
        return Err(Error::UnsupportedPrefix(prefix));
    }

    let compressed = match raw.len() {
        WIF_UNCOMPRESSED_LENGTH => false,
        WIF_COMPRESSED_LENGTH => true,
        got => {
            return Err(Error::InvalidLength {
                expected: "37 or 38 bytes",
                got,
            })
        }
    };

    if compressed {
        let flag = raw[1 + SCALAR_LENGTH];
        if flag != WIF_COMPRESSION_FLAG {
            return Err(Error::InvalidCompressionFlag(flag));
        }
    }

    let split = raw.len() - CHECKSUM_LENGTH;
    base58::verify_checksum(&raw[..split], &raw[split..])?;

    let secret = PrivateKeyScalar::from_bytes(&raw[1..1 + SCALAR_LENGTH])?;
    let mut checksum = [0u8; CHECKSUM_LENGTH];
    checksum.copy_from_slice(&raw[split..]);

    tracing::trace!(prefix = format_args!("0x{prefix:02x}"), compressed, "decoded WIF");

    Ok(WifKey {
        prefix,
        secret,
        compressed,
        checksum,
    })
}

/// Decode a WIF for any supported chain.
pub fn decode_any(wif: &str) -> Result<WifKey> {
    decode(wif, &Chain::all_wif_prefixes())
}
