//! Compact recoverable ECDSA signatures.
//!
//! 65 bytes: a header byte `27 + recid + (4 if compressed)`, then `r` and `s`
//! as 32-byte big-endian integers. Signed-message tools ship this base64
//! encoded.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use num_bigint::BigUint;

use crate::config::{
    COMPACT_HEADER_COMPRESSED, COMPACT_HEADER_MAX, COMPACT_HEADER_MIN, COMPACT_SIGNATURE_LENGTH,
    SCALAR_LENGTH,
};
use crate::curve;
use crate::error::{Error, Result};

/// A parsed compact signature with `r` and `s` known to be in `[1, n-1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactSignature {
    header: u8,
    r: [u8; SCALAR_LENGTH],
    s: [u8; SCALAR_LENGTH],
}

impl CompactSignature {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != COMPACT_SIGNATURE_LENGTH {
            return Err(Error::InvalidSignatureLength(bytes.len()));
        }
        let header = bytes[0];
        if !(COMPACT_HEADER_MIN..=COMPACT_HEADER_MAX).contains(&header) {
            return Err(Error::InvalidRecoveryId(header));
        }

        let mut r = [0u8; SCALAR_LENGTH];
        let mut s = [0u8; SCALAR_LENGTH];
        r.copy_from_slice(&bytes[1..1 + SCALAR_LENGTH]);
        s.copy_from_slice(&bytes[1 + SCALAR_LENGTH..]);

        if !curve::is_valid_scalar(&curve::uint_from_be(&r)) {
            return Err(Error::InvalidSignature("r out of range"));
        }
        if !curve::is_valid_scalar(&curve::uint_from_be(&s)) {
            return Err(Error::InvalidSignature("s out of range"));
        }

        Ok(Self { header, r, s })
    }

    /// Decode standard base64 (with padding) and parse.
    pub fn from_base64(text: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(text.trim())
            .map_err(|e| Error::malformed("base64", e))?;
        Self::from_bytes(&bytes)
    }

    pub fn header(&self) -> u8 {
        self.header
    }

    /// `(header - 27) & 3`: bit 0 is the parity of `R.y`, bit 1 says
    /// `R.x = r + n`.
    pub fn recovery_id(&self) -> u8 {
        (self.header - COMPACT_HEADER_MIN) & 3
    }

    /// Whether the signer's address uses the compressed public key.
    pub fn is_compressed(&self) -> bool {
        self.header >= COMPACT_HEADER_COMPRESSED
    }

    pub fn r(&self) -> &[u8; SCALAR_LENGTH] {
        &self.r
    }

    pub fn s(&self) -> &[u8; SCALAR_LENGTH] {
        &self.s
    }

    pub fn r_uint(&self) -> BigUint {
        curve::uint_from_be(&self.r)
    }

    pub fn s_uint(&self) -> BigUint {
        curve::uint_from_be(&self.s)
    }

    /// `r || s`, the 64-byte form `k256` accepts.
    pub fn rs_bytes(&self) -> [u8; 2 * SCALAR_LENGTH] {
        let mut out = [0u8; 2 * SCALAR_LENGTH];
        out[..SCALAR_LENGTH].copy_from_slice(&self.r);
        out[SCALAR_LENGTH..].copy_from_slice(&self.s);
        out
    }

    /// Serialize back to the 65-byte wire form.
    pub fn to_bytes(&self) -> [u8; COMPACT_SIGNATURE_LENGTH] {
        let mut out = [0u8; COMPACT_SIGNATURE_LENGTH];
        out[0] = self.header;
        out[1..].copy_from_slice(&self.rs_bytes());
        out
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }
}
