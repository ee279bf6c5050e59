//! Base58 and Base58Check.
//!
//! Bitcoin alphabet, leading zero bytes mapped to leading `1`s. The check
//! variant appends the first four bytes of `SHA256d(payload)`.

use crate::config::CHECKSUM_LENGTH;
use crate::crypto::double_sha256;
use crate::error::{Error, Result};

/// Encode bytes as Base58.
pub fn encode(data: &[u8]) -> String {
    bs58::encode(data).into_string()
}

/// Decode a Base58 string. Empty input is rejected.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    if text.is_empty() {
        return Err(Error::malformed("base58", "empty input"));
    }
    bs58::decode(text)
        .into_vec()
        .map_err(|e| Error::malformed("base58", e))
}

/// First four bytes of `SHA256d(payload)`.
pub fn compute_checksum(payload: &[u8]) -> [u8; CHECKSUM_LENGTH] {
    let digest = double_sha256(payload);
    let mut out = [0u8; CHECKSUM_LENGTH];
    out.copy_from_slice(&digest[..CHECKSUM_LENGTH]);
    out
}

/// `base58(payload || checksum(payload))`.
pub fn encode_check(payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(payload.len() + CHECKSUM_LENGTH);
    data.extend_from_slice(payload);
    data.extend_from_slice(&compute_checksum(payload));
    encode(&data)
}

/// Decode Base58Check, verify the checksum and return the payload.
pub fn decode_check(text: &str) -> Result<Vec<u8>> {
    let mut data = decode(text)?;
    if data.len() <= CHECKSUM_LENGTH {
        return Err(Error::InvalidLength {
            expected: "more than 4 bytes",
            got: data.len(),
        });
    }
    let split = data.len() - CHECKSUM_LENGTH;
    verify_checksum(&data[..split], &data[split..])?;
    data.truncate(split);
    Ok(data)
}

pub(crate) fn verify_checksum(payload: &[u8], found: &[u8]) -> Result<()> {
    let expected = compute_checksum(payload);
    if expected.as_slice() != found {
        return Err(Error::ChecksumMismatch {
            expected: hex::encode(expected),
            found: hex::encode(found),
        });
    }
    Ok(())
}
