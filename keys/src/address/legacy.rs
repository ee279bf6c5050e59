//! Base58Check pay-to-public-key-hash addresses.

use crate::codec::base58;
use crate::config::{ChainParams, HASH160_LENGTH};
use crate::crypto::{hash160, PublicKeyPoint};
use crate::error::{Error, Result};

/// `base58check(version || hash160)`.
pub fn p2pkh_from_hash(version: u8, key_hash: &[u8; HASH160_LENGTH]) -> String {
    let mut payload = [0u8; 1 + HASH160_LENGTH];
    payload[0] = version;
    payload[1..].copy_from_slice(key_hash);
    base58::encode_check(&payload)
}

/// The P2PKH address of `pubkey` on `chain`, hashing the chosen SEC1 form.
pub fn p2pkh(pubkey: &PublicKeyPoint, compressed: bool, chain: &ChainParams) -> String {
    let key_hash = hash160(&pubkey.to_sec1(compressed));
    p2pkh_from_hash(chain.p2pkh_version, &key_hash)
}

/// Split a Base58Check address into its version byte and 20-byte hash.
pub fn decode_base58_address(address: &str) -> Result<(u8, [u8; HASH160_LENGTH])> {
    let payload = base58::decode_check(address)?;
    if payload.len() != 1 + HASH160_LENGTH {
        return Err(Error::InvalidLength {
            expected: "21 bytes",
            got: payload.len(),
        });
    }
    let mut key_hash = [0u8; HASH160_LENGTH];
    key_hash.copy_from_slice(&payload[1..]);
    Ok((payload[0], key_hash))
}
