//! # Conversion Reports
//!
//! The three top-level operations the CLI exposes, each returning a
//! serializable report:
//!
//! - [`convert_private_key`]: WIF or hex secret → every WIF form, the
//!   Ethereum secret and the address set.
//! - [`convert_signed_message`]: address + signature + message → verified
//!   signer and its address set.
//! - [`convert_signed_block`]: the same for an armored block.
//!
//! [`decode_private_key`] is the shared key-input parser.

use serde::Serialize;
use tracing::debug;

use crate::address::{p2pkh, AddressSet};
use crate::codec::{wif, WifKey};
use crate::config::{Chain, BITCOIN, DOGECOIN, LITECOIN, P2WPKH_WIF_PREFIX, SCALAR_LENGTH};
use crate::crypto::PrivateKeyScalar;
use crate::error::Result;
use crate::recovery::{verify_message, verify_signed_block, KeyRecovery, VerifiedIdentity};

/// One secret re-encoded for every chain and key form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WifSet {
    pub btc_uncompressed: String,
    pub btc_compressed: String,
    /// `p2wpkh:` + the compressed WIF, the import form Electrum expects.
    pub btc_p2wpkh: String,
    pub ltc_uncompressed: String,
    pub ltc_compressed: String,
    pub ltc_p2wpkh: String,
    pub doge_uncompressed: String,
}

impl WifSet {
    pub fn from_secret(secret: &PrivateKeyScalar) -> Self {
        let scalar = secret.as_bytes();
        let btc_compressed = wif::encode(BITCOIN.wif_prefix, scalar, true);
        let ltc_compressed = wif::encode(LITECOIN.wif_prefix, scalar, true);
        Self {
            btc_uncompressed: wif::encode(BITCOIN.wif_prefix, scalar, false),
            btc_p2wpkh: format!("{P2WPKH_WIF_PREFIX}{btc_compressed}"),
            btc_compressed,
            ltc_uncompressed: wif::encode(LITECOIN.wif_prefix, scalar, false),
            ltc_p2wpkh: format!("{P2WPKH_WIF_PREFIX}{ltc_compressed}"),
            ltc_compressed,
            doge_uncompressed: wif::encode(DOGECOIN.wif_prefix, scalar, false),
        }
    }

    /// `(label, wif)` in display order.
    pub fn entries(&self) -> [(&'static str, &str); 7] {
        [
            ("Bitcoin P2PKH", self.btc_uncompressed.as_str()),
            ("Bitcoin P2PKH (compressed)", self.btc_compressed.as_str()),
            ("Bitcoin P2WPKH", self.btc_p2wpkh.as_str()),
            ("Litecoin P2PKH", self.ltc_uncompressed.as_str()),
            ("Litecoin P2PKH (compressed)", self.ltc_compressed.as_str()),
            ("Litecoin P2WPKH", self.ltc_p2wpkh.as_str()),
            ("Dogecoin P2PKH", self.doge_uncompressed.as_str()),
        ]
    }
}

/// Everything derivable from one private key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyConversion {
    /// The WIF the input decoded as (hex input is first encoded as an
    /// uncompressed Bitcoin WIF).
    pub original_wif: String,
    pub chain: Chain,
    pub compressed: bool,
    /// Secret exponent, 64 lowercase hex characters.
    pub secret_exponent: String,
    pub wifs: WifSet,
    /// `0x` + secret exponent.
    pub ethereum_secret: String,
    pub addresses: AddressSet,
}

/// Decode a WIF for any supported chain, a `p2wpkh:`-prefixed WIF, or a
/// 64-character hex secret. Hex is read as an uncompressed Bitcoin key.
pub fn decode_private_key(input: &str) -> Result<WifKey> {
    let input = input.trim();
    let input = input.strip_prefix(P2WPKH_WIF_PREFIX).unwrap_or(input);

    if input.len() == 2 * SCALAR_LENGTH && hex::decode(input).is_ok() {
        debug!("treating input as a hex secret");
        let secret = PrivateKeyScalar::from_hex(input)?;
        return wif::decode_any(&wif::encode(BITCOIN.wif_prefix, secret.as_bytes(), false));
    }
    wif::decode_any(input)
}

/// Every WIF, address and secret form of the key in `input`. Accepts what
/// [`decode_private_key`] accepts.
pub fn convert_private_key(input: &str) -> Result<KeyConversion> {
    let key = decode_private_key(input)?;
    let original_wif = key.to_wif();
    let chain = key.chain().unwrap_or(Chain::Bitcoin);
    let secret = key.secret();
    let pubkey = secret.public_key();
    let original_address = p2pkh(&pubkey, key.is_compressed(), chain.params());
    debug!(%chain, compressed = key.is_compressed(), "decoded private key");

    Ok(KeyConversion {
        chain,
        compressed: key.is_compressed(),
        secret_exponent: secret.to_hex(),
        wifs: WifSet::from_secret(secret),
        ethereum_secret: secret.to_ethereum_hex(),
        addresses: AddressSet::derive(&pubkey)?.with_original(original_address),
        original_wif,
    })
}

/// A verified signer and its addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatureConversion {
    pub identity: VerifiedIdentity,
    pub addresses: AddressSet,
}

fn with_addresses(identity: VerifiedIdentity) -> Result<SignatureConversion> {
    let addresses = AddressSet::derive(identity.public_key())?.with_original(identity.address());
    Ok(SignatureConversion {
        identity,
        addresses,
    })
}

/// Verify `signature` over `message` for `address` and derive the signer's
/// address set. `chain` defaults to the one the address belongs to.
pub fn convert_signed_message<R: KeyRecovery>(
    recovery: &R,
    address: &str,
    signature: &str,
    message: &str,
    chain: Option<Chain>,
) -> Result<SignatureConversion> {
    with_addresses(verify_message(recovery, address, signature, message, chain)?)
}

/// Verify an armored block and derive the signer's address set.
pub fn convert_signed_block<R: KeyRecovery>(
    recovery: &R,
    text: &str,
    claimed: Option<&str>,
) -> Result<SignatureConversion> {
    with_addresses(verify_signed_block(recovery, text, claimed)?)
}
