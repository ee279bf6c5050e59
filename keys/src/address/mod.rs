//! # Address Encoding
//!
//! Everything a public key can be shown as:
//!
//! - [`legacy`]: Base58Check P2PKH, per chain, for either SEC1 form.
//! - [`segwit`]: Bech32 P2WPKH over the compressed key.
//! - [`ethereum`]: EIP-55 checksummed Keccak address.
//! - [`infer`]: map an address back to its chain.
//!
//! [`AddressSet`] bundles all of them for one key in a fixed order, which is
//! the order the CLI prints them in.

pub mod ethereum;
pub mod infer;
pub mod legacy;
pub mod segwit;

use serde::Serialize;

pub use ethereum::ethereum_address;
pub use infer::infer_chain;
pub use legacy::{decode_base58_address, p2pkh};
pub use segwit::p2wpkh;

use crate::config::{BITCOIN, DOGECOIN, LITECOIN};
use crate::crypto::PublicKeyPoint;
use crate::error::Result;

/// Every address derived from one public key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressSet {
    btc_p2pkh_uncompressed: String,
    btc_p2pkh_compressed: String,
    btc_p2wpkh: String,
    ethereum: String,
    ltc_p2pkh_uncompressed: String,
    ltc_p2pkh_compressed: String,
    ltc_p2wpkh: String,
    doge_p2pkh: String,
    pubkey_uncompressed: String,
    pubkey_compressed: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    original: Option<String>,
}

impl AddressSet {
    /// Derive the full set for `pubkey`.
    pub fn derive(pubkey: &PublicKeyPoint) -> Result<Self> {
        let set = Self {
            btc_p2pkh_uncompressed: p2pkh(pubkey, false, &BITCOIN),
            btc_p2pkh_compressed: p2pkh(pubkey, true, &BITCOIN),
            btc_p2wpkh: p2wpkh(pubkey, &BITCOIN)?,
            ethereum: ethereum_address(pubkey),
            ltc_p2pkh_uncompressed: p2pkh(pubkey, false, &LITECOIN),
            ltc_p2pkh_compressed: p2pkh(pubkey, true, &LITECOIN),
            ltc_p2wpkh: p2wpkh(pubkey, &LITECOIN)?,
            doge_p2pkh: p2pkh(pubkey, false, &DOGECOIN),
            pubkey_uncompressed: pubkey.to_hex(false),
            pubkey_compressed: pubkey.to_hex(true),
            original: None,
        };
        tracing::debug!(btc = %set.btc_p2pkh_compressed, "derived address set");
        Ok(set)
    }

    /// Attach the address the caller started from.
    pub fn with_original(mut self, original: impl Into<String>) -> Self {
        self.original = Some(original.into());
        self
    }

    pub fn btc_p2pkh_uncompressed(&self) -> &str {
        &self.btc_p2pkh_uncompressed
    }

    pub fn btc_p2pkh_compressed(&self) -> &str {
        &self.btc_p2pkh_compressed
    }

    pub fn btc_p2wpkh(&self) -> &str {
        &self.btc_p2wpkh
    }

    pub fn ethereum(&self) -> &str {
        &self.ethereum
    }

    pub fn ltc_p2pkh_uncompressed(&self) -> &str {
        &self.ltc_p2pkh_uncompressed
    }

    pub fn ltc_p2pkh_compressed(&self) -> &str {
        &self.ltc_p2pkh_compressed
    }

    pub fn ltc_p2wpkh(&self) -> &str {
        &self.ltc_p2wpkh
    }

    pub fn doge_p2pkh(&self) -> &str {
        &self.doge_p2pkh
    }

    pub fn pubkey_uncompressed(&self) -> &str {
        &self.pubkey_uncompressed
    }

    pub fn pubkey_compressed(&self) -> &str {
        &self.pubkey_compressed
    }

    pub fn original(&self) -> Option<&str> {
        self.original.as_deref()
    }

    /// The chain addresses as `(label, address)`, in display order.
    ///
    /// Public key hex and the original address are not included.
    pub fn entries(&self) -> [(&'static str, &str); 8] {
        [
            ("Bitcoin P2PKH", self.btc_p2pkh_uncompressed.as_str()),
            ("Bitcoin P2PKH (compressed)", self.btc_p2pkh_compressed.as_str()),
            ("Bitcoin P2WPKH", self.btc_p2wpkh.as_str()),
            ("Ethereum", self.ethereum.as_str()),
            ("Litecoin P2PKH", self.ltc_p2pkh_uncompressed.as_str()),
            ("Litecoin P2PKH (compressed)", self.ltc_p2pkh_compressed.as_str()),
            ("Litecoin P2WPKH", self.ltc_p2wpkh.as_str()),
            ("Dogecoin P2PKH", self.doge_p2pkh.as_str()),
        ]
    }

    /// `true` if `address` is any of the chain addresses in this set.
    pub fn contains(&self, address: &str) -> bool {
        self.entries().iter().any(|(_, a)| *a == address)
    }
}
