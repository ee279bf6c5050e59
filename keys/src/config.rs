//! # Constants & Chain Parameters
//!
//! Every magic number used by the conversion engine lives here: curve
//! parameters, version bytes, WIF prefixes, Bech32 HRPs and signed-message
//! magics. Chain selection is an explicit [`Chain`] value whose
//! [`ChainParams`] are handed to each codec. Nothing here is global mutable
//! state and nothing needs to be "set up" before use.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

// ---------------------------------------------------------------------------
// secp256k1 Domain Parameters (SEC 2, section 2.4.1)
// ---------------------------------------------------------------------------

/// Field prime `p = 2^256 - 2^32 - 977`.
pub const SECP256K1_P_HEX: &str =
    "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f";

/// Group order `n`.
pub const SECP256K1_N_HEX: &str =
    "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";

/// Generator x coordinate.
pub const SECP256K1_GX_HEX: &str =
    "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

/// Generator y coordinate.
pub const SECP256K1_GY_HEX: &str =
    "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

/// Curve constant `b` in `y^2 = x^3 + b`.
pub const SECP256K1_B: u32 = 7;

// ---------------------------------------------------------------------------
// Encoded Lengths
// ---------------------------------------------------------------------------

/// Raw secret scalar / field element width.
pub const SCALAR_LENGTH: usize = 32;

/// SEC1 compressed public key: sign byte || x.
pub const COMPRESSED_PUBKEY_LENGTH: usize = 33;

/// SEC1 uncompressed public key: 0x04 || x || y.
pub const UNCOMPRESSED_PUBKEY_LENGTH: usize = 65;

/// SEC1 tag for uncompressed points.
pub const UNCOMPRESSED_TAG: u8 = 0x04;

/// SEC1 tag for compressed points with even y.
pub const COMPRESSED_EVEN_TAG: u8 = 0x02;

/// SEC1 tag for compressed points with odd y.
pub const COMPRESSED_ODD_TAG: u8 = 0x03;

/// Base58Check checksum width.
pub const CHECKSUM_LENGTH: usize = 4;

/// RIPEMD160(SHA256(x)) digest width.
pub const HASH160_LENGTH: usize = 20;

/// Decoded WIF length for a key flagged as uncompressed: prefix || scalar || checksum.
pub const WIF_UNCOMPRESSED_LENGTH: usize = 1 + SCALAR_LENGTH + CHECKSUM_LENGTH;

/// Decoded WIF length for a key flagged as compressed: prefix || scalar || 0x01 || checksum.
pub const WIF_COMPRESSED_LENGTH: usize = WIF_UNCOMPRESSED_LENGTH + 1;

/// Trailing body byte marking a WIF as belonging to a compressed public key.
pub const WIF_COMPRESSION_FLAG: u8 = 0x01;

/// Prefix Electrum understands for importing a WIF as a native segwit key.
pub const P2WPKH_WIF_PREFIX: &str = "p2wpkh:";

/// Compact recoverable signature: header || r || s.
pub const COMPACT_SIGNATURE_LENGTH: usize = 65;

/// Lowest compact signature header (uncompressed key, recovery id 0).
pub const COMPACT_HEADER_MIN: u8 = 27;

/// Highest compact signature header (compressed key, recovery id 3).
pub const COMPACT_HEADER_MAX: u8 = 34;

/// Headers at or above this value flag a compressed public key.
pub const COMPACT_HEADER_COMPRESSED: u8 = 31;

/// Witness version used for P2WPKH outputs.
pub const SEGWIT_V0: u8 = 0;

// ---------------------------------------------------------------------------
// Chains
// ---------------------------------------------------------------------------

/// Network parameters for one Bitcoin-family chain.
///
/// Passed explicitly into every codec and address encoder that needs
/// chain-specific bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainParams {
    /// Display name, also used in log fields.
    pub name: &'static str,
    /// First byte of a decoded WIF private key.
    pub wif_prefix: u8,
    /// Version byte of P2PKH addresses.
    pub p2pkh_version: u8,
    /// Version bytes of P2SH addresses (first entry is the current one).
    pub p2sh_versions: &'static [u8],
    /// Bech32 human-readable part for segwit addresses, if the chain has segwit.
    pub bech32_hrp: Option<&'static str>,
    /// Magic prepended to text before hashing a signed message.
    pub message_magic: &'static str,
    /// Coin label in `-----BEGIN <LABEL> SIGNED MESSAGE-----` armor.
    pub armor_label: &'static str,
}

/// Bitcoin mainnet.
pub const BITCOIN: ChainParams = ChainParams {
    name: "Bitcoin",
    wif_prefix: 0x80,
    p2pkh_version: 0x00,
    p2sh_versions: &[0x05],
    bech32_hrp: Some("bc"),
    message_magic: "Bitcoin Signed Message:\n",
    armor_label: "BITCOIN",
};

/// Litecoin mainnet.
pub const LITECOIN: ChainParams = ChainParams {
    name: "Litecoin",
    wif_prefix: 0xb0,
    p2pkh_version: 0x30,
    p2sh_versions: &[0x32, 0x05],
    bech32_hrp: Some("ltc"),
    message_magic: "Litecoin Signed Message:\n",
    armor_label: "LITECOIN",
};

/// Dogecoin mainnet. No segwit.
pub const DOGECOIN: ChainParams = ChainParams {
    name: "Dogecoin",
    wif_prefix: 0x9e,
    p2pkh_version: 0x1e,
    p2sh_versions: &[0x16],
    bech32_hrp: None,
    message_magic: "Dogecoin Signed Message:\n",
    armor_label: "DOGECOIN",
};

/// A Bitcoin-family chain the engine can encode keys and addresses for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Bitcoin,
    Litecoin,
    Dogecoin,
}

impl Chain {
    /// All chains, in output order.
    pub const ALL: [Chain; 3] = [Chain::Bitcoin, Chain::Litecoin, Chain::Dogecoin];

    /// Parameters for this chain.
    pub fn params(self) -> &'static ChainParams {
        match self {
            Chain::Bitcoin => &BITCOIN,
            Chain::Litecoin => &LITECOIN,
            Chain::Dogecoin => &DOGECOIN,
        }
    }

    /// Look a chain up by its WIF prefix byte.
    pub fn from_wif_prefix(prefix: u8) -> Option<Chain> {
        Self::ALL
            .into_iter()
            .find(|chain| chain.params().wif_prefix == prefix)
    }

    /// Look a chain up by its signed-message armor label (case-insensitive).
    pub fn from_armor_label(label: &str) -> Option<Chain> {
        Self::ALL
            .into_iter()
            .find(|chain| chain.params().armor_label.eq_ignore_ascii_case(label))
    }

    /// WIF prefixes of every supported chain.
    pub fn all_wif_prefixes() -> [u8; 3] {
        Self::ALL.map(|chain| chain.params().wif_prefix)
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.params().name)
    }
}

impl FromStr for Chain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bitcoin" | "btc" => Ok(Chain::Bitcoin),
            "litecoin" | "ltc" => Ok(Chain::Litecoin),
            "dogecoin" | "doge" => Ok(Chain::Dogecoin),
            _ => Err(Error::UnknownChain(s.to_string())),
        }
    }
}
