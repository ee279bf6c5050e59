// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Opendime Keys — Conversion Engine
//!
//! Turns one secp256k1 key, or a signed-message proof of one, into every
//! address a Bitcoin, Litecoin, Dogecoin or Ethereum wallet would show for
//! it.
//!
//! ## Architecture
//!
//! Modules, leaves first:
//!
//! - **config** — curve constants, byte lengths and per-chain parameters.
//! - **error** — the single error type, tagged by pipeline stage.
//! - **crypto** — SHA-256, HASH160, Keccak-256 and the key types.
//! - **curve** — field and point arithmetic on secp256k1.
//! - **codec** — Base58Check, Bech32 and WIF.
//! - **recovery** — compact signature parsing and public key recovery.
//! - **address** — P2PKH, P2WPKH and EIP-55 encoding, chain inference.
//! - **convert** — the top-level reports the CLI prints.
//! - **crypt** — ECIES encryption to a recovered key, decryption with a WIF.
//!
//! Every function is pure. Chain parameters are passed in explicitly; there
//! is no global network state to configure.
//!
//! ## Example
//!
//! ```
//! use opendime_keys::convert::convert_private_key;
//!
//! let report = convert_private_key(
//!     "Kx1rJ3afrZvj7jztGupxrtrFoA9SK37CA3ZnwtWDTRt7MQdyvozL",
//! ).unwrap();
//! assert!(report.wifs.btc_uncompressed.starts_with('5'));
//! ```

pub mod address;
pub mod codec;
pub mod config;
pub mod convert;
pub mod crypt;
pub mod crypto;
pub mod curve;
pub mod error;
pub mod recovery;

pub use address::{infer_chain, AddressSet};
pub use codec::WifKey;
pub use config::{Chain, ChainParams};
pub use convert::{
    convert_private_key, convert_signed_block, convert_signed_message, decode_private_key,
    KeyConversion, SignatureConversion, WifSet,
};
pub use crypto::{PrivateKeyScalar, PublicKeyPoint};
pub use error::{Error, Result, Stage};
pub use recovery::{
    verify_message, verify_signed_block, CompactSignature, K256Recovery, KeyRecovery,
    ManualRecovery, VerifiedIdentity,
};
