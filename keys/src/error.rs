//! Error types for the conversion engine.
//!
//! Every fallible operation returns an [`Error`]. Each variant belongs to
//! exactly one pipeline [`Stage`], and its message is prefixed with that
//! stage so a failure printed by the CLI always says where it came from.
//! None of these are transient: inputs are deterministic, so nothing is
//! retried.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// The pipeline stage that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Base58, Bech32, base64 and WIF decoding.
    Codec,
    /// Field and point arithmetic on secp256k1.
    Curve,
    /// Compact signature parsing, key recovery and address matching.
    Recovery,
    /// Address encoding and chain selection.
    Encoding,
    /// ECIES encryption to a recovered key and decryption with a WIF.
    Crypt,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Codec => "codec",
            Stage::Curve => "curve",
            Stage::Recovery => "recovery",
            Stage::Encoding => "encoding",
            Stage::Crypt => "crypt",
        })
    }
}

/// Errors produced while decoding keys, recovering signers or encoding addresses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Input text is not valid in the named encoding (bad alphabet, bad padding, empty).
    #[error("codec: malformed {encoding} input: {reason}")]
    MalformedEncoding {
        /// Which encoding rejected the input (`base58`, `bech32`, `base64`, `hex`).
        encoding: &'static str,
        /// Decoder-specific detail.
        reason: String,
    },

    /// The embedded double-SHA256 checksum does not match the body.
    #[error("codec: checksum mismatch: expected {expected}, found {found}")]
    ChecksumMismatch {
        /// Checksum computed over the body (hex).
        expected: String,
        /// Checksum carried by the input (hex).
        found: String,
    },

    /// The leading version/prefix byte is not one the caller accepts.
    #[error("codec: unsupported prefix byte 0x{0:02x}")]
    UnsupportedPrefix(u8),

    /// A decoded payload has the wrong number of bytes.
    #[error("codec: invalid length: expected {expected}, got {got} bytes")]
    InvalidLength {
        /// Human-readable accepted length(s).
        expected: &'static str,
        /// Actual byte count.
        got: usize,
    },

    /// A 38-byte WIF whose flag byte is not 0x01.
    #[error("codec: compression flag must be 0x01, found 0x{0:02x}")]
    InvalidCompressionFlag(u8),

    /// A secret scalar that is zero or not below the group order.
    #[error("codec: secret scalar must be in [1, n-1]")]
    InvalidScalar,

    /// A segwit v0 key-hash program that is not 20 bytes.
    #[error("encoding: witness program must be 20 bytes, got {0}")]
    InvalidWitnessProgram(usize),

    /// Coordinates (or an x with no square root) that do not lie on secp256k1.
    #[error("curve: point is not on secp256k1")]
    PointNotOnCurve,

    /// A compact signature that is not exactly 65 bytes after base64 decoding.
    #[error("recovery: compact signature must be 65 bytes, got {0}")]
    InvalidSignatureLength(usize),

    /// A compact signature header byte outside 27..=34.
    #[error("recovery: signature header {0} outside 27..=34")]
    InvalidRecoveryId(u8),

    /// Structurally sound signature that cannot yield a public key.
    #[error("recovery: invalid signature: {0}")]
    InvalidSignature(&'static str),

    /// The recovered key does not hash to the claimed address.
    #[error("recovery: signature was not produced by the key behind {address}")]
    SignatureMismatch {
        /// The address the caller claimed signed the message.
        address: String,
    },

    /// The address inside a signed-message block differs from the one the caller expected.
    #[error("recovery: message signed by {signed}, expected {claimed}")]
    AddressMismatch {
        /// Address supplied by the caller.
        claimed: String,
        /// Address carried by the signed-message block.
        signed: String,
    },

    /// A signed-message block that does not follow the armor layout.
    #[error("recovery: malformed signed-message block: {0}")]
    MalformedArmor(&'static str),

    /// The chain for an address (or a chain name) could not be determined.
    #[error("encoding: unknown chain for {0}")]
    UnknownChain(String),

    /// Input shorter than the ephemeral key, nonce and tag it must carry.
    #[error("crypt: ciphertext must be at least {min} bytes, got {got}")]
    CiphertextTooShort {
        /// Smallest acceptable length.
        min: usize,
        /// Actual byte count.
        got: usize,
    },

    /// AES-GCM authentication failed: wrong key or altered ciphertext.
    #[error("crypt: decryption failed")]
    DecryptionFailed,
}

impl Error {
    /// The stage this error belongs to.
    pub fn stage(&self) -> Stage {
        match self {
            Error::MalformedEncoding { .. }
            | Error::ChecksumMismatch { .. }
            | Error::UnsupportedPrefix(_)
            | Error::InvalidLength { .. }
            | Error::InvalidCompressionFlag(_)
            | Error::InvalidScalar => Stage::Codec,
            Error::PointNotOnCurve => Stage::Curve,
            Error::InvalidSignatureLength(_)
            | Error::InvalidRecoveryId(_)
            | Error::InvalidSignature(_)
            | Error::SignatureMismatch { .. }
            | Error::AddressMismatch { .. }
            | Error::MalformedArmor(_) => Stage::Recovery,
            Error::InvalidWitnessProgram(_) | Error::UnknownChain(_) => Stage::Encoding,
            Error::CiphertextTooShort { .. } | Error::DecryptionFailed => Stage::Crypt,
        }
    }

    pub(crate) fn malformed(encoding: &'static str, reason: impl fmt::Display) -> Self {
        Error::MalformedEncoding {
            encoding,
            reason: reason.to_string(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
