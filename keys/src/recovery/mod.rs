//! # Signature Recovery
//!
//! Turns `(address, base64 signature, message)` into a recovered public key
//! and a verdict on whether that key owns the address.
//!
//! The recovery step sits behind [`KeyRecovery`] with two implementations
//! that must agree bit for bit:
//!
//! - [`ManualRecovery`] runs the textbook formula on [`crate::curve`].
//! - [`K256Recovery`] defers to `k256`'s audited implementation.
//!
//! Everything above that ([`verify_message`], [`verify_signed_block`]) is
//! generic over the engine.

pub mod armor;
pub mod direct;
pub mod manual;
pub mod message;
pub mod signature;
pub mod verify;

pub use armor::SignedMessageBlock;
pub use direct::K256Recovery;
pub use manual::{recover_point, ManualRecovery};
pub use message::{signed_message_digest, MessageDigest};
pub use signature::CompactSignature;
pub use verify::{evaluate_message, verify_message, verify_signed_block, VerifiedIdentity};

use crate::crypto::PublicKeyPoint;
use crate::error::Result;

/// Recovers the public key that produced a compact signature over a digest.
pub trait KeyRecovery {
    /// Short engine name for logs.
    fn name(&self) -> &'static str;

    fn recover(&self, digest: &MessageDigest, signature: &CompactSignature) -> Result<PublicKeyPoint>;
}
