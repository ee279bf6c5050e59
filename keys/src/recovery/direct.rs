//! Public key recovery through `k256`.

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;

use super::{CompactSignature, KeyRecovery, MessageDigest};
use crate::crypto::PublicKeyPoint;
use crate::error::{Error, Result};

/// Recovery via `VerifyingKey::recover_from_prehash`.
///
/// `k256` only accepts low-S signatures. A high-S input is normalised to
/// `n - s` first, which mirrors `R` and so flips the parity bit of the
/// recovery id. The key recovered is the same as [`super::ManualRecovery`]
/// finds for the original signature.
#[derive(Debug, Clone, Copy, Default)]
pub struct K256Recovery;

impl KeyRecovery for K256Recovery {
    fn name(&self) -> &'static str {
        "k256"
    }

    fn recover(&self, digest: &MessageDigest, signature: &CompactSignature) -> Result<PublicKeyPoint> {
        let mut sig = Signature::from_slice(&signature.rs_bytes())
            .map_err(|_| Error::InvalidSignature("r or s rejected by k256"))?;
        let mut recid = signature.recovery_id();
        if let Some(normalized) = sig.normalize_s() {
            sig = normalized;
            recid ^= 1;
        }
        let recovery_id =
            RecoveryId::from_byte(recid).ok_or(Error::InvalidRecoveryId(signature.header()))?;

        let key = VerifyingKey::recover_from_prehash(digest.as_bytes(), &sig, recovery_id)
            .map_err(|_| Error::InvalidSignature("no key recoverable from signature"))?;
        PublicKeyPoint::from_sec1(key.as_affine().to_encoded_point(false).as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LITECOIN;
    use crate::recovery::{signed_message_digest, ManualRecovery};

    #[test]
    fn agrees_with_manual_path() {
        let digest = signed_message_digest(&LITECOIN, b"Hello World");
        let sig = CompactSignature::from_base64(
            "H021r+HxbXZo2Vkuyq0D/pfz8kllqDzmOzczJXBanIytdsbZKPlg3q1NhytyLXp03DQa//0zoOjoJfVUjZORql8=",
        )
        .unwrap();
        let direct = K256Recovery.recover(&digest, &sig).unwrap();
        let manual = ManualRecovery.recover(&digest, &sig).unwrap();
        assert_eq!(direct, manual);
        assert_eq!(
            direct.to_hex(true),
            "03a2e8f5aa9c46242cdc6463adac2ef8e6bb8b17202c06d17c647066ed143535ac"
        );
    }

    #[test]
    fn high_s_is_normalised() {
        use crate::curve::{group_order, uint_to_be32};

        let digest = signed_message_digest(&LITECOIN, b"Hello World");
        let sig = CompactSignature::from_base64(
            "H021r+HxbXZo2Vkuyq0D/pfz8kllqDzmOzczJXBanIytdsbZKPlg3q1NhytyLXp03DQa//0zoOjoJfVUjZORql8=",
        )
        .unwrap();
        let expected = ManualRecovery.recover(&digest, &sig).unwrap();

        // Mirror s and flip the parity bit: same signer, opposite S half.
        let mirrored_s = group_order() - sig.s_uint();
        let mut bytes = sig.to_bytes();
        bytes[0] = ((bytes[0] - 27) ^ 1) + 27;
        bytes[33..].copy_from_slice(&uint_to_be32(&mirrored_s));
        let mirrored = CompactSignature::from_bytes(&bytes).unwrap();

        assert_eq!(K256Recovery.recover(&digest, &mirrored).unwrap(), expected);
        assert_eq!(ManualRecovery.recover(&digest, &mirrored).unwrap(), expected);
    }
}
