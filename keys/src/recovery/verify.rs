//! Checking that a signature belongs to a claimed address.

use serde::Serialize;
use tracing::{debug, warn};

use super::{armor, signed_message_digest, CompactSignature, KeyRecovery};
use crate::address::{infer_chain, p2pkh, p2wpkh};
use crate::config::Chain;
use crate::crypto::PublicKeyPoint;
use crate::error::{Error, Result};

/// The outcome of checking one signed message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifiedIdentity {
    address: String,
    signature: String,
    message: String,
    chain: Chain,
    is_valid: bool,
    public_key: PublicKeyPoint,
    compressed: bool,
}

impl VerifiedIdentity {
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn chain(&self) -> Chain {
        self.chain
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// The key recovered from the signature.
    pub fn public_key(&self) -> &PublicKeyPoint {
        &self.public_key
    }

    /// The compression flag carried in the signature header.
    pub fn compressed(&self) -> bool {
        self.compressed
    }
}

/// `true` if `pubkey` owns `address` on `chain` in the SEC1 form the
/// signature header commits to: P2PKH in that form, or P2WPKH when the
/// header says compressed. A header that disagrees with the address never
/// matches.
fn owns_address(pubkey: &PublicKeyPoint, address: &str, chain: Chain, header_compressed: bool) -> bool {
    let params = chain.params();
    if p2pkh(pubkey, header_compressed, params) == address {
        return true;
    }
    header_compressed
        && params.bech32_hrp.is_some()
        && p2wpkh(pubkey, params).is_ok_and(|a| a == address)
}

/// Recover the signer and compare it with `address`.
///
/// A structurally valid signature from a different key yields
/// `is_valid == false` rather than an error. `chain` defaults to the one
/// inferred from `address`.
pub fn evaluate_message<R: KeyRecovery>(
    recovery: &R,
    address: &str,
    signature: &str,
    message: &str,
    chain: Option<Chain>,
) -> Result<VerifiedIdentity> {
    let address = address.trim();
    let chain = match chain {
        Some(chain) => chain,
        None => infer_chain(address)?,
    };
    let sig = CompactSignature::from_base64(signature)?;
    let digest = signed_message_digest(chain.params(), message.as_bytes());
    debug!(%chain, engine = recovery.name(), header = sig.header(), "recovering signer");

    let public_key = recovery.recover(&digest, &sig)?;
    let is_valid = owns_address(&public_key, address, chain, sig.is_compressed());
    if !is_valid {
        warn!(%chain, address, "recovered key does not match address");
    }

    Ok(VerifiedIdentity {
        address: address.to_string(),
        signature: signature.trim().to_string(),
        message: message.to_string(),
        chain,
        is_valid,
        public_key,
        compressed: sig.is_compressed(),
    })
}

/// Like [`evaluate_message`], but a mismatch is an
/// [`Error::SignatureMismatch`].
pub fn verify_message<R: KeyRecovery>(
    recovery: &R,
    address: &str,
    signature: &str,
    message: &str,
    chain: Option<Chain>,
) -> Result<VerifiedIdentity> {
    let identity = evaluate_message(recovery, address, signature, message, chain)?;
    if !identity.is_valid {
        return Err(Error::SignatureMismatch {
            address: identity.address,
        });
    }
    Ok(identity)
}

/// Parse and verify an armored block.
///
/// If `claimed` is given it must equal the address inside the block.
pub fn verify_signed_block<R: KeyRecovery>(
    recovery: &R,
    text: &str,
    claimed: Option<&str>,
) -> Result<VerifiedIdentity> {
    let block = armor::parse(text)?;
    if let Some(claimed) = claimed.map(str::trim) {
        if claimed != block.address {
            return Err(Error::AddressMismatch {
                claimed: claimed.to_string(),
                signed: block.address,
            });
        }
    }
    verify_message(
        recovery,
        &block.address,
        &block.signature,
        &block.message,
        Some(block.chain),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recovery::{K256Recovery, ManualRecovery};

    const ADDRESS: &str = "133r6sCjLq6NbmSLjxuypDuSeocwenu1Qg";
    const SIGNATURE: &str =
        "Hz0pDxS09fEdjKrSJenLYsz05gakT6eW9GdzKDopnlwUL3bf3mQeJcS+takCIMuavK/NLOorXWXZCqV0KBMlwgU=";

    #[test]
    fn valid_signature_on_both_paths() {
        for identity in [
            verify_message(&ManualRecovery, ADDRESS, SIGNATURE, "Hello World", None).unwrap(),
            verify_message(&K256Recovery, ADDRESS, SIGNATURE, "Hello World", None).unwrap(),
        ] {
            assert!(identity.is_valid());
            assert_eq!(identity.chain(), Chain::Bitcoin);
            assert_eq!(
                identity.public_key().to_hex(true),
                "036afa3afc399f7f332866e37f475938589de0a3298a3aa062c8f4c74450e3d3b2"
            );
        }
    }

    #[test]
    fn tampered_message_fails() {
        let result = verify_message(
            &ManualRecovery,
            ADDRESS,
            SIGNATURE,
            "invalid invalid invalid invalid",
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn evaluate_reports_mismatch_without_error() {
        let identity = evaluate_message(
            &K256Recovery,
            "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH",
            SIGNATURE,
            "Hello World",
            Some(Chain::Bitcoin),
        )
        .unwrap();
        assert!(!identity.is_valid());
    }

    #[test]
    fn wrong_address_is_signature_mismatch() {
        let err = verify_message(
            &K256Recovery,
            "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH",
            SIGNATURE,
            "Hello World",
            None,
        )
        .unwrap_err();
        assert!(matches!(err, Error::SignatureMismatch { .. }));
    }

    #[test]
    fn segwit_address_accepted() {
        let identity = verify_message(
            &ManualRecovery,
            "bc1qzeapyvz7kl7v5vj865rahts2jjcdz0ssyc3wl8",
            SIGNATURE,
            "Hello World",
            None,
        )
        .unwrap();
        assert!(identity.is_valid());
    }

    #[test]
    fn header_compression_flag_is_binding() {
        // 31 -> 27: same key, but the header now claims the uncompressed form
        let mut bytes = CompactSignature::from_base64(SIGNATURE).unwrap().to_bytes();
        bytes[0] ^= 0x04;
        let flipped = CompactSignature::from_bytes(&bytes).unwrap().to_base64();

        let identity =
            evaluate_message(&ManualRecovery, ADDRESS, &flipped, "Hello World", None).unwrap();
        assert!(!identity.compressed());
        assert!(!identity.is_valid());
        assert!(matches!(
            verify_message(&K256Recovery, ADDRESS, &flipped, "Hello World", None),
            Err(Error::SignatureMismatch { .. })
        ));
    }

    #[test]
    fn segwit_address_needs_compressed_header() {
        let mut bytes = CompactSignature::from_base64(SIGNATURE).unwrap().to_bytes();
        bytes[0] -= 4;
        let flipped = CompactSignature::from_bytes(&bytes).unwrap().to_base64();
        let identity = evaluate_message(
            &ManualRecovery,
            "bc1qzeapyvz7kl7v5vj865rahts2jjcdz0ssyc3wl8",
            &flipped,
            "Hello World",
            None,
        )
        .unwrap();
        assert!(!identity.is_valid());
    }

    #[test]
    fn claimed_address_must_match_block() {
        let block = "-----BEGIN BITCOIN SIGNED MESSAGE-----\nNonce: 1675bf38ec241a2308585ad0  Serial: DDRRNOCZJRIFCIBAEBJDOJQY74\nVersion: 2.4.0 time=20190207.130255 git=master@e233940e coin=BTC\n-----BEGIN SIGNATURE-----\n1Mmg2eycKHomhjAikEAVehHpCSHTREhLfR\nG1pnvdb0RfKfv3Jhg4x0XBQqv1KQx3WFRaxTiUVN84fpIzxOBgapJb/Dpy6auJ28xcHaBxl3XHBbJejfokjgtmg=\n-----END BITCOIN SIGNED MESSAGE-----\n";
        let err = verify_signed_block(&ManualRecovery, block, Some(ADDRESS)).unwrap_err();
        assert!(matches!(err, Error::AddressMismatch { .. }));
        let ok = verify_signed_block(
            &ManualRecovery,
            block,
            Some("1Mmg2eycKHomhjAikEAVehHpCSHTREhLfR"),
        )
        .unwrap();
        assert!(ok.is_valid());
    }
}
