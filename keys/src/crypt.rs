//! # ECIES on secp256k1
//!
//! Encrypts data to the public key behind a signed message, so only the
//! holder of the matching WIF can read it. The wire format is the one
//! Opendime tooling has always produced:
//!
//! | bytes | field                                    |
//! |-------|------------------------------------------|
//! | 65    | ephemeral public key, SEC1 uncompressed  |
//! | 16    | AES-GCM nonce                            |
//! | 16    | AES-GCM tag                              |
//! | rest  | ciphertext                               |
//!
//! The AES-256 key is `SHA256(compressed(ephemeral_secret * recipient))`.

use aes_gcm::aead::consts::U16;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::aes::Aes256;
use aes_gcm::{AesGcm, Nonce, Tag};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{AffinePoint, PublicKey, SecretKey};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::debug;

use crate::config::UNCOMPRESSED_PUBKEY_LENGTH;
use crate::crypto::{sha256, PrivateKeyScalar, PublicKeyPoint};
use crate::error::{Error, Result};

/// AES-256-GCM with the 16-byte nonce this format carries.
type Aes256Gcm16 = AesGcm<Aes256, U16>;

pub const NONCE_LENGTH: usize = 16;
pub const TAG_LENGTH: usize = 16;
/// Ciphertext overhead: ephemeral key, nonce and tag.
pub const HEADER_LENGTH: usize = UNCOMPRESSED_PUBKEY_LENGTH + NONCE_LENGTH + TAG_LENGTH;

/// ECDH on secp256k1, hashed into an AES key.
fn shared_key(secret: &PrivateKeyScalar, public: &PublicKeyPoint) -> Result<[u8; 32]> {
    let public =
        PublicKey::from_sec1_bytes(&public.uncompressed()).map_err(|_| Error::PointNotOnCurve)?;
    let secret = SecretKey::from_slice(secret.as_bytes()).map_err(|_| Error::InvalidScalar)?;
    let shared = AffinePoint::from(public.to_projective() * *secret.to_nonzero_scalar());
    Ok(sha256(shared.to_encoded_point(true).as_bytes()))
}

fn cipher(key: &[u8; 32]) -> Aes256Gcm16 {
    // a 32-byte slice is always a valid AES-256 key
    Aes256Gcm16::new(key.into())
}

/// Encrypt `plaintext` to `recipient` with a fresh ephemeral key.
///
/// ```
/// use opendime_keys::crypt::{decrypt, encrypt};
/// use opendime_keys::PrivateKeyScalar;
///
/// let secret = PrivateKeyScalar::from_hex(
///     "17bc6f773fe98bb1a72adf6e3e89366b7e19ee76d88a023b248fceebfedf1e5d",
/// ).unwrap();
/// let sealed = encrypt(&secret.public_key(), b"for your eyes").unwrap();
/// assert_eq!(decrypt(&secret, &sealed).unwrap(), b"for your eyes");
/// ```
pub fn encrypt(recipient: &PublicKeyPoint, plaintext: &[u8]) -> Result<Vec<u8>> {
    encrypt_with_rng(recipient, plaintext, &mut OsRng)
}

/// [`encrypt`] with a caller-supplied RNG for the ephemeral key and nonce.
pub fn encrypt_with_rng<R: RngCore + CryptoRng>(
    recipient: &PublicKeyPoint,
    plaintext: &[u8],
    rng: &mut R,
) -> Result<Vec<u8>> {
    let ephemeral = SecretKey::random(rng);
    let ephemeral_secret = PrivateKeyScalar::from_bytes(&ephemeral.to_bytes())?;
    let key = shared_key(&ephemeral_secret, recipient)?;

    let mut nonce = [0u8; NONCE_LENGTH];
    rng.fill_bytes(&mut nonce);

    let mut body = plaintext.to_vec();
    // GCM only refuses inputs past its 64 GiB limit
    let tag = cipher(&key)
        .encrypt_in_place_detached(Nonce::<U16>::from_slice(&nonce), b"", &mut body)
        .map_err(|_| Error::DecryptionFailed)?;

    let mut out = Vec::with_capacity(HEADER_LENGTH + body.len());
    out.extend_from_slice(&ephemeral_secret.public_key().uncompressed());
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&tag);
    out.extend_from_slice(&body);
    debug!(bytes = plaintext.len(), "encrypted payload");
    Ok(out)
}

/// Decrypt data produced by [`encrypt`] for the public key of `secret`.
pub fn decrypt(secret: &PrivateKeyScalar, data: &[u8]) -> Result<Vec<u8>> {
    if data.len() < HEADER_LENGTH {
        return Err(Error::CiphertextTooShort {
            min: HEADER_LENGTH,
            got: data.len(),
        });
    }
    let (ephemeral, rest) = data.split_at(UNCOMPRESSED_PUBKEY_LENGTH);
    let (nonce, rest) = rest.split_at(NONCE_LENGTH);
    let (tag, body) = rest.split_at(TAG_LENGTH);

    let ephemeral = PublicKeyPoint::from_sec1(ephemeral)?;
    let key = shared_key(secret, &ephemeral)?;

    let mut plaintext = body.to_vec();
    cipher(&key)
        .decrypt_in_place_detached(
            Nonce::<U16>::from_slice(nonce),
            b"",
            &mut plaintext,
            Tag::from_slice(tag),
        )
        .map_err(|_| Error::DecryptionFailed)?;
    debug!(bytes = plaintext.len(), "decrypted payload");
    Ok(plaintext)
}
