//! # Key Types
//!
//! The two halves of a secp256k1 identity as this crate handles them:
//!
//! - [`PrivateKeyScalar`]: a secret in `[1, n-1]`, held as 32 big-endian
//!   bytes. It is only ever created from a decoded WIF or hex string and is
//!   never logged.
//! - [`PublicKeyPoint`]: a validated affine point, able to emit both SEC1
//!   forms. Which form an address uses is the caller's decision, so the
//!   point itself carries no compression flag.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::config::{
    COMPRESSED_PUBKEY_LENGTH, SCALAR_LENGTH, UNCOMPRESSED_PUBKEY_LENGTH, UNCOMPRESSED_TAG,
};
use crate::curve::{self, FieldElement, Point};
use crate::error::{Error, Result};

/// A secp256k1 secret scalar, guaranteed to lie in `[1, n-1]`.
///
/// Deliberately not `Serialize`: exporting a secret goes through
/// [`crate::codec::wif`] or [`PrivateKeyScalar::to_ethereum_hex`].
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKeyScalar {
    bytes: [u8; SCALAR_LENGTH],
}

impl PrivateKeyScalar {
    /// Accept 32 big-endian bytes if they encode a valid non-zero scalar.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SCALAR_LENGTH {
            return Err(Error::InvalidLength {
                expected: "32 bytes",
                got: bytes.len(),
            });
        }
        if !curve::is_valid_scalar(&curve::uint_from_be(bytes)) {
            return Err(Error::InvalidScalar);
        }
        let mut out = [0u8; SCALAR_LENGTH];
        out.copy_from_slice(bytes);
        Ok(Self { bytes: out })
    }

    /// Parse 64 hex characters.
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let bytes = hex::decode(hex_str).map_err(|e| Error::malformed("hex", e))?;
        Self::from_bytes(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SCALAR_LENGTH] {
        &self.bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// The secret as an Ethereum wallet expects it: `0x` + 64 lowercase hex.
    pub fn to_ethereum_hex(&self) -> String {
        format!("0x{}", self.to_hex())
    }

    /// `secret · G`.
    pub fn public_key(&self) -> PublicKeyPoint {
        let k = curve::uint_from_be(&self.bytes);
        let point = Point::generator().multiply(&k);
        // k is in [1, n-1], so k·G is never infinity.
        match point.coordinates() {
            Some((x, y)) => PublicKeyPoint {
                x: x.to_bytes_be(),
                y: y.to_bytes_be(),
            },
            None => unreachable!("non-zero scalar below the group order"),
        }
    }
}

impl fmt::Debug for PrivateKeyScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print secret material, not even a prefix.
        f.write_str("PrivateKeyScalar(<redacted>)")
    }
}

// ---------------------------------------------------------------------------
// PublicKeyPoint
// ---------------------------------------------------------------------------

/// A finite secp256k1 point known to satisfy the curve equation.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PublicKeyPoint {
    x: [u8; SCALAR_LENGTH],
    y: [u8; SCALAR_LENGTH],
}

impl PublicKeyPoint {
    /// Parse a 33- or 65-byte SEC1 encoding, validating it is on the curve.
    pub fn from_sec1(bytes: &[u8]) -> Result<Self> {
        let full = curve::decompress(bytes)?;
        let x = FieldElement::from_canonical_bytes(&full[1..1 + SCALAR_LENGTH])
            .ok_or(Error::PointNotOnCurve)?;
        let y = FieldElement::from_canonical_bytes(&full[1 + SCALAR_LENGTH..])
            .ok_or(Error::PointNotOnCurve)?;
        Self::from_point(&Point::from_affine(x, y)?)
    }

    /// Parse hex-encoded SEC1 bytes.
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let bytes = hex::decode(hex_str).map_err(|e| Error::malformed("hex", e))?;
        Self::from_sec1(&bytes)
    }

    /// Wrap a curve point. Infinity has no public key encoding.
    pub fn from_point(point: &Point) -> Result<Self> {
        let (x, y) = point.coordinates().ok_or(Error::PointNotOnCurve)?;
        Ok(Self {
            x: x.to_bytes_be(),
            y: y.to_bytes_be(),
        })
    }

    pub fn to_point(&self) -> Point {
        Point::Affine {
            x: FieldElement::from_bytes_be(&self.x),
            y: FieldElement::from_bytes_be(&self.y),
        }
    }

    pub fn x(&self) -> &[u8; SCALAR_LENGTH] {
        &self.x
    }

    pub fn y(&self) -> &[u8; SCALAR_LENGTH] {
        &self.y
    }

    /// `0x04 || x || y`.
    pub fn uncompressed(&self) -> [u8; UNCOMPRESSED_PUBKEY_LENGTH] {
        let mut out = [0u8; UNCOMPRESSED_PUBKEY_LENGTH];
        out[0] = UNCOMPRESSED_TAG;
        out[1..1 + SCALAR_LENGTH].copy_from_slice(&self.x);
        out[1 + SCALAR_LENGTH..].copy_from_slice(&self.y);
        out
    }

    /// `0x02|0x03 || x`, tag chosen by the parity of `y`.
    pub fn compressed(&self) -> [u8; COMPRESSED_PUBKEY_LENGTH] {
        let mut out = [0u8; COMPRESSED_PUBKEY_LENGTH];
        out[0] = 0x02 | (self.y[SCALAR_LENGTH - 1] & 1);
        out[1..].copy_from_slice(&self.x);
        out
    }

    /// SEC1 bytes in the requested form.
    pub fn to_sec1(&self, compressed: bool) -> Vec<u8> {
        if compressed {
            self.compressed().to_vec()
        } else {
            self.uncompressed().to_vec()
        }
    }

    /// Hex of the SEC1 encoding in the requested form.
    pub fn to_hex(&self, compressed: bool) -> String {
        hex::encode(self.to_sec1(compressed))
    }
}

impl fmt::Display for PublicKeyPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex(true))
    }
}

impl fmt::Debug for PublicKeyPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKeyPoint({})", &self.to_hex(true)[..18])
    }
}

impl Serialize for PublicKeyPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k256::elliptic_curve::sec1::ToEncodedPoint;

    fn scalar_one() -> PrivateKeyScalar {
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        PrivateKeyScalar::from_bytes(&bytes).unwrap()
    }

    #[test]
    fn scalar_one_gives_generator() {
        let pk = scalar_one().public_key();
        assert_eq!(
            pk.to_hex(true),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
        assert_eq!(PublicKeyPoint::from_point(&Point::generator()).unwrap(), pk);
    }

    #[test]
    fn zero_and_order_rejected() {
        assert_eq!(
            PrivateKeyScalar::from_bytes(&[0u8; 32]).unwrap_err(),
            Error::InvalidScalar
        );
        let n = curve::uint_to_be32(curve::group_order());
        assert_eq!(
            PrivateKeyScalar::from_bytes(&n).unwrap_err(),
            Error::InvalidScalar
        );
        assert!(matches!(
            PrivateKeyScalar::from_bytes(&[1u8; 31]),
            Err(Error::InvalidLength { got: 31, .. })
        ));
    }

    #[test]
    fn public_key_matches_k256() {
        let secret =
            hex::decode("dc192045a9261a395445d220890d0969fd7dd2bacec12b9ab3c9827cb0df7bf3")
                .unwrap();
        let ours = PrivateKeyScalar::from_bytes(&secret).unwrap().public_key();
        let theirs = k256::SecretKey::from_slice(&secret)
            .unwrap()
            .public_key()
            .to_encoded_point(false);
        assert_eq!(ours.uncompressed().as_slice(), theirs.as_bytes());
    }

    #[test]
    fn sec1_parse_both_forms() {
        let uncompressed = "0471bb3ef523055565dd5f9864047b9fe93efa10151ff4bb3640f7de6dfdd76cea9d5cb2da17d725a835f25971818e54acc1db69e4866ea23c9dc33f57cb286315";
        let compressed = "0371bb3ef523055565dd5f9864047b9fe93efa10151ff4bb3640f7de6dfdd76cea";
        let a = PublicKeyPoint::from_hex(uncompressed).unwrap();
        let b = PublicKeyPoint::from_hex(compressed).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_hex(false), uncompressed);
        assert_eq!(a.to_hex(true), compressed);
    }

    #[test]
    fn sec1_off_curve_rejected() {
        let mut bytes = scalar_one().public_key().uncompressed();
        bytes[64] ^= 1;
        assert_eq!(
            PublicKeyPoint::from_sec1(&bytes).unwrap_err(),
            Error::PointNotOnCurve
        );
    }

    #[test]
    fn ethereum_secret_format() {
        let key = scalar_one();
        let hex = key.to_ethereum_hex();
        assert!(hex.starts_with("0x"));
        assert_eq!(hex.len(), 66);
    }

    #[test]
    fn debug_output_is_redacted() {
        let rendered = format!("{:?}", scalar_one());
        assert!(!rendered.contains("0001"));
        assert!(rendered.contains("redacted"));
    }
}
