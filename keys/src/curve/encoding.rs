//! SEC1 public key encodings.
//!
//! Both directions are idempotent: compressing an already-compressed key, or
//! decompressing an already-uncompressed one, returns the input unchanged.

use super::field::FieldElement;
use super::point::Point;
use crate::config::{
    COMPRESSED_EVEN_TAG, COMPRESSED_ODD_TAG, COMPRESSED_PUBKEY_LENGTH, SCALAR_LENGTH,
    UNCOMPRESSED_PUBKEY_LENGTH, UNCOMPRESSED_TAG,
};
use crate::error::{Error, Result};

/// Convert a 33- or 65-byte SEC1 key to its 33-byte compressed form.
///
/// The tag is chosen from the parity of `y`. This is a format conversion and
/// does not check the curve equation.
pub fn compress(key: &[u8]) -> Result<[u8; COMPRESSED_PUBKEY_LENGTH]> {
    let mut out = [0u8; COMPRESSED_PUBKEY_LENGTH];
    match key.len() {
        COMPRESSED_PUBKEY_LENGTH => {
            if key[0] != COMPRESSED_EVEN_TAG && key[0] != COMPRESSED_ODD_TAG {
                return Err(Error::malformed("sec1", format!("bad compressed tag 0x{:02x}", key[0])));
            }
            out.copy_from_slice(key);
        }
        UNCOMPRESSED_PUBKEY_LENGTH => {
            if key[0] != UNCOMPRESSED_TAG {
                return Err(Error::malformed("sec1", format!("bad uncompressed tag 0x{:02x}", key[0])));
            }
            let y_last = key[UNCOMPRESSED_PUBKEY_LENGTH - 1];
            out[0] = if y_last & 1 == 1 {
                COMPRESSED_ODD_TAG
            } else {
                COMPRESSED_EVEN_TAG
            };
            out[1..].copy_from_slice(&key[1..1 + SCALAR_LENGTH]);
        }
        got => {
            return Err(Error::InvalidLength {
                expected: "33 or 65 bytes",
                got,
            })
        }
    }
    Ok(out)
}

/// Convert a 33- or 65-byte SEC1 key to its 65-byte uncompressed form.
///
/// A compressed key whose `x` has no square root on the curve fails with
/// [`Error::PointNotOnCurve`].
pub fn decompress(key: &[u8]) -> Result<[u8; UNCOMPRESSED_PUBKEY_LENGTH]> {
    let mut out = [0u8; UNCOMPRESSED_PUBKEY_LENGTH];
    match key.len() {
        UNCOMPRESSED_PUBKEY_LENGTH => {
            if key[0] != UNCOMPRESSED_TAG {
                return Err(Error::malformed("sec1", format!("bad uncompressed tag 0x{:02x}", key[0])));
            }
            out.copy_from_slice(key);
        }
        COMPRESSED_PUBKEY_LENGTH => {
            let odd = match key[0] {
                COMPRESSED_EVEN_TAG => false,
                COMPRESSED_ODD_TAG => true,
                tag => return Err(Error::malformed("sec1", format!("bad compressed tag 0x{tag:02x}"))),
            };
            let x = FieldElement::from_canonical_bytes(&key[1..])
                .ok_or(Error::PointNotOnCurve)?;
            let point = Point::lift_x(&x, odd)?;
            let (px, py) = point.coordinates().ok_or(Error::PointNotOnCurve)?;
            out[0] = UNCOMPRESSED_TAG;
            out[1..1 + SCALAR_LENGTH].copy_from_slice(&px.to_bytes_be());
            out[1 + SCALAR_LENGTH..].copy_from_slice(&py.to_bytes_be());
        }
        got => {
            return Err(Error::InvalidLength {
                expected: "33 or 65 bytes",
                got,
            })
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNCOMPRESSED: &str = "0471bb3ef523055565dd5f9864047b9fe93efa10151ff4bb3640f7de6dfdd76cea9d5cb2da17d725a835f25971818e54acc1db69e4866ea23c9dc33f57cb286315";
    const COMPRESSED: &str = "0371bb3ef523055565dd5f9864047b9fe93efa10151ff4bb3640f7de6dfdd76cea";

    #[test]
    fn compress_known_key() {
        let key = hex::decode(UNCOMPRESSED).unwrap();
        assert_eq!(hex::encode(compress(&key).unwrap()), COMPRESSED);
    }

    #[test]
    fn decompress_known_key() {
        let key = hex::decode(COMPRESSED).unwrap();
        assert_eq!(hex::encode(decompress(&key).unwrap()), UNCOMPRESSED);
    }

    #[test]
    fn conversions_are_idempotent() {
        let full = hex::decode(UNCOMPRESSED).unwrap();
        let short = hex::decode(COMPRESSED).unwrap();
        assert_eq!(decompress(&full).unwrap().to_vec(), full);
        assert_eq!(compress(&short).unwrap().to_vec(), short);
        let twice = compress(&compress(&full).unwrap()).unwrap();
        assert_eq!(twice.to_vec(), short);
    }

    #[test]
    fn even_y_gets_02_tag() {
        let key = hex::decode(
            "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8",
        )
        .unwrap();
        let compressed = compress(&key).unwrap();
        assert_eq!(compressed[0], COMPRESSED_EVEN_TAG);
        assert_eq!(decompress(&compressed).unwrap().to_vec(), key);
    }

    #[test]
    fn wrong_length_rejected() {
        assert!(matches!(
            compress(&[0x02; 20]),
            Err(Error::InvalidLength { got: 20, .. })
        ));
        assert!(matches!(
            decompress(&[]),
            Err(Error::InvalidLength { got: 0, .. })
        ));
    }

    #[test]
    fn bad_tag_rejected() {
        let mut key = hex::decode(COMPRESSED).unwrap();
        key[0] = 0x05;
        assert!(matches!(decompress(&key), Err(Error::MalformedEncoding { .. })));
        assert!(matches!(compress(&key), Err(Error::MalformedEncoding { .. })));
    }

    #[test]
    fn x_without_root_rejected() {
        // Scan small x values for one that is not on the curve.
        let off_curve = (1u8..=60)
            .map(|x| {
                let mut key = [0u8; COMPRESSED_PUBKEY_LENGTH];
                key[0] = COMPRESSED_EVEN_TAG;
                key[COMPRESSED_PUBKEY_LENGTH - 1] = x;
                key
            })
            .find(|key| decompress(key).is_err())
            .expect("some small x is off the curve");
        assert_eq!(decompress(&off_curve).unwrap_err(), Error::PointNotOnCurve);
    }
}
