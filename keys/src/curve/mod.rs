//! # secp256k1 Arithmetic
//!
//! A small, explicit model of the curve `y^2 = x^3 + 7` over the prime field
//! `F_p`, built on `num-bigint`:
//!
//! - [`field`] — [`FieldElement`] plus the free-standing `mod_inverse` and
//!   `sqrt_mod` helpers.
//! - [`point`] — affine [`Point`] with addition, doubling and double-and-add
//!   scalar multiplication.
//! - [`encoding`] — SEC1 compression and decompression of public keys.
//!
//! This is the code path the manual signature recovery runs on. It is
//! written for clarity and testability. It is **not constant-time**, and
//! timing side channels are out of scope: it only ever handles public data
//! (public keys, signatures, message digests) and the scalar × G step for a
//! key the caller already holds in plain text.

pub mod encoding;
pub mod field;
pub mod point;

use num_bigint::BigUint;
use std::sync::OnceLock;

use crate::config::{
    SECP256K1_B, SECP256K1_GX_HEX, SECP256K1_GY_HEX, SECP256K1_N_HEX, SECP256K1_P_HEX,
};

pub use encoding::{compress, decompress};
pub use field::{mod_inverse, sqrt_mod, FieldElement};
pub use point::{point_add, scalar_multiply, Point};

/// Parsed domain parameters, built once on first use.
#[derive(Debug)]
pub struct CurveParams {
    /// Field prime.
    pub p: BigUint,
    /// Group order.
    pub n: BigUint,
    /// Curve constant `b`.
    pub b: BigUint,
    /// Generator x coordinate.
    pub gx: BigUint,
    /// Generator y coordinate.
    pub gy: BigUint,
}

/// The secp256k1 domain parameters.
pub fn params() -> &'static CurveParams {
    static PARAMS: OnceLock<CurveParams> = OnceLock::new();
    PARAMS.get_or_init(|| CurveParams {
        p: parse_hex_constant(SECP256K1_P_HEX),
        n: parse_hex_constant(SECP256K1_N_HEX),
        b: BigUint::from(SECP256K1_B),
        gx: parse_hex_constant(SECP256K1_GX_HEX),
        gy: parse_hex_constant(SECP256K1_GY_HEX),
    })
}

/// The field prime `p`.
pub fn field_prime() -> &'static BigUint {
    &params().p
}

/// The group order `n`.
pub fn group_order() -> &'static BigUint {
    &params().n
}

fn parse_hex_constant(hex_str: &str) -> BigUint {
    BigUint::parse_bytes(hex_str.as_bytes(), 16).expect("curve constant is valid hex")
}

/// Interpret up to 32 big-endian bytes as an unsigned integer.
pub fn uint_from_be(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Serialize an integer below 2^256 as exactly 32 big-endian bytes.
///
/// Values wider than 32 bytes keep their low-order 32 bytes; callers only
/// pass reduced field elements and scalars.
pub fn uint_to_be32(value: &BigUint) -> [u8; 32] {
    let bytes = value.to_bytes_be();
    let mut out = [0u8; 32];
    if bytes.len() >= 32 {
        out.copy_from_slice(&bytes[bytes.len() - 32..]);
    } else {
        out[32 - bytes.len()..].copy_from_slice(&bytes);
    }
    out
}

/// `true` if `value` is a valid non-zero scalar, i.e. in `[1, n-1]`.
pub fn is_valid_scalar(value: &BigUint) -> bool {
    !num_traits::Zero::is_zero(value) && value < group_order()
}
