//! Public key recovery written out over [`crate::curve`].
//!
//! Given `(r, s)`, the recovery id and digest `e`:
//!
//! 1. `x = r + (recid / 2) · n`, rejected if `x >= p`;
//! 2. `R = (x, y)` with `y` of parity `recid & 1`;
//! 3. `Q = r⁻¹ · (s·R − e·G)`.

use num_bigint::BigUint;

use super::{CompactSignature, KeyRecovery, MessageDigest};
use crate::curve::{self, mod_inverse, FieldElement, Point};
use crate::crypto::PublicKeyPoint;
use crate::error::{Error, Result};

/// Recovery on the hand-written curve arithmetic.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualRecovery;

impl KeyRecovery for ManualRecovery {
    fn name(&self) -> &'static str {
        "manual"
    }

    fn recover(&self, digest: &MessageDigest, signature: &CompactSignature) -> Result<PublicKeyPoint> {
        PublicKeyPoint::from_point(&recover_point(digest, signature)?)
    }
}

/// Recover the signer's point, or fail if the signature admits none.
pub fn recover_point(digest: &MessageDigest, signature: &CompactSignature) -> Result<Point> {
    let n = curve::group_order();
    let p = curve::field_prime();
    let recid = signature.recovery_id();
    let r = signature.r_uint();
    let s = signature.s_uint();

    let x = &r + BigUint::from(recid >> 1) * n;
    if &x >= p {
        return Err(Error::InvalidSignature("r + n exceeds the field prime"));
    }
    let big_r = Point::lift_x(&FieldElement::new(x), recid & 1 == 1)?;

    let e = curve::uint_from_be(digest.as_bytes()) % n;
    let neg_e = (n - e) % n;
    let r_inv = mod_inverse(&r, n).ok_or(Error::InvalidSignature("r has no inverse"))?;

    let sum = big_r.multiply(&s).add(&Point::generator().multiply(&neg_e));
    let q = sum.multiply(&r_inv);
    if q.is_infinity() {
        return Err(Error::InvalidSignature("recovered point at infinity"));
    }
    Ok(q)
}
