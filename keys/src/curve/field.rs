//! Prime-field arithmetic modulo the secp256k1 prime.

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};
use std::fmt;

use super::field_prime;

/// Modular inverse of `a` modulo `n` via the extended Euclidean algorithm.
///
/// Returns `None` when `gcd(a, n) != 1` (including `a ≡ 0`) or `n` is zero.
pub fn mod_inverse(a: &BigUint, n: &BigUint) -> Option<BigUint> {
    if n.is_zero() {
        return None;
    }
    let modulus = BigInt::from(n.clone());
    let (mut old_r, mut r) = (BigInt::from(a % n), modulus.clone());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());

    while !r.is_zero() {
        let quotient = &old_r / &r;
        let next_r = &old_r - &quotient * &r;
        old_r = std::mem::replace(&mut r, next_r);
        let next_s = &old_s - &quotient * &s;
        old_s = std::mem::replace(&mut s, next_s);
    }

    if !old_r.is_one() {
        return None;
    }
    (((old_s % &modulus) + &modulus) % &modulus).to_biguint()
}

/// Square root of `v` modulo a prime `p ≡ 3 (mod 4)`.
///
/// Computes `v^((p+1)/4) mod p` and returns it only if it squares back to
/// `v`. The other root is `p - root`. Returns `None` for non-residues or a
/// modulus that is not `3 mod 4`.
pub fn sqrt_mod(v: &BigUint, p: &BigUint) -> Option<BigUint> {
    if p % 4u8 != BigUint::from(3u8) {
        return None;
    }
    let v = v % p;
    let exponent = (p + 1u8) >> 2u32;
    let root = v.modpow(&exponent, p);
    if (&root * &root) % p == v {
        Some(root)
    } else {
        None
    }
}

/// An element of `F_p`, always kept reduced into `[0, p)`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FieldElement {
    value: BigUint,
}

impl FieldElement {
    /// Reduce an arbitrary integer into the field.
    pub fn new(value: BigUint) -> Self {
        Self {
            value: value % field_prime(),
        }
    }

    pub fn zero() -> Self {
        Self {
            value: BigUint::zero(),
        }
    }

    pub fn one() -> Self {
        Self {
            value: BigUint::one(),
        }
    }

    pub fn from_u64(value: u64) -> Self {
        Self::new(BigUint::from(value))
    }

    /// Parse big-endian bytes, reducing modulo `p`.
    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        Self::new(BigUint::from_bytes_be(bytes))
    }

    /// Parse big-endian bytes, rejecting values `>= p`.
    pub fn from_canonical_bytes(bytes: &[u8]) -> Option<Self> {
        let value = BigUint::from_bytes_be(bytes);
        (&value < field_prime()).then_some(Self { value })
    }

    /// Fixed-width 32-byte big-endian encoding.
    pub fn to_bytes_be(&self) -> [u8; 32] {
        super::uint_to_be32(&self.value)
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn is_odd(&self) -> bool {
        self.value.bit(0)
    }

    pub fn add(&self, other: &Self) -> Self {
        Self::new(&self.value + &other.value)
    }

    pub fn sub(&self, other: &Self) -> Self {
        Self::new(&self.value + field_prime() - &other.value)
    }

    pub fn mul(&self, other: &Self) -> Self {
        Self::new(&self.value * &other.value)
    }

    pub fn square(&self) -> Self {
        self.mul(self)
    }

    pub fn neg(&self) -> Self {
        Self::zero().sub(self)
    }

    pub fn pow(&self, exponent: &BigUint) -> Self {
        Self {
            value: self.value.modpow(exponent, field_prime()),
        }
    }

    /// Multiplicative inverse; `None` for zero.
    pub fn invert(&self) -> Option<Self> {
        mod_inverse(&self.value, field_prime()).map(|value| Self { value })
    }

    /// A square root, if one exists. The caller picks parity.
    pub fn sqrt(&self) -> Option<Self> {
        sqrt_mod(&self.value, field_prime()).map(|value| Self { value })
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({})", hex::encode(self.to_bytes_be()))
    }
}
