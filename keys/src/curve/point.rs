//! Affine points on secp256k1 and the group law.

use num_bigint::BigUint;

use super::field::FieldElement;
use super::params;
use crate::error::{Error, Result};

/// A point on secp256k1 in affine coordinates, or the point at infinity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Point {
    /// The group identity.
    Infinity,
    /// A finite point satisfying `y^2 = x^3 + 7`.
    Affine { x: FieldElement, y: FieldElement },
}

/// `P + Q`.
pub fn point_add(p: &Point, q: &Point) -> Point {
    p.add(q)
}

/// `k · P` by double-and-add.
pub fn scalar_multiply(k: &BigUint, p: &Point) -> Point {
    p.multiply(k)
}

fn curve_rhs(x: &FieldElement) -> FieldElement {
    x.square()
        .mul(x)
        .add(&FieldElement::new(params().b.clone()))
}

impl Point {
    /// The standard base point `G`.
    pub fn generator() -> Self {
        let curve = params();
        Point::Affine {
            x: FieldElement::new(curve.gx.clone()),
            y: FieldElement::new(curve.gy.clone()),
        }
    }

    /// Build a finite point, checking the curve equation.
    pub fn from_affine(x: FieldElement, y: FieldElement) -> Result<Self> {
        let point = Point::Affine { x, y };
        if point.is_on_curve() {
            Ok(point)
        } else {
            Err(Error::PointNotOnCurve)
        }
    }

    /// Solve for `y` given `x`, choosing the root whose parity is `odd`.
    ///
    /// Fails with [`Error::PointNotOnCurve`] when `x^3 + 7` is not a square.
    pub fn lift_x(x: &FieldElement, odd: bool) -> Result<Self> {
        let y = curve_rhs(x).sqrt().ok_or(Error::PointNotOnCurve)?;
        let y = if y.is_odd() == odd { y } else { y.neg() };
        Ok(Point::Affine { x: x.clone(), y })
    }

    pub fn is_infinity(&self) -> bool {
        matches!(self, Point::Infinity)
    }

    /// Infinity is considered on the curve.
    pub fn is_on_curve(&self) -> bool {
        match self {
            Point::Infinity => true,
            Point::Affine { x, y } => y.square() == curve_rhs(x),
        }
    }

    /// Affine coordinates, or `None` for infinity.
    pub fn coordinates(&self) -> Option<(&FieldElement, &FieldElement)> {
        match self {
            Point::Infinity => None,
            Point::Affine { x, y } => Some((x, y)),
        }
    }

    pub fn negate(&self) -> Self {
        match self {
            Point::Infinity => Point::Infinity,
            Point::Affine { x, y } => Point::Affine {
                x: x.clone(),
                y: y.neg(),
            },
        }
    }

    pub fn double(&self) -> Self {
        let (x, y) = match self {
            Point::Infinity => return Point::Infinity,
            Point::Affine { x, y } => (x, y),
        };
        if y.is_zero() {
            return Point::Infinity;
        }
        // lambda = 3x^2 / 2y
        let numerator = x.square().mul(&FieldElement::from_u64(3));
        let denominator = y.add(y);
        let Some(inv) = denominator.invert() else {
            return Point::Infinity;
        };
        let lambda = numerator.mul(&inv);
        let x3 = lambda.square().sub(x).sub(x);
        let y3 = lambda.mul(&x.sub(&x3)).sub(y);
        Point::Affine { x: x3, y: y3 }
    }

    pub fn add(&self, other: &Self) -> Self {
        let (x1, y1, x2, y2) = match (self, other) {
            (Point::Infinity, _) => return other.clone(),
            (_, Point::Infinity) => return self.clone(),
            (Point::Affine { x: x1, y: y1 }, Point::Affine { x: x2, y: y2 }) => (x1, y1, x2, y2),
        };

        if x1 == x2 {
            return if y1 == y2 { self.double() } else { Point::Infinity };
        }

        // lambda = (y2 - y1) / (x2 - x1)
        let Some(inv) = x2.sub(x1).invert() else {
            return Point::Infinity;
        };
        let lambda = y2.sub(y1).mul(&inv);
        let x3 = lambda.square().sub(x1).sub(x2);
        let y3 = lambda.mul(&x1.sub(&x3)).sub(y1);
        Point::Affine { x: x3, y: y3 }
    }

    /// `k · self`, scanning bits from the most significant end.
    pub fn multiply(&self, k: &BigUint) -> Self {
        let mut acc = Point::Infinity;
        for i in (0..k.bits()).rev() {
            acc = acc.double();
            if k.bit(i) {
                acc = acc.add(self);
            }
        }
        acc
    }
}
