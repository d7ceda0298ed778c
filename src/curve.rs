//! Short-Weierstrass elliptic-curve group law.
//!
//! A curve `y^2 = x^3 + Ax + B` over a prime field, with affine points plus
//! an explicit point at infinity. All arithmetic routes through
//! [`FieldElement`] operations, so coordinates stay canonically reduced.

use num_bigint::BigUint;

use crate::field::{FieldElement, FiniteField};
use crate::scalar;
use crate::{Error, Result};

/// A point on a curve: affine coordinates or the group identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Point {
    /// The point at infinity (group identity).
    Infinity,
    /// An affine point `(x, y)` with canonical coordinates.
    Affine { x: BigUint, y: BigUint },
}

impl Point {
    /// Constructs an affine point. On-curve validation is the curve's job.
    pub fn new(x: BigUint, y: BigUint) -> Self {
        Point::Affine { x, y }
    }

    /// Whether this is the group identity.
    pub fn is_infinity(&self) -> bool {
        matches!(self, Point::Infinity)
    }

    /// Fixed-width big-endian encoding `X || Y`, each coordinate padded to
    /// `width` bytes. Infinity encodes as all zeroes, which never collides
    /// with an affine point because `(0, 0)` satisfies no curve used here.
    pub fn to_bytes(&self, width: usize) -> Vec<u8> {
        match self {
            Point::Infinity => vec![0u8; 2 * width],
            Point::Affine { x, y } => {
                let mut out = scalar::to_bytes_fixed(x, width);
                out.extend_from_slice(&scalar::to_bytes_fixed(y, width));
                out
            }
        }
    }

    /// Decodes a fixed-width `X || Y` encoding.
    pub fn from_bytes(bytes: &[u8], width: usize) -> Result<Self> {
        if bytes.len() != 2 * width {
            return Err(Error::Structural(format!(
                "point encoding must be {} bytes, got {}",
                2 * width,
                bytes.len()
            )));
        }
        if bytes.iter().all(|b| *b == 0) {
            return Ok(Point::Infinity);
        }
        Ok(Point::Affine {
            x: BigUint::from_bytes_be(&bytes[..width]),
            y: BigUint::from_bytes_be(&bytes[width..]),
        })
    }
}

/// A short-Weierstrass curve `y^2 = x^3 + Ax + B` over a prime field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Curve {
    a: FieldElement,
    b: FieldElement,
    field: FiniteField,
}

impl Curve {
    /// Creates a curve from its coefficients and base field.
    pub fn new(a: FieldElement, b: FieldElement, field: FiniteField) -> Self {
        Self { a, b, field }
    }

    /// The base field.
    pub fn field(&self) -> &FiniteField {
        &self.field
    }

    /// Byte width of one canonically encoded coordinate.
    pub fn coordinate_width(&self) -> usize {
        ((self.field.order().bits() + 7) / 8) as usize
    }

    /// Checks the curve equation. Infinity is on every curve.
    pub fn is_on_curve(&self, p: &Point) -> bool {
        let (x, y) = match p {
            Point::Infinity => return true,
            Point::Affine { x, y } => (self.field.element(x.clone()), self.field.element(y.clone())),
        };

        let lhs = y.square();
        let x_cubed = self.field.mul(&x.square(), &x);
        let rhs = self
            .field
            .add(&self.field.add(&x_cubed, &self.field.mul(&self.a, &x)), &self.b);
        lhs == rhs
    }

    /// Group addition, split by case: identity laws for infinity, inverse
    /// pairs annihilate, equal points take the tangent, distinct points the
    /// chord.
    pub fn add(&self, p: &Point, q: &Point) -> Point {
        let (x1, y1) = match p {
            Point::Infinity => return q.clone(),
            Point::Affine { x, y } => (self.field.element(x.clone()), self.field.element(y.clone())),
        };
        let (x2, y2) = match q {
            Point::Infinity => return p.clone(),
            Point::Affine { x, y } => (self.field.element(x.clone()), self.field.element(y.clone())),
        };

        if x1 == x2 {
            // Same x: either an inverse pair or the same point. A zero y
            // is its own inverse (2-torsion), so doubling it also lands on
            // infinity.
            if self.field.add(&y1, &y2).is_zero() || y1.is_zero() {
                return Point::Infinity;
            }
            return self.tangent(&x1, &y1);
        }

        // Chord slope (y2 - y1) / (x2 - x1); the divisor is nonzero here.
        let slope = self
            .field
            .div(&self.field.sub(&y2, &y1), &self.field.sub(&x2, &x1))
            .unwrap_or_else(|_| unreachable!("distinct x coordinates"));

        let x3 = self
            .field
            .sub(&self.field.sub(&slope.square(), &x1), &x2);
        let y3 = self
            .field
            .sub(&self.field.mul(&slope, &self.field.sub(&x1, &x3)), &y1);

        Point::new(x3.residue().clone(), y3.residue().clone())
    }

    /// Point doubling, `2P = add(P, P)`.
    pub fn double(&self, p: &Point) -> Point {
        self.add(p, p)
    }

    /// Tangent-slope doubling for an affine point with `y != 0`.
    fn tangent(&self, x: &FieldElement, y: &FieldElement) -> Point {
        // slope = (3x^2 + A) / 2y
        let three_x_sq = self.field.mul(&self.field.element(BigUint::from(3u8)), &x.square());
        let numerator = self.field.add(&three_x_sq, &self.a);
        let denominator = self.field.add(y, y);
        let slope = self
            .field
            .div(&numerator, &denominator)
            .unwrap_or_else(|_| unreachable!("doubling requires y != 0, checked by caller"));

        let x3 = self.field.sub(&self.field.sub(&slope.square(), x), x);
        let y3 = self
            .field
            .sub(&self.field.mul(&slope, &self.field.sub(x, &x3)), y);

        Point::new(x3.residue().clone(), y3.residue().clone())
    }

    /// `-P = (x, -y)`.
    pub fn neg(&self, p: &Point) -> Point {
        match p {
            Point::Infinity => Point::Infinity,
            Point::Affine { x, y } => Point::new(
                x.clone(),
                scalar::neg_mod(y, self.field.order()),
            ),
        }
    }

    /// `kP` by double-and-add, most significant bit first.
    ///
    /// No special case for a zero scalar (the accumulator simply stays at
    /// infinity); callers are expected to pre-validate scalars into
    /// `[0, L)`.
    pub fn scalar_mul(&self, p: &Point, k: &BigUint) -> Point {
        let mut acc = Point::Infinity;
        for i in (0..k.bits()).rev() {
            acc = self.double(&acc);
            if k.bit(i) {
                acc = self.add(&acc, p);
            }
        }
        acc
    }

    /// `mP + nQ` in a single combined double-and-add pass.
    ///
    /// Precomputes `P + Q` once and dispatches on the bit pair of `(m, n)`
    /// at each position. One shared doubling chain instead of two.
    pub fn double_scalar_mul(&self, p: &Point, q: &Point, m: &BigUint, n: &BigUint) -> Point {
        let pq = self.add(p, q);
        let bits = m.bits().max(n.bits());

        let mut acc = Point::Infinity;
        for i in (0..bits).rev() {
            acc = self.double(&acc);
            match (m.bit(i), n.bit(i)) {
                (true, true) => acc = self.add(&acc, &pq),
                (true, false) => acc = self.add(&acc, p),
                (false, true) => acc = self.add(&acc, q),
                (false, false) => {}
            }
        }
        acc
    }

    /// Recovers a point on the curve with the given x coordinate, via a
    /// modular square root of `x^3 + Ax + B`. Fails when no root exists.
    pub fn at(&self, x: &BigUint) -> Result<Point> {
        let xe = self.field.element(x.clone());
        let x_cubed = self.field.mul(&xe.square(), &xe);
        let rhs = self
            .field
            .add(&self.field.add(&x_cubed, &self.field.mul(&self.a, &xe)), &self.b);

        let y = self.field.sqrt(&rhs)?;
        Ok(Point::new(xe.residue().clone(), y.residue().clone()))
    }
}
