//! Baby Jubjub, the twisted Edwards curve embedded in the BN254 scalar field.
//!
//! Coordinates and curve constants follow circomlib (`a = 168700`,
//! `d = 168696`), so public keys computed here are the ones the Semaphore
//! circuit recomputes from the secret with `BabyPbk`.

use ark_bn254::Fr;
use ark_ff::{Field, MontFp, One, PrimeField, Zero};
use num_bigint::BigUint;

const A: Fr = MontFp!("168700");
const D: Fr = MontFp!("168696");

/// Order of the prime subgroup generated by [`BASE8`].
pub const SUB_ORDER: Fr =
    MontFp!("2736030358979909402780800718157159386076813972158567259200215660948447373041");

/// Generator of the full curve group.
pub const GENERATOR: Point = Point {
    x: MontFp!("995203441582195749578291179787384436505546430278305826713579947235728471134"),
    y: MontFp!("5472060717959818805561601436314318772137091100104008585924551046643952123905"),
};

/// `8 * GENERATOR`, the base point for public keys.
pub const BASE8: Point = Point {
    x: MontFp!("5299619240641551281634865583518297030282874472190772894086521144482721001553"),
    y: MontFp!("16950150798460657717958625567821834550301663161624707787222815936182638968203"),
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: Fr,
    pub y: Fr,
}

impl Point {
    pub const IDENTITY: Point = Point {
        x: MontFp!("0"),
        y: MontFp!("1"),
    };

    pub fn is_on_curve(&self) -> bool {
        let x2 = self.x.square();
        let y2 = self.y.square();
        A * x2 + y2 == Fr::one() + D * x2 * y2
    }

    pub fn add(&self, other: &Point) -> Point {
        let beta = self.x * other.y;
        let gamma = self.y * other.x;
        let delta = (self.y - A * self.x) * (other.x + other.y);
        let tau = beta * gamma;
        let dtau = D * tau;

        Point {
            x: divide(beta + gamma, Fr::one() + dtau),
            y: divide(delta + A * beta - gamma, Fr::one() - dtau),
        }
    }

    pub fn double(&self) -> Point {
        self.add(self)
    }

    /// Double-and-add from the most significant bit.
    pub fn mul_scalar(&self, scalar: &BigUint) -> Point {
        let mut acc = Point::IDENTITY;
        for bit in (0..scalar.bits()).rev() {
            acc = acc.double();
            if scalar.bit(bit) {
                acc = acc.add(self);
            }
        }
        acc
    }
}

pub fn sub_order() -> BigUint {
    SUB_ORDER.into_bigint().into()
}

// The addition law is complete on this curve (`a` square, `d` non-square),
// so denominators are never zero for points on it.
fn divide(numerator: Fr, denominator: Fr) -> Fr {
    debug_assert!(!denominator.is_zero());
    numerator * denominator.inverse().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_on_curve() {
        assert!(Point::IDENTITY.is_on_curve());
        assert!(GENERATOR.is_on_curve());
        assert!(BASE8.is_on_curve());
    }

    #[test]
    fn test_base8_is_eight_times_generator() {
        assert_eq!(GENERATOR.mul_scalar(&BigUint::from(8u32)), BASE8);
        let doubled = GENERATOR.double().double().double();
        assert_eq!(doubled, BASE8);
    }

    #[test]
    fn test_base8_has_sub_order() {
        assert_eq!(BASE8.mul_scalar(&sub_order()), Point::IDENTITY);
        assert_ne!(BASE8.mul_scalar(&(sub_order() - 1u32)), Point::IDENTITY);
    }

    #[test]
    fn test_identity_is_neutral() {
        assert_eq!(BASE8.add(&Point::IDENTITY), BASE8);
        assert_eq!(BASE8.mul_scalar(&BigUint::from(0u32)), Point::IDENTITY);
        assert_eq!(BASE8.mul_scalar(&BigUint::from(1u32)), BASE8);
    }

    #[test]
    fn test_scalar_mul_distributes() {
        let a = BigUint::from(123_456u32);
        let b = BigUint::from(987_654u32);
        let lhs = BASE8.mul_scalar(&(&a + &b));
        let rhs = BASE8.mul_scalar(&a).add(&BASE8.mul_scalar(&b));
        assert_eq!(lhs, rhs);
        assert!(lhs.is_on_curve());
    }
}
