//! Arithmetic in GF(p²) = GF(p)[i]/(i² + 1) for primes p ≡ 3 (mod 4).
//!
//! Elements are pairs of Montgomery residues over a runtime modulus, so the
//! same code serves both the 751-bit production field and small test fields.
//! Only the operations the discrete log engine needs are provided: multiply,
//! square, cube, conjugate, variable-time exponentiation and reduction to a
//! canonical representation. Inputs are public (tables and compressed public
//! keys), so variable-time exponentiation is acceptable here.

use crypto_bigint::modular::runtime_mod::{DynResidue, DynResidueParams};
use crypto_bigint::{Uint, Word};

/// An element c0 + c1·i of GF(p²).
#[derive(Clone, Copy, Debug)]
pub struct Fp2<const LIMBS: usize> {
    c0: DynResidue<LIMBS>,
    c1: DynResidue<LIMBS>,
}

/// Canonical (fully reduced, non-Montgomery) representation of an [`Fp2`]
/// element. Two elements are equal iff their canonical forms are identical,
/// which makes this the key type for table lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Fp2Repr<const LIMBS: usize> {
    pub c0: [Word; LIMBS],
    pub c1: [Word; LIMBS],
}

impl<const LIMBS: usize> Fp2<LIMBS> {
    /// Builds an element from its reduced integer components.
    pub fn new(field: DynResidueParams<LIMBS>, c0: &Uint<LIMBS>, c1: &Uint<LIMBS>) -> Self {
        Fp2 {
            c0: DynResidue::new(c0, field),
            c1: DynResidue::new(c1, field),
        }
    }

    /// The multiplicative identity.
    pub fn one(field: DynResidueParams<LIMBS>) -> Self {
        Fp2 {
            c0: DynResidue::new(&Uint::ONE, field),
            c1: DynResidue::zero(field),
        }
    }

    /// The additive identity. Not a group element; only useful as a reject
    /// value when sampling random elements.
    pub fn zero(field: DynResidueParams<LIMBS>) -> Self {
        Fp2 {
            c0: DynResidue::zero(field),
            c1: DynResidue::zero(field),
        }
    }

    /// The Montgomery parameters this element lives under.
    pub fn field(&self) -> DynResidueParams<LIMBS> {
        *self.c0.params()
    }

    /// Schoolbook product: (a0 + a1·i)(b0 + b1·i) with i² = −1.
    pub fn mul(&self, rhs: &Self) -> Self {
        let a0b0 = self.c0 * rhs.c0;
        let a1b1 = self.c1 * rhs.c1;
        let a0b1 = self.c0 * rhs.c1;
        let a1b0 = self.c1 * rhs.c0;
        Fp2 {
            c0: a0b0 - a1b1,
            c1: a0b1 + a1b0,
        }
    }

    /// Squaring via (a0 + a1)(a0 − a1) and 2·a0·a1.
    pub fn square(&self) -> Self {
        let sum = self.c0 + self.c1;
        let diff = self.c0 - self.c1;
        let cross = self.c0 * self.c1;
        Fp2 {
            c0: sum * diff,
            c1: cross + cross,
        }
    }

    /// Cubing, used to advance ℓ = 3 windows.
    pub fn cube(&self) -> Self {
        self.square().mul(self)
    }

    /// Complex conjugation a0 − a1·i. For norm-1 elements this is the
    /// multiplicative inverse, which is how the leaf lookup cancels the
    /// implicit inversion baked into the tables.
    pub fn conjugate(&self) -> Self {
        let zero = DynResidue::zero(*self.c0.params());
        Fp2 {
            c0: self.c0,
            c1: zero - self.c1,
        }
    }

    /// Variable-time left-to-right exponentiation by a full-width exponent.
    pub fn pow_vartime(&self, exponent: &Uint<LIMBS>) -> Self {
        self.pow_words(&exponent.to_words())
    }

    /// Variable-time exponentiation by a small exponent, enough for the
    /// remainder-width window of the split table builder.
    pub fn pow_u64_vartime(&self, exponent: u64) -> Self {
        self.pow_words(&[exponent as Word])
    }

    fn pow_words(&self, words: &[Word]) -> Self {
        let bits_per_word = Word::BITS as usize;
        let mut acc = Self::one(self.field());
        for i in (0..words.len() * bits_per_word).rev() {
            acc = acc.square();
            if (words[i / bits_per_word] >> (i % bits_per_word)) & 1 == 1 {
                acc = acc.mul(self);
            }
        }
        acc
    }

    /// Reduces to the canonical representation used for equality and table
    /// lookup. Montgomery residues are kept reduced at all times, so the
    /// mapping is deterministic and injective.
    pub fn canonical(&self) -> Fp2Repr<LIMBS> {
        Fp2Repr {
            c0: self.c0.retrieve().to_words(),
            c1: self.c1.retrieve().to_words(),
        }
    }
}

impl<const LIMBS: usize> PartialEq for Fp2<LIMBS> {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl<const LIMBS: usize> Eq for Fp2<LIMBS> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crypto_bigint::U64;

    const LIMBS: usize = U64::LIMBS;

    // p = 7·2^21·3^12 − 1, a 43-bit SIDH-form prime with p ≡ 3 (mod 4).
    fn field() -> DynResidueParams<LIMBS> {
        DynResidueParams::new(&U64::from_be_hex("0000071872DFFFFF"))
    }

    fn elem(c0: u64, c1: u64) -> Fp2<LIMBS> {
        Fp2::new(field(), &Uint::from_u64(c0), &Uint::from_u64(c1))
    }

    #[test]
    fn mul_matches_square() {
        let x = elem(123456789, 987654321);
        assert_eq!(x.mul(&x), x.square());
    }

    #[test]
    fn cube_matches_repeated_mul() {
        let x = elem(0xDEAD, 0xBEEF);
        assert_eq!(x.cube(), x.mul(&x).mul(&x));
    }

    #[test]
    fn conjugate_is_involution() {
        let x = elem(42, 77);
        assert_eq!(x.conjugate().conjugate(), x);
    }

    #[test]
    fn pow_small_exponents() {
        let x = elem(3141592653, 2718281828);
        assert_eq!(x.pow_u64_vartime(0), Fp2::one(field()));
        assert_eq!(x.pow_u64_vartime(1), x);
        assert_eq!(x.pow_u64_vartime(2), x.square());
        assert_eq!(x.pow_u64_vartime(3), x.cube());
        assert_eq!(x.pow_u64_vartime(5), x.square().square().mul(&x));
        assert_eq!(
            x.pow_vartime(&Uint::from_u64(27)),
            x.cube().cube().cube()
        );
    }

    #[test]
    fn norm_one_conjugate_inverts() {
        // Project an arbitrary element onto the norm-1 subgroup via
        // x ↦ x^(p−1), then check that conjugation inverts it.
        let p_minus_1 = U64::from_be_hex("0000071872DFFFFE");
        let z = elem(123, 456).pow_vartime(&p_minus_1);
        assert_eq!(z.mul(&z.conjugate()), Fp2::one(field()));
    }

    #[test]
    fn canonical_roundtrips_equality() {
        let x = elem(1000, 2000);
        let y = elem(1000, 2000);
        let z = elem(1000, 2001);
        assert_eq!(x.canonical(), y.canonical());
        assert_ne!(x.canonical(), z.canonical());
    }
}
