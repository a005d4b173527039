//! Helpers for generating subgroup elements and exponents, used by the
//! tests and benchmarks and by callers that need a generator for a custom
//! field.

use anyhow::{ensure, Context, Result};
use crypto_bigint::modular::runtime_mod::DynResidueParams;
use crypto_bigint::{NonZero, Uint, Word};
use rand_core::RngCore;

use crate::fp2::Fp2;
use crate::pohlig_hellman::SubgroupPrime;

/// Uniform random integer in [0, bound) by rejection sampling over the
/// bound's bit length.
pub fn random_below<const LIMBS: usize>(
    bound: &Uint<LIMBS>,
    rng: &mut impl RngCore,
) -> Result<Uint<LIMBS>> {
    ensure!(*bound != Uint::ZERO, "bound must be nonzero");

    let bits = bound.bits_vartime();
    let bits_per_word = Word::BITS as usize;
    let full_words = bits / bits_per_word;
    let top_bits = bits % bits_per_word;

    loop {
        let mut words = [0 as Word; LIMBS];
        for word in words.iter_mut().take(full_words) {
            *word = rng.next_u64() as Word;
        }
        if top_bits != 0 {
            words[full_words] = (rng.next_u64() as Word) & (((1 as Word) << top_bits) - 1);
        }
        let candidate = Uint::from_words(words);
        if candidate < *bound {
            return Ok(candidate);
        }
    }
}

/// Random element of the norm-1 (cyclotomic) subgroup of GF(p²)*, obtained
/// by projecting a random nonzero element through x ↦ x^(p−1).
pub fn random_cyclotomic<const LIMBS: usize>(
    modulus: &Uint<LIMBS>,
    field: DynResidueParams<LIMBS>,
    rng: &mut impl RngCore,
) -> Result<Fp2<LIMBS>> {
    let p_minus_1 = modulus.wrapping_sub(&Uint::ONE);
    loop {
        let x = Fp2::new(
            field,
            &random_below(modulus, rng)?,
            &random_below(modulus, rng)?,
        );
        if x == Fp2::zero(field) {
            continue;
        }
        let z = x.pow_vartime(&p_minus_1);
        if z != Fp2::one(field) {
            return Ok(z);
        }
    }
}

/// ℓ^e as a fixed-width integer; fails if it does not fit.
pub fn prime_power<const LIMBS: usize>(prime: SubgroupPrime, exponent: usize) -> Result<Uint<LIMBS>> {
    let bits_available = LIMBS * Word::BITS as usize;
    let step: Uint<LIMBS> = Uint::from_u64(prime.value());
    let mut acc: Uint<LIMBS> = Uint::ONE;
    for _ in 0..exponent {
        ensure!(
            acc.bits_vartime() + 2 <= bits_available,
            "{}^{} does not fit in {} bits",
            prime.value(),
            exponent,
            bits_available
        );
        acc = acc.wrapping_mul(&step);
    }
    Ok(acc)
}

/// Derives an element of exact order ℓ^e by raising random norm-1 elements
/// to the cofactor (p+1)/ℓ^e. Requires ℓ^e | p+1.
pub fn subgroup_generator<const LIMBS: usize>(
    modulus: &Uint<LIMBS>,
    field: DynResidueParams<LIMBS>,
    prime: SubgroupPrime,
    exponent: usize,
    rng: &mut impl RngCore,
) -> Result<Fp2<LIMBS>> {
    ensure!(exponent >= 1, "subgroup exponent must be positive");
    let order: Uint<LIMBS> = prime_power(prime, exponent)?;
    let order_nz = Option::<NonZero<Uint<LIMBS>>>::from(NonZero::new(order))
        .context("subgroup order is zero")?;

    let group_order = modulus.wrapping_add(&Uint::ONE); // norm-1 subgroup has order p+1
    let (cofactor, residue) = group_order.div_rem(&order_nz);
    ensure!(
        residue == Uint::ZERO,
        "{}^{} does not divide p+1",
        prime.value(),
        exponent
    );

    let prime_nz = Option::<NonZero<Uint<LIMBS>>>::from(NonZero::new(Uint::from_u64(prime.value())))
        .context("prime is zero")?;
    let (sub_order, _) = order.div_rem(&prime_nz);

    let one = Fp2::one(field);
    loop {
        let candidate = random_cyclotomic(modulus, field, rng)?.pow_vartime(&cofactor);
        // exact order check: candidate^(ℓ^(e−1)) must not be the identity
        if candidate != one && candidate.pow_vartime(&sub_order) != one {
            return Ok(candidate);
        }
    }
}
