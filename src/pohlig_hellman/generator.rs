//! Power table construction.
//!
//! A table row at level u holds invg^(d·ℓ^(w·u)) for every digit value d, so
//! a solved digit can be cancelled out of the running partial value with a
//! single multiplication. The final row doubles as the leaf lookup set and
//! is indexed by canonical representation, the same way the baby-step table
//! maps compressed points to their logs.

use std::collections::{HashMap, HashSet};

use crate::fp2::{Fp2, Fp2Repr};
use crate::DlogError;

use super::SubgroupParameters;

/// One rectangular level × digit table of group elements, plus the hash
/// index over its leaf row.
#[derive(Debug)]
pub struct PowerTable<const LIMBS: usize> {
    rows: Vec<Vec<Fp2<LIMBS>>>,
    leaf_digits: HashMap<Fp2Repr<LIMBS>, u32>,
}

impl<const LIMBS: usize> PowerTable<LIMBS> {
    /// Wraps fully built rows, indexing the first `leaf_width` entries of
    /// the last row for leaf lookup. The width is smaller than the row only
    /// for the short most-significant window of the split variant; bounding
    /// it there keeps out-of-range digits unreachable.
    fn from_rows(rows: Vec<Vec<Fp2<LIMBS>>>, leaf_width: usize) -> Result<Self, DlogError> {
        let base_row = &rows[0];
        let mut seen = HashSet::with_capacity(base_row.len());
        for entry in base_row {
            if !seen.insert(entry.canonical()) {
                return Err(DlogError::InvalidParameters(
                    "level-0 table entries collide; generator order is below the window size",
                ));
            }
        }

        let leaf_row = &rows[rows.len() - 1];
        let mut leaf_digits = HashMap::with_capacity(leaf_width);
        for (digit, entry) in leaf_row.iter().take(leaf_width).enumerate() {
            leaf_digits.insert(entry.canonical(), digit as u32);
        }
        Ok(PowerTable { rows, leaf_digits })
    }

    /// The element invg^(digit·ℓ^(w·level)) (shifted by e mod w for the
    /// split variant's shifted table).
    pub fn entry(&self, level: usize, digit: u32) -> &Fp2<LIMBS> {
        &self.rows[level][digit as usize]
    }

    /// Scans the leaf row for a canonical value, returning its digit.
    pub fn lookup_leaf(&self, value: &Fp2Repr<LIMBS>) -> Option<u32> {
        self.leaf_digits.get(value).copied()
    }

    pub fn levels(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows[0].len()
    }
}

/// Level 0 holds the digit multiples 1, invg, invg², …, built by repeated
/// multiplication rather than exponentiation.
fn base_row<const LIMBS: usize>(
    parameters: &SubgroupParameters<LIMBS>,
    invg: &Fp2<LIMBS>,
) -> Vec<Fp2<LIMBS>> {
    let width = parameters.window_size() as usize;
    let mut row = Vec::with_capacity(width);
    row.push(Fp2::one(parameters.field()));
    for _ in 1..width {
        let next = row.last().expect("row is never empty").mul(invg);
        row.push(next);
    }
    row
}

fn advanced_row<const LIMBS: usize>(
    parameters: &SubgroupParameters<LIMBS>,
    row: &[Fp2<LIMBS>],
) -> Vec<Fp2<LIMBS>> {
    row.iter()
        .map(|entry| parameters.advance(entry, parameters.window()))
        .collect()
}

/// Builds the single table used when w | e: e/w levels, each raising the
/// previous one to the ℓ^w-th power.
pub(crate) fn build_uniform<const LIMBS: usize>(
    parameters: &SubgroupParameters<LIMBS>,
    invg: &Fp2<LIMBS>,
) -> Result<PowerTable<LIMBS>, DlogError> {
    let levels = parameters.exponent() / parameters.window();
    let mut rows = Vec::with_capacity(levels);
    rows.push(base_row(parameters, invg));
    for _ in 1..levels {
        rows.push(advanced_row(parameters, rows.last().expect("seeded above")));
    }
    let width = parameters.window_size() as usize;
    PowerTable::from_rows(rows, width)
}

/// Builds the aligned/shifted table pair used when w ∤ e. Both have
/// ⌊e/w⌋+1 levels and share the level-0 digit multiples; the shifted table
/// inserts one extra ℓ^(e mod w) step between levels 0 and 1 to account for
/// the short most-significant window crossed by the first advance.
pub(crate) fn build_split<const LIMBS: usize>(
    parameters: &SubgroupParameters<LIMBS>,
    invg: &Fp2<LIMBS>,
) -> Result<(PowerTable<LIMBS>, PowerTable<LIMBS>), DlogError> {
    let levels = parameters.exponent() / parameters.window() + 1;
    let width = parameters.window_size() as usize;

    let base = base_row(parameters, invg);

    let mut aligned_rows = Vec::with_capacity(levels);
    aligned_rows.push(base.clone());
    for _ in 1..levels {
        aligned_rows.push(advanced_row(
            parameters,
            aligned_rows.last().expect("seeded above"),
        ));
    }

    let mut shifted_rows = Vec::with_capacity(levels);
    let remainder_power = parameters.prime().value().pow(parameters.remainder() as u32);
    let shifted_level_1: Vec<Fp2<LIMBS>> = base
        .iter()
        .map(|entry| entry.pow_u64_vartime(remainder_power))
        .collect();
    shifted_rows.push(base);
    shifted_rows.push(shifted_level_1);
    for _ in 2..levels {
        shifted_rows.push(advanced_row(
            parameters,
            shifted_rows.last().expect("seeded above"),
        ));
    }

    let leaf_width = remainder_power as usize;
    let aligned = PowerTable::from_rows(aligned_rows, leaf_width)?;
    let shifted = PowerTable::from_rows(shifted_rows, width)?;
    Ok((aligned, shifted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pohlig_hellman::{SubgroupParameters, SubgroupPrime};
    use crate::utils;
    use crypto_bigint::{Uint, U64};
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    const LIMBS: usize = U64::LIMBS;

    fn toy_modulus() -> Uint<LIMBS> {
        Uint::from_be_hex("0000071872DFFFFF") // 7·2^21·3^12 − 1
    }

    fn toy_invg(
        parameters: &SubgroupParameters<LIMBS>,
        seed: u64,
    ) -> Fp2<LIMBS> {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        utils::subgroup_generator(
            parameters.modulus(),
            parameters.field(),
            parameters.prime(),
            parameters.exponent(),
            &mut rng,
        )
        .expect("toy prime supports this subgroup")
        .conjugate()
    }

    #[test]
    fn uniform_table_shape_and_powers() {
        let parameters =
            SubgroupParameters::new(SubgroupPrime::Two, 12, 3, &toy_modulus()).unwrap();
        let invg = toy_invg(&parameters, 11);
        let table = build_uniform(&parameters, &invg).unwrap();

        assert_eq!(table.levels(), 4);
        assert_eq!(table.width(), 8);
        // entry(u, d) = invg^(d·8^u)
        for level in 0..4 {
            for digit in 0..8u32 {
                let exponent = u64::from(digit) * 8u64.pow(level as u32);
                assert_eq!(
                    *table.entry(level, digit),
                    invg.pow_u64_vartime(exponent),
                    "level {} digit {}",
                    level,
                    digit
                );
            }
        }
    }

    #[test]
    fn split_table_shapes_and_powers() {
        let parameters =
            SubgroupParameters::new(SubgroupPrime::Three, 11, 3, &toy_modulus()).unwrap();
        let invg = toy_invg(&parameters, 12);
        let (aligned, shifted) = build_split(&parameters, &invg).unwrap();

        assert_eq!(aligned.levels(), 4);
        assert_eq!(shifted.levels(), 4);
        assert_eq!(aligned.width(), 27);

        for level in 0..4 {
            for digit in 0..27u32 {
                let aligned_exp = u64::from(digit) * 27u64.pow(level as u32);
                assert_eq!(*aligned.entry(level, digit), invg.pow_u64_vartime(aligned_exp));
                if level >= 1 {
                    // shifted levels carry the extra 3^(11 mod 3) = 9 factor
                    let shifted_exp = u64::from(digit) * 9 * 27u64.pow(level as u32 - 1);
                    assert_eq!(*shifted.entry(level, digit), invg.pow_u64_vartime(shifted_exp));
                }
            }
        }
    }

    #[test]
    fn leaf_lookup_is_bounded_for_short_window() {
        let parameters =
            SubgroupParameters::new(SubgroupPrime::Three, 11, 3, &toy_modulus()).unwrap();
        let invg = toy_invg(&parameters, 13);
        let (aligned, _) = build_split(&parameters, &invg).unwrap();

        // Top window ranges over 3^(11 mod 3) = 9 digits only.
        for digit in 0..9u32 {
            let value = aligned.entry(3, digit).canonical();
            assert_eq!(aligned.lookup_leaf(&value), Some(digit));
        }
        let out_of_range = aligned.entry(3, 9).canonical();
        assert_eq!(aligned.lookup_leaf(&out_of_range), None);
    }

    #[test]
    fn construction_is_deterministic() {
        let parameters =
            SubgroupParameters::new(SubgroupPrime::Two, 21, 3, &toy_modulus()).unwrap();
        let invg = toy_invg(&parameters, 14);
        let a = build_uniform(&parameters, &invg).unwrap();
        let b = build_uniform(&parameters, &invg).unwrap();
        for level in 0..a.levels() {
            for digit in 0..a.width() as u32 {
                assert_eq!(a.entry(level, digit), b.entry(level, digit));
            }
        }
    }

    #[test]
    fn rejects_low_order_generator() {
        // An invg of order 2^2 cannot fill an injective 2^3-wide base row.
        let parameters =
            SubgroupParameters::new(SubgroupPrime::Two, 12, 3, &toy_modulus()).unwrap();
        let low_order = toy_invg(&parameters, 15).pow_u64_vartime(1 << 10);
        let err = build_uniform(&parameters, &low_order).unwrap_err();
        assert!(matches!(err, DlogError::InvalidParameters(_)));
    }
}
