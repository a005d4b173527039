//! The recursive traversal that extracts digits, and the mixed-radix
//! recombination of the digit vector into the exponent.

use crypto_bigint::Uint;

use crate::fp2::Fp2;
use crate::DlogError;

use super::generator::PowerTable;
use super::{PohligHellman, Tables};

impl<const LIMBS: usize> PohligHellman<LIMBS> {
    /// Recovers x with target = g^x, where g is the inverse of the `invg`
    /// this context was built from. x is returned as the little-endian
    /// integer Σ digit[i]·ℓ^(w·i).
    ///
    /// Fails with [`DlogError::TableMiss`] when `target` does not lie in the
    /// order-ℓ^e subgroup.
    pub fn solve(&self, target: &Fp2<LIMBS>) -> Result<Uint<LIMBS>, DlogError> {
        let digits = self.solve_digits(target)?;
        Ok(recombine(&digits, self.parameters.window_size()))
    }

    /// As [`solve`](Self::solve), but returns the raw base-ℓ^w digit vector
    /// (least significant window first; the final digit is short when w ∤ e).
    pub fn solve_digits(&self, target: &Fp2<LIMBS>) -> Result<Vec<u32>, DlogError> {
        let mut digits = vec![0u32; self.digit_slots()];
        match &self.tables {
            Tables::Uniform(table) => self.traverse_uniform(table, target, 0, 0, &mut digits)?,
            Tables::Split { aligned, shifted } => {
                self.traverse_split(aligned, shifted, target, 0, 0, &mut digits)?
            }
        }
        debug_assert!(
            self.digits_cancel(target, &digits),
            "recovered digits do not cancel the target"
        );
        Ok(digits)
    }

    /// target·Π invg^(digit[i]·ℓ^(w·i)) must be the identity. The aligned
    /// table holds exactly those entries in both variants.
    fn digits_cancel(&self, target: &Fp2<LIMBS>, digits: &[u32]) -> bool {
        let table = match &self.tables {
            Tables::Uniform(table) => table,
            Tables::Split { aligned, .. } => aligned,
        };
        let mut acc = *target;
        for (slot, &digit) in digits.iter().enumerate() {
            acc = acc.mul(table.entry(slot, digit));
        }
        acc == Fp2::one(self.parameters.field())
    }

    /// One digit slot per table level; matches `parameters.windows()` except
    /// when the split variant is forced onto a divisible configuration.
    fn digit_slots(&self) -> usize {
        match &self.tables {
            Tables::Uniform(table) => table.levels(),
            Tables::Split { aligned, .. } => aligned.levels(),
        }
    }

    /// Divide-and-conquer digit extraction for the w | e case.
    ///
    /// `advanced` counts the window advances already applied to `r`; `base`
    /// is the absolute slot of `digits[0]`. The outer half is solved first:
    /// only then can its digits be multiplied out of `r` to derive the inner
    /// half's partial value. Each recursion owns a disjoint digit sub-slice.
    fn traverse_uniform(
        &self,
        table: &PowerTable<LIMBS>,
        r: &Fp2<LIMBS>,
        advanced: usize,
        base: usize,
        digits: &mut [u32],
    ) -> Result<(), DlogError> {
        let z = digits.len();
        if z > 1 {
            let t = self.path.split(z);
            let w = self.parameters.window();

            let outer_start = self.parameters.advance(r, w * (z - t));
            let (outer, inner) = digits.split_at_mut(t);
            self.traverse_uniform(table, &outer_start, advanced + (z - t), base, outer)?;

            let mut inner_start = *r;
            for (h, &digit) in outer.iter().enumerate() {
                inner_start = inner_start.mul(table.entry(advanced + base + h, digit));
            }
            self.traverse_uniform(table, &inner_start, advanced, base + t, inner)
        } else {
            let value = r.conjugate().canonical();
            digits[0] = table
                .lookup_leaf(&value)
                .ok_or(DlogError::TableMiss { window: base })?;
            Ok(())
        }
    }

    /// Digit extraction for the w ∤ e case. The very first advance crosses
    /// the short most-significant window, so it spends e mod w operations
    /// for that window; once `advanced` is nonzero every digit position is
    /// offset by the remainder and the shifted table applies.
    fn traverse_split(
        &self,
        aligned: &PowerTable<LIMBS>,
        shifted: &PowerTable<LIMBS>,
        r: &Fp2<LIMBS>,
        advanced: usize,
        base: usize,
        digits: &mut [u32],
    ) -> Result<(), DlogError> {
        let z = digits.len();
        let top_slot = self.digit_slots() - 1;
        if z > 1 {
            let t = self.path.split(z);
            let w = self.parameters.window();
            let ops = if advanced > 0 {
                w * (z - t)
            } else {
                self.parameters.remainder() + w * (z - t - 1)
            };

            let outer_start = self.parameters.advance(r, ops);
            let (outer, inner) = digits.split_at_mut(t);
            self.traverse_split(aligned, shifted, &outer_start, advanced + (z - t), base, outer)?;

            let table = if advanced > 0 { shifted } else { aligned };
            let mut inner_start = *r;
            for (h, &digit) in outer.iter().enumerate() {
                inner_start = inner_start.mul(table.entry(advanced + base + h, digit));
            }
            self.traverse_split(aligned, shifted, &inner_start, advanced, base + t, inner)
        } else {
            let value = r.conjugate().canonical();
            // The never-advanced leaf is the short most-significant window;
            // its digit lives in the aligned table's bounded leaf row.
            let table = if advanced == 0 && base == top_slot {
                aligned
            } else {
                shifted
            };
            digits[0] = table
                .lookup_leaf(&value)
                .ok_or(DlogError::TableMiss { window: base })?;
            Ok(())
        }
    }
}

/// Horner recombination of a little-endian base-ℓ^w digit vector. Digit i
/// always sits at exponent w·i, so the short final window of the split
/// variant needs no special case; intermediate values stay below ℓ^e, which
/// is below the field modulus, so the fixed-width arithmetic cannot wrap.
pub(crate) fn recombine<const LIMBS: usize>(digits: &[u32], window_size: u64) -> Uint<LIMBS> {
    let base: Uint<LIMBS> = Uint::from_u64(window_size);
    let mut acc = Uint::ZERO;
    for &digit in digits.iter().rev() {
        acc = acc
            .wrapping_mul(&base)
            .wrapping_add(&Uint::from_u64(u64::from(digit)));
    }
    acc
}
