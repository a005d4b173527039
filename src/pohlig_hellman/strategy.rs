//! Cost-optimal split schedule for the recursive traversal.
//!
//! A subproblem covering z digit windows is split into an "outer" part of t
//! windows (reached by advancing the partial value z−t windows) and an
//! "inner" part of z−t windows (reached by multiplying t solved digits back
//! in). The split point per size is chosen once by dynamic programming over
//! the relative weights of those two operations, the same cost model the
//! original offline strategy search used. Any split 1 ≤ t < z yields correct
//! digits; the choice only affects the operation count.

/// Split points indexed by subproblem size; `split(z)` is defined for
/// 2 ≤ z ≤ windows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StrategyPath {
    splits: Vec<usize>,
}

impl StrategyPath {
    /// Computes the optimal split table for `windows` digit windows, where a
    /// single window advance weighs `advance_weight` (w squarings or
    /// cubings) against `multiply_weight` per table multiplication.
    pub fn optimize(windows: usize, advance_weight: u64, multiply_weight: u64) -> StrategyPath {
        let mut cost = vec![0u64; windows.max(1) + 1];
        let mut splits = vec![0usize; windows.max(1) + 1];
        for z in 2..=windows {
            let mut best = u64::MAX;
            for t in 1..z {
                let c = cost[t]
                    + cost[z - t]
                    + (z - t) as u64 * advance_weight
                    + t as u64 * multiply_weight;
                if c < best {
                    best = c;
                    splits[z] = t;
                }
            }
            cost[z] = best;
        }
        StrategyPath { splits }
    }

    /// The split point for a subproblem of `z` windows.
    pub fn split(&self, z: usize) -> usize {
        self.splits[z]
    }

    pub fn windows(&self) -> usize {
        self.splits.len() - 1
    }
}
