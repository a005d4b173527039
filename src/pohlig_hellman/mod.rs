//! Windowed Pohlig-Hellman solver for μ_{ℓ^e} ⊂ GF(p²).
//!
//! Given the inverse invg of a fixed order-ℓ^e generator g, the solver
//! recovers x from r = g^x by extracting one base-ℓ^w digit of x per table
//! lookup, walking the digit positions with a cost-optimal recursive split.
//! Tables and the strategy path are built once per context and shared
//! read-only by every solve.

pub mod generator;
pub mod presets;
pub mod solver;
pub mod strategy;

use crate::fp2::Fp2;
use crate::DlogError;
use crypto_bigint::modular::runtime_mod::DynResidueParams;
use crypto_bigint::{Integer, Uint};

use generator::PowerTable;
use strategy::StrategyPath;

/// Largest supported window row width ℓ^w. Bounds both the table memory and
/// the u32 digit representation.
pub const MAX_WINDOW_SIZE: u64 = 1 << 16;

/// The small prime ℓ whose power ℓ^e is the subgroup order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubgroupPrime {
    Two,
    Three,
}

impl SubgroupPrime {
    pub fn value(self) -> u64 {
        match self {
            SubgroupPrime::Two => 2,
            SubgroupPrime::Three => 3,
        }
    }
}

/// Validated description of an order-ℓ^e cyclotomic subgroup together with
/// the window width the solver will use.
#[derive(Clone, Copy, Debug)]
pub struct SubgroupParameters<const LIMBS: usize> {
    prime: SubgroupPrime,
    exponent: usize,
    window: usize,
    window_size: u64,
    modulus: Uint<LIMBS>,
    field: DynResidueParams<LIMBS>,
}

impl<const LIMBS: usize> SubgroupParameters<LIMBS> {
    /// Checks that (ℓ, e, w) are mutually consistent and that the window
    /// digits fit the fixed-width representations used internally.
    pub fn new(
        prime: SubgroupPrime,
        exponent: usize,
        window: usize,
        modulus: &Uint<LIMBS>,
    ) -> Result<Self, DlogError> {
        if !bool::from(modulus.is_odd()) {
            return Err(DlogError::InvalidParameters("field modulus must be odd"));
        }
        if window == 0 {
            return Err(DlogError::InvalidParameters("window width must be positive"));
        }
        if exponent < window {
            return Err(DlogError::InvalidParameters(
                "subgroup exponent must be at least the window width",
            ));
        }
        let mut window_size: u64 = 1;
        for _ in 0..window {
            window_size = window_size.saturating_mul(prime.value());
            if window_size > MAX_WINDOW_SIZE {
                return Err(DlogError::InvalidParameters(
                    "window too wide for the digit representation",
                ));
            }
        }
        if prime == SubgroupPrime::Two && exponent % window != 0 {
            return Err(DlogError::InvalidParameters(
                "window width must divide the exponent for the two-torsion subgroup",
            ));
        }
        Ok(SubgroupParameters {
            prime,
            exponent,
            window,
            window_size,
            modulus: *modulus,
            field: DynResidueParams::new(modulus),
        })
    }

    pub fn prime(&self) -> SubgroupPrime {
        self.prime
    }

    /// The exponent e of the subgroup order ℓ^e.
    pub fn exponent(&self) -> usize {
        self.exponent
    }

    /// The window width w (digits of x are taken base ℓ^w).
    pub fn window(&self) -> usize {
        self.window
    }

    /// ℓ^w, the number of digit values per full window.
    pub fn window_size(&self) -> u64 {
        self.window_size
    }

    /// e mod w; a nonzero remainder means the most significant window is
    /// short and the split-table variant runs.
    pub fn remainder(&self) -> usize {
        self.exponent % self.window
    }

    /// Number of digit slots: e/w, plus one short window when w ∤ e.
    pub fn windows(&self) -> usize {
        if self.remainder() == 0 {
            self.exponent / self.window
        } else {
            self.exponent / self.window + 1
        }
    }

    pub fn modulus(&self) -> &Uint<LIMBS> {
        &self.modulus
    }

    pub fn field(&self) -> DynResidueParams<LIMBS> {
        self.field
    }

    /// Applies `ops` squarings (ℓ = 2) or cubings (ℓ = 3) to `value`; one
    /// window advance costs w of these.
    pub(crate) fn advance(&self, value: &Fp2<LIMBS>, ops: usize) -> Fp2<LIMBS> {
        let mut out = *value;
        match self.prime {
            SubgroupPrime::Two => {
                for _ in 0..ops {
                    out = out.square();
                }
            }
            SubgroupPrime::Three => {
                for _ in 0..ops {
                    out = out.cube();
                }
            }
        }
        out
    }
}

/// Precomputed tables for one context; the variant is selected by whether
/// the window width divides the exponent.
enum Tables<const LIMBS: usize> {
    Uniform(PowerTable<LIMBS>),
    Split {
        /// Entries invg^(d·ℓ^(w·u)); serves digit positions before the first
        /// window advance and the short most-significant leaf.
        aligned: PowerTable<LIMBS>,
        /// Entries invg^(d·ℓ^(e mod w + w·(u−1))); serves every position
        /// after the partial-width first advance.
        shifted: PowerTable<LIMBS>,
    },
}

/// A ready-to-solve discrete log context: parameters, power tables and the
/// strategy path, built once and immutable afterwards. Independent solves
/// may share one context across threads freely.
pub struct PohligHellman<const LIMBS: usize> {
    parameters: SubgroupParameters<LIMBS>,
    path: StrategyPath,
    tables: Tables<LIMBS>,
}

impl<const LIMBS: usize> PohligHellman<LIMBS> {
    /// Builds the tables and strategy path for solving logs relative to the
    /// generator whose inverse is `invg`.
    ///
    /// Fails if the level-0 table row is not injective, which happens when
    /// the order of `invg` is smaller than the window size.
    pub fn new(
        parameters: SubgroupParameters<LIMBS>,
        invg: &Fp2<LIMBS>,
    ) -> Result<PohligHellman<LIMBS>, DlogError> {
        let tables = if parameters.remainder() == 0 {
            Tables::Uniform(generator::build_uniform(&parameters, invg)?)
        } else {
            let (aligned, shifted) = generator::build_split(&parameters, invg)?;
            Tables::Split { aligned, shifted }
        };
        Ok(PohligHellman {
            path: StrategyPath::optimize(parameters.windows(), parameters.window() as u64, 1),
            parameters,
            tables,
        })
    }

    pub fn parameters(&self) -> &SubgroupParameters<LIMBS> {
        &self.parameters
    }

    /// Runs the split-table variant even when w | e (degenerate zero-width
    /// top window). Exists so the two traversals can be checked against each
    /// other; real contexts pick the variant automatically.
    #[cfg(test)]
    pub(crate) fn new_forced_split(
        parameters: SubgroupParameters<LIMBS>,
        invg: &Fp2<LIMBS>,
    ) -> Result<PohligHellman<LIMBS>, DlogError> {
        let (aligned, shifted) = generator::build_split(&parameters, invg)?;
        Ok(PohligHellman {
            path: StrategyPath::optimize(
                parameters.exponent() / parameters.window() + 1,
                parameters.window() as u64,
                1,
            ),
            parameters,
            tables: Tables::Split { aligned, shifted },
        })
    }
}
