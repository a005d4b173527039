//! Windowed Pohlig-Hellman discrete logarithm solver for cyclic subgroups of
//! smooth prime-power order ℓ^e (ℓ ∈ {2, 3}) inside the norm-1 subgroup of
//! GF(p²), the setting used by isogeny-based public-key compression.
//!
//! The solver extracts w base-ℓ digits of the exponent per table lookup and
//! schedules the lookups with a cost-optimal divide-and-conquer strategy, so
//! rebalancing the partial value between lookups stays cheap even for
//! exponents of several hundred digits.

pub mod fp2;
pub mod pohlig_hellman;
pub mod utils;

use thiserror::Error;

pub use fp2::{Fp2, Fp2Repr};
pub use pohlig_hellman::{PohligHellman, SubgroupParameters, SubgroupPrime};

/// Errors surfaced by table construction and discrete log solving.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DlogError {
    /// The (prime, exponent, window) configuration is inconsistent; detected
    /// before any table is built.
    #[error("invalid subgroup configuration: {0}")]
    InvalidParameters(&'static str),

    /// The leaf scan exhausted a table row without finding the conjugated
    /// partial value. Either the input lies outside the order-ℓ^e subgroup
    /// or the precomputed tables are corrupted; the solve must be aborted,
    /// since any guessed digit would silently corrupt the recombined
    /// exponent.
    #[error("no table entry matches the partial value for window {window}")]
    TableMiss { window: usize },
}
