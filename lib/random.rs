//! Shorthand generators drawing from the thread-local default RNG.
//!
//! Tableau generators here always include random signs; use the `gen*`
//! functions on [`Destabilizer`], [`MixedDestabilizer`], and [`Stabilizer`]
//! for control over phases or the source of randomness.

use crate::{
    error::Result,
    pauli::{ NPauli, PhaseMode },
    stab::{ CliffordOp, Destabilizer, MixedDestabilizer, Stabilizer },
};

/// Sample a uniformly random destabilizer tableau on `n` qubits.
pub fn random_destabilizer(n: usize) -> Result<Destabilizer> {
    Destabilizer::gen(n, true, &mut rand::thread_rng())
}

/// Sample a random rank-`r` destabilizer tableau on `n` qubits.
pub fn random_destabilizer_rank(r: usize, n: usize)
    -> Result<MixedDestabilizer>
{
    MixedDestabilizer::gen(r, n, true, &mut rand::thread_rng())
}

/// Sample the stabilizers of a uniformly random `n`-qubit stabilizer state.
pub fn random_stabilizer(n: usize) -> Result<Stabilizer> {
    Stabilizer::gen(n, true, &mut rand::thread_rng())
}

/// Sample `r` of the stabilizers of a uniformly random `n`-qubit stabilizer
/// state.
pub fn random_stabilizer_rank(r: usize, n: usize) -> Result<Stabilizer> {
    Stabilizer::gen_rank(r, n, true, &mut rand::thread_rng())
}

/// Sample a uniformly random `n`-qubit Clifford operator.
pub fn random_clifford(n: usize) -> Result<CliffordOp> {
    CliffordOp::gen(n, &mut rand::thread_rng())
}

/// Sample a uniformly random `n`-qubit Pauli operator.
pub fn random_pauli(n: usize, mode: PhaseMode) -> NPauli {
    NPauli::gen(n, mode, &mut rand::thread_rng())
}

/// Sample an `n`-qubit Pauli operator from single-qubit depolarizing noise of
/// strength `p`.
pub fn random_pauli_noisy(n: usize, p: f64, mode: PhaseMode) -> Result<NPauli> {
    NPauli::gen_noisy(n, p, mode, &mut rand::thread_rng())
}
