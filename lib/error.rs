//! Errors raised while sampling or inverting.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// The geometric sampler was given an empty range.
    #[error("geometric sampler bound must be at least 1; got {0}")]
    Domain(usize),

    /// The matrix has no inverse over GF(2).
    #[error("matrix is singular over GF(2)")]
    Singular,

    #[error("expected a square matrix; got {0} × {1}")]
    NotSquare(usize, usize),

    /// Rejection sampling of an invertible matrix ran past its retry cap.
    #[error("failed to draw an invertible {n} × {n} matrix after {tries} tries")]
    Exhausted { n: usize, tries: usize },

    #[error("rank {r} exceeds the number of qubits {n}")]
    Rank { r: usize, n: usize },

    #[error("flip probability must lie in [0, 1]; got {0}")]
    Probability(f64),
}

pub type Result<T> = std::result::Result<T, Error>;
