//! Uniform sampling of random Clifford operators, stabilizer states, and
//! destabilizer tableaux on registers of qubits.
//!
//! Generation follows the canonical-form construction of Bravyi and Maslov
//! (Algorithm 2 of [arXiv:2003.09412][bm]), which draws a Hadamard layer and
//! qubit permutation from the quantum Mallows distribution and then fills in
//! two Hadamard-free layers with fair coin flips. The resulting symplectic
//! matrices are stored as bit-packed Aaronson-Gottesman tableaux.
//!
//! [bm]: https://arxiv.org/abs/2003.09412

pub mod error;
pub mod gf2;
pub mod mallows;
pub mod pauli;
pub mod stab;
pub mod canonical;
pub mod random;
