//! Random Clifford group elements from the Bravyi-Maslov canonical form.
//!
//! Every element of the *n*-qubit Clifford group can be written (up to Pauli
//! signs) as
//!
//! > *F*<sub>1</sub> *H* *S* *F*<sub>2</sub>
//!
//! where *H* is a layer of Hadamards, *S* is a qubit permutation, and each
//! *F*<sub>*k*</sub> is a Hadamard-free Clifford with block form
//!
//! ```text
//! ⎡ Δ      0     ⎤
//! ⎣ ΓΔ     Δ^-T  ⎦
//! ```
//!
//! for a unit lower-triangular Δ and a symmetric Γ. The pair (*H*, *S*) is drawn
//! from the quantum Mallows distribution (see [`mallows`][crate::mallows]),
//! after which the entries of Γ, Δ (for *F*<sub>1</sub>) and Γ′, Δ′ (for
//! *F*<sub>2</sub>) are either forced to zero or drawn as fair coins, depending
//! on the Hadamard layer and the relative order of each pair of permuted
//! qubits. The result is a uniformly random element of the group; see
//! Algorithm 2 of [arXiv:2003.09412][bm].
//!
//! [bm]: https://arxiv.org/abs/2003.09412

use log::debug;
use rand::Rng;
use crate::{
    error::Result,
    gf2::{ self, BinMatrix, ExactInverse, Inverter },
    mallows::sample_qmallows,
    stab::Tableau,
};

fn coin<R>(rng: &mut R) -> u8
where R: Rng + ?Sized
{
    u8::from(rng.gen::<bool>())
}

// draw the strict lower triangle of `mat` as fair coins, optionally mirroring
// into the upper triangle
fn fill_tril<R>(mat: &mut BinMatrix, symmetric: bool, rng: &mut R)
where R: Rng + ?Sized
{
    let n = mat.nrows();
    for i in 0..n {
        for j in 0..i {
            mat[(i, j)] = coin(rng);
            if symmetric { mat[(j, i)] = mat[(i, j)]; }
        }
    }
}

// draw a symmetric pair of off-diagonal entries
fn fill_sym<R>(mat: &mut BinMatrix, i: usize, j: usize, rng: &mut R)
where R: Rng + ?Sized
{
    let b = coin(rng);
    mat[(i, j)] = b;
    mat[(j, i)] = b;
}

// 2n × 2n block matrix with the upper-right quadrant zeroed
fn blocks(delta: &BinMatrix, prod: &BinMatrix, inv_delta: &BinMatrix)
    -> BinMatrix
{
    let n = delta.nrows();
    let mut f = BinMatrix::zeros(2 * n, 2 * n);
    f.view_mut((0, 0), (n, n)).copy_from(delta);
    f.view_mut((n, 0), (n, n)).copy_from(prod);
    f.view_mut((n, n), (n, n)).copy_from(inv_delta);
    f
}

/// The free parameters of a Clifford group element in canonical form.
///
/// `delta` and `gamma` belong to the left Hadamard-free factor *F*<sub>1</sub>;
/// `delta_p` and `gamma_p` belong to the right factor *F*<sub>2</sub>.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanonicalForm {
    /// Hadamard layer; `true` marks a Hadamard on that qubit.
    pub had: Vec<bool>,
    /// Qubit permutation (0-based).
    pub perm: Vec<usize>,
    /// Unit lower-triangular.
    pub delta: BinMatrix,
    /// Unit lower-triangular.
    pub delta_p: BinMatrix,
    /// Symmetric.
    pub gamma: BinMatrix,
    /// Symmetric.
    pub gamma_p: BinMatrix,
}

impl CanonicalForm {
    /// Draw the Hadamard layer and permutation from the quantum Mallows
    /// distribution and fill in the remaining matrices with
    /// [`Self::sample`].
    pub fn gen<R>(n: usize, rng: &mut R) -> Result<Self>
    where R: Rng + ?Sized
    {
        let (had, perm) = sample_qmallows(n, rng)?;
        Ok(Self::sample(had, perm, rng))
    }

    /// Draw `delta`, `delta_p`, `gamma`, and `gamma_p` for a given Hadamard
    /// layer and permutation.
    ///
    /// *Panics* if `had` and `perm` have different lengths.
    pub fn sample<R>(had: Vec<bool>, perm: Vec<usize>, rng: &mut R) -> Self
    where R: Rng + ?Sized
    {
        assert_eq!(had.len(), perm.len(), "mismatched Hadamard layer and permutation");
        let n = had.len();
        let mut delta = BinMatrix::identity(n, n);
        let mut delta_p = BinMatrix::identity(n, n);
        let mut gamma = BinMatrix::zeros(n, n);
        let mut gamma_p = BinMatrix::zeros(n, n);

        for i in 0..n {
            gamma_p[(i, i)] = coin(rng);
        }
        for (i, _) in had.iter().enumerate().filter(|(_, h)| **h) {
            gamma[(i, i)] = coin(rng);
        }
        fill_tril(&mut gamma_p, true, rng);
        fill_tril(&mut delta_p, false, rng);

        // off-diagonal entries of gamma and delta obey conditions C1-C5:
        // - C1: gamma = 0 if neither qubit has a Hadamard
        // - C2: gamma = 0 if only the row qubit has one and S[row] > S[col]
        // - C3: delta = 0 if neither qubit has one and S[row] > S[col]
        // - C4: delta = 0 if both have one and S[row] < S[col]
        // - C5: delta = 0 if only the row qubit has one
        for row in 0..n {
            for col in 0..row {
                let ordered = perm[row] < perm[col];
                match (had[row], had[col]) {
                    (true, true) => {
                        fill_sym(&mut gamma, row, col, rng);
                        if !ordered { delta[(row, col)] = coin(rng); }
                    },
                    (true, false) if ordered => {
                        fill_sym(&mut gamma, row, col, rng);
                    },
                    (false, true) => {
                        delta[(row, col)] = coin(rng);
                        if !ordered { fill_sym(&mut gamma, row, col, rng); }
                    },
                    (false, false) if ordered => {
                        delta[(row, col)] = coin(rng);
                    },
                    _ => { },
                }
            }
        }

        Self { had, perm, delta, delta_p, gamma, gamma_p }
    }

    /// Return the number of qubits.
    pub fn num_qubits(&self) -> usize { self.had.len() }

    /// Return the number of Hadamards in the layer.
    pub fn num_hadamards(&self) -> usize {
        self.had.iter().filter(|h| **h).count()
    }

    /// Multiply out the canonical form into a `2n × 2n` symplectic matrix,
    /// whose rows are the images of X<sub>1</sub>, ..., X<sub>*n*</sub>,
    /// Z<sub>1</sub>, ..., Z<sub>*n*</sub> and whose first and last `n`
    /// columns hold X and Z bits, respectively.
    pub fn assemble<E>(&self, inverter: &Inverter<E>) -> Result<BinMatrix>
    where E: ExactInverse
    {
        let n = self.num_qubits();
        let prod = gf2::mul(&self.gamma, &self.delta);
        let prod_p = gf2::mul(&self.gamma_p, &self.delta_p);
        let inv_delta = inverter.invert(&self.delta.transpose())?;
        let inv_delta_p = inverter.invert(&self.delta_p.transpose())?;
        let f1 = blocks(&self.delta, &prod, &inv_delta);
        let f2 = blocks(&self.delta_p, &prod_p, &inv_delta_p);

        // permute the X and Z halves of F2 together
        let mut u = BinMatrix::zeros(2 * n, 2 * n);
        for (i, s) in self.perm.iter().copied().enumerate() {
            u.row_mut(i).copy_from(&f2.row(s));
            u.row_mut(i + n).copy_from(&f2.row(s + n));
        }
        // Hadamard layer
        for (i, _) in self.had.iter().enumerate().filter(|(_, h)| **h) {
            u.swap_rows(i, i + n);
        }
        Ok(gf2::mul(&f1, &u))
    }
}

/// Generate a uniformly random `n`-qubit destabilizer tableau.
///
/// If `phases` is `true`, each of the 2`n` rows gets an independent random
/// sign; otherwise all phases are +1.
pub fn random_tableau<E, R>(
    n: usize,
    phases: bool,
    inverter: &Inverter<E>,
    rng: &mut R,
) -> Result<Tableau>
where
    E: ExactInverse,
    R: Rng + ?Sized,
{
    let form = CanonicalForm::gen(n, rng)?;
    let xz = form.assemble(inverter)?;
    let r: Vec<u8> =
        if phases {
            (0 .. 2 * n).map(|_| 2 * coin(rng)).collect()
        } else {
            vec![0; 2 * n]
        };
    debug!("generated {n}-qubit tableau with {} Hadamards", form.num_hadamards());
    Ok(Tableau::from_bits(&xz, &r))
}
