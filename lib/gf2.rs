//! Exact linear algebra over GF(2).
//!
//! Matrices are stored densely as [`nalgebra::DMatrix<u8>`] with every entry
//! in {0, 1}. Internally, elimination works on rows whose columns are packed
//! into `u32`s, in the same way that the [tableau][crate::stab::Tableau] packs
//! its Pauli bits.
//!
//! Inversion follows a dual strategy. Below a crossover order (default
//! [`INVERSE_CROSSOVER`]) the matrix is inverted in floating point and the
//! integer adjugate is recovered by scaling with the determinant, after which
//! every entry is reduced modulo 2. This is fast, but only correct as long as
//! round-off can't flip a bit, so the result is checked before it is returned.
//! At or above the crossover (or whenever the check fails), inversion is done
//! by Gauss-Jordan elimination with exact bit arithmetic through an
//! [`ExactInverse`] backend.

use log::{ debug, trace };
use nalgebra as na;
use rand::Rng;
use crate::error::{ Error, Result };

/// A dense binary matrix; all arithmetic is modulo 2.
pub type BinMatrix = na::DMatrix<u8>;

/// Order at which inversion switches from floating point to exact
/// elimination.
pub const INVERSE_CROSSOVER: usize = 200;

/// Cap on the number of draws made by [`random_invertible`].
pub const MAX_INVERTIBLE_TRIES: usize = 10_000;

pub(crate) const PW: [u32; 32] = [ // PW[i] = 2^i
    1, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024, 2048, 4096, 8192, 16384, 32768,
    65536, 131072, 262144, 524288, 1048576, 2097152, 4194304, 8388608, 16777216,
    33554432, 67108864, 134217728, 268435456, 536870912, 1073741824, 2147483648
];

// rows of a binary matrix, with columns packed into u32s
#[derive(Clone, Debug, PartialEq, Eq)]
struct PackedRows {
    cols: usize,
    over32: usize, // = floor(cols / 32) + 1
    rows: Vec<Vec<u32>>,
}

impl PackedRows {
    fn zeros(nrows: usize, cols: usize) -> Self {
        let over32: usize = (cols >> 5) + 1;
        Self { cols, over32, rows: vec![vec![0; over32]; nrows] }
    }

    fn identity(n: usize) -> Self {
        let mut ident = Self::zeros(n, n);
        for (i, row) in ident.rows.iter_mut().enumerate() {
            row[i >> 5] = PW[i & 31];
        }
        ident
    }

    fn from_matrix(m: &BinMatrix) -> Self {
        let mut packed = Self::zeros(m.nrows(), m.ncols());
        for (mi, row) in m.row_iter().zip(packed.rows.iter_mut()) {
            for (j, mij) in mi.iter().enumerate() {
                if mij & 1 != 0 { row[j >> 5] |= PW[j & 31]; }
            }
        }
        packed
    }

    fn to_matrix(&self) -> BinMatrix {
        BinMatrix::from_fn(self.rows.len(), self.cols, |i, j| {
            u8::from(self.rows[i][j >> 5] & PW[j & 31] != 0)
        })
    }

    // row b ^= row a
    fn xor_row(&mut self, a: usize, b: usize) {
        for w in 0..self.over32 {
            let x = self.rows[a][w];
            self.rows[b][w] ^= x;
        }
    }

    // row b ^= row a of other
    fn xor_row_from(&mut self, other: &Self, a: usize, b: usize) {
        self.rows[b].iter_mut()
            .zip(other.rows[a].iter())
            .for_each(|(wb, wa)| { *wb ^= *wa; });
    }

    // reduce to row-echelon form, mirroring every row operation on `aux`;
    // returns the rank
    fn reduce(&mut self, mut aux: Option<&mut PackedRows>) -> usize {
        let nrows = self.rows.len();
        let mut i: usize = 0;
        for j in 0..self.cols {
            if i == nrows { break; }
            let j5: usize = j >> 5;
            let pw: u32 = PW[j & 31];
            let Some(p) = (i..nrows).find(|q| self.rows[*q][j5] & pw != 0)
                else { continue; };
            self.rows.swap(p, i);
            if let Some(aux) = aux.as_deref_mut() { aux.rows.swap(p, i); }
            for k in 0..nrows {
                if k != i && self.rows[k][j5] & pw != 0 {
                    self.xor_row(i, k);
                    if let Some(aux) = aux.as_deref_mut() { aux.xor_row(i, k); }
                }
            }
            i += 1;
        }
        i
    }
}

fn check_square(m: &BinMatrix) -> Result<usize> {
    if m.is_square() {
        Ok(m.nrows())
    } else {
        Err(Error::NotSquare(m.nrows(), m.ncols()))
    }
}

/// Compute the rank of a matrix over GF(2).
pub fn rank(m: &BinMatrix) -> usize {
    PackedRows::from_matrix(m).reduce(None)
}

/// Return `true` if `m` is square and invertible over GF(2).
pub fn is_invertible(m: &BinMatrix) -> bool {
    m.is_square() && rank(m) == m.nrows()
}

/// Compute the matrix product `a b` modulo 2.
///
/// *Panics* if the inner dimensions don't match.
pub fn mul(a: &BinMatrix, b: &BinMatrix) -> BinMatrix {
    assert_eq!(a.ncols(), b.nrows(), "mismatched inner dimensions");
    let b_rows = PackedRows::from_matrix(b);
    let mut prod = PackedRows::zeros(a.nrows(), b.ncols());
    for (i, ai) in a.row_iter().enumerate() {
        for (k, aik) in ai.iter().enumerate() {
            if aik & 1 != 0 { prod.xor_row_from(&b_rows, k, i); }
        }
    }
    prod.to_matrix()
}

/// Draw a uniformly random invertible `n × n` matrix by rejection sampling
/// over independent fair-coin entries.
///
/// About 29% of all binary matrices are invertible for any `n`, so this
/// almost always succeeds within a handful of draws; if it doesn't within
/// [`MAX_INVERTIBLE_TRIES`], the random source is assumed to be broken and
/// [`Error::Exhausted`] is returned.
pub fn random_invertible<R>(n: usize, rng: &mut R) -> Result<BinMatrix>
where R: Rng + ?Sized
{
    for tries in 1..=MAX_INVERTIBLE_TRIES {
        let m = BinMatrix::from_fn(n, n, |_, _| u8::from(rng.gen::<bool>()));
        if is_invertible(&m) {
            trace!("drew invertible {n} × {n} matrix after {tries} tries");
            return Ok(m);
        }
    }
    Err(Error::Exhausted { n, tries: MAX_INVERTIBLE_TRIES })
}

/// An exact GF(2) inversion backend.
///
/// Implementors must return the exact inverse or [`Error::Singular`].
pub trait ExactInverse {
    fn inverse(&self, m: &BinMatrix) -> Result<BinMatrix>;
}

/// Gauss-Jordan elimination on bit-packed rows.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GaussJordan;

impl ExactInverse for GaussJordan {
    fn inverse(&self, m: &BinMatrix) -> Result<BinMatrix> {
        let n = check_square(m)?;
        let mut rows = PackedRows::from_matrix(m);
        let mut inv = PackedRows::identity(n);
        if rows.reduce(Some(&mut inv)) < n { return Err(Error::Singular); }
        Ok(inv.to_matrix())
    }
}

// invert over the reals, recover the adjugate, and reduce mod 2; `None` if the
// result can't be trusted
fn inverse_float(m: &BinMatrix) -> Option<BinMatrix> {
    let n = m.nrows();
    let lu = m.map(f64::from).lu();
    let det = lu.determinant();
    if !det.is_finite() || (det.round() as i64).rem_euclid(2) == 0 {
        return None;
    }
    let adj = lu.try_inverse()? * det;
    let inv = adj.map(|a| (a.round() as i64).rem_euclid(2) as u8);
    (mul(m, &inv) == BinMatrix::identity(n, n)).then_some(inv)
}

/// GF(2) matrix inverter implementing the dual-precision strategy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Inverter<E = GaussJordan> {
    crossover: usize,
    exact: E,
}

impl Default for Inverter {
    fn default() -> Self { Self::new() }
}

impl Inverter {
    /// Create a new inverter with crossover [`INVERSE_CROSSOVER`] and the
    /// [`GaussJordan`] backend.
    pub fn new() -> Self {
        Self { crossover: INVERSE_CROSSOVER, exact: GaussJordan }
    }
}

impl<E> Inverter<E>
where E: ExactInverse
{
    /// Create a new inverter with crossover [`INVERSE_CROSSOVER`] and a given
    /// exact backend.
    pub fn with_backend(exact: E) -> Self {
        Self { crossover: INVERSE_CROSSOVER, exact }
    }

    /// Set the matrix order at which the exact backend takes over.
    ///
    /// A crossover of zero disables the floating-point path entirely.
    pub fn with_crossover(mut self, crossover: usize) -> Self {
        self.crossover = crossover;
        self
    }

    pub fn crossover(&self) -> usize { self.crossover }

    /// Invert a square matrix over GF(2).
    pub fn invert(&self, m: &BinMatrix) -> Result<BinMatrix> {
        let n = check_square(m)?;
        if n == 0 { return Ok(BinMatrix::zeros(0, 0)); }
        if n < self.crossover {
            if let Some(inv) = inverse_float(m) { return Ok(inv); }
            debug!(
                "floating-point inverse of order {n} failed verification; \
                falling back to exact elimination"
            );
        }
        self.exact.inverse(m)
    }
}

/// Invert a square matrix over GF(2) using the default [`Inverter`].
pub fn inverse(m: &BinMatrix) -> Result<BinMatrix> {
    Inverter::default().invert(m)
}
