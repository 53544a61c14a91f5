//! Stabilizer and destabilizer tableaux for registers of qubits.
//!
//! In the tableau representation, a stabilizer state of *n* qubits is
//! identified by the *n* commuting *n*-qubit Pauli operators that stabilize
//! it. Each single-qubit Pauli needs only two bits (one marking an X factor
//! and one marking a Z factor, with both set for Y), plus an overall phase
//! stored as a power of the complex unit **i**. Following Aaronson and
//! Gottesman[^1], the stabilizers are complemented by *n* "destabilizers",
//! which together with the stabilizers generate the full *n*-qubit Pauli
//! group: destabilizer *i* anticommutes with stabilizer *i* and commutes with
//! everything else.
//!
//! The same 2*n* rows also describe a Clifford operator, read as the images of
//! X<sub>1</sub>, ..., X<sub>*n*</sub>, Z<sub>1</sub>, ..., Z<sub>*n*</sub>
//! under conjugation.
//!
//! Tableaux are generated by [`Destabilizer::gen`] and the related `gen*`
//! functions on the other types here; see [`canonical`][crate::canonical] for
//! the construction.
//!
//! # Example
//! ```
//! use clifford_gen::stab::Destabilizer;
//!
//! let mut rng = rand::thread_rng();
//! let destab = Destabilizer::gen(3, true, &mut rng).unwrap();
//! assert!(destab.as_tableau().is_symplectic());
//!
//! // print out the stabilizers and destabilizers
//! // `#` formatter suppresses identities; each line reads "stab | destab"
//! println!("{:#}", destab.as_group());
//! ```
//!
//! [^1]: [arXiv:quant-ph/0406196](https://arxiv.org/abs/quant-ph/0406196)

use std::fmt;
use itertools::Itertools;
use nalgebra as na;
use rand::Rng;
use crate::{
    canonical,
    error::{ Error, Result },
    gf2::{ BinMatrix, ExactInverse, Inverter, PW },
    pauli::{ NPauli, Pauli, Phase },
};

/// A list of `n`-qubit Pauli operators with phases, stored as bit planes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tableau {
    pub(crate) n: usize,
    // `x` and `z` are bit arrays of size rows × n; for space efficiency, the
    // columns are packed into u32s
    pub(crate) x: na::DMatrix<u32>, // Pauli-X bits; size rows × (floor(n / 32) + 1)
    pub(crate) z: na::DMatrix<u32>, // Pauli-Z bits; size rows × (floor(n / 32) + 1)
    pub(crate) r: na::DVector<u8>, // Phases (0 for +1, 1 for i, 2 for -1, 3 for -i)
    pub(crate) over32: usize, // = floor(n / 32) + 1
}

impl Tableau {
    /// Create a new tableau of identities on `n` qubits with `rows` rows.
    pub fn new(rows: usize, n: usize) -> Self {
        let over32: usize = (n >> 5) + 1;
        let x: na::DMatrix<u32> = na::DMatrix::zeros(rows, over32);
        let z: na::DMatrix<u32> = na::DMatrix::zeros(rows, over32);
        let r: na::DVector<u8> = na::DVector::zeros(rows);
        Self { n, x, z, r, over32 }
    }

    /// Pack a `rows × 2n` binary matrix, whose first `n` columns hold X bits
    /// and last `n` hold Z bits, along with phases given as powers of **i**.
    ///
    /// *Panics* if `xz` has an odd number of columns or if the number of
    /// phases doesn't match the number of rows.
    pub fn from_bits(xz: &BinMatrix, phases: &[u8]) -> Self {
        assert!(xz.ncols() % 2 == 0, "bit matrix must have an even number of columns");
        assert_eq!(xz.nrows(), phases.len(), "one phase is needed per row");
        let n = xz.ncols() / 2;
        let mut tab = Self::new(xz.nrows(), n);
        let mut j5: usize;
        let mut pw: u32;
        for (i, xz_i) in xz.row_iter().enumerate() {
            for j in 0..n {
                j5 = j >> 5;
                pw = PW[j & 31];
                if xz_i[j] & 1 != 0 { tab.x[(i, j5)] |= pw; }
                if xz_i[n + j] & 1 != 0 { tab.z[(i, j5)] |= pw; }
            }
        }
        tab.r.iter_mut().zip(phases)
            .for_each(|(r_i, ph)| { *r_i = ph % 4; });
        tab
    }

    /// Unpack into a `rows × 2n` binary matrix; the inverse of
    /// [`Self::from_bits`] without the phases.
    pub fn to_bits(&self) -> BinMatrix {
        let n = self.n;
        BinMatrix::from_fn(self.num_rows(), 2 * n, |i, j| {
            if j < n { u8::from(self.x(i, j)) } else { u8::from(self.z(i, j - n)) }
        })
    }

    /// Return the number of qubits.
    pub fn num_qubits(&self) -> usize { self.n }

    /// Return the number of rows.
    pub fn num_rows(&self) -> usize { self.r.len() }

    /// Return the X bit of the `j`-th qubit in the `i`-th row.
    pub fn x(&self, i: usize, j: usize) -> bool {
        self.x[(i, j >> 5)] & PW[j & 31] != 0
    }

    /// Return the Z bit of the `j`-th qubit in the `i`-th row.
    pub fn z(&self, i: usize, j: usize) -> bool {
        self.z[(i, j >> 5)] & PW[j & 31] != 0
    }

    /// Return the phase of the `i`-th row as a power of **i**.
    pub fn phase(&self, i: usize) -> u8 { self.r[i] }

    /// Return the phases of all rows as powers of **i**.
    pub fn phases(&self) -> &[u8] { self.r.as_slice() }

    /// Return the Pauli acting on the `j`-th qubit in the `i`-th row.
    pub fn pauli(&self, i: usize, j: usize) -> Pauli {
        Pauli::from_xz(self.x(i, j), self.z(i, j))
    }

    /// Return the `i`-th row as an [`NPauli`].
    pub fn row(&self, i: usize) -> NPauli {
        NPauli {
            phase: Phase::from_quarter(self.r[i]),
            ops: (0..self.n).map(|j| self.pauli(i, j)).collect(),
        }
    }

    /// Iterate over all rows as [`NPauli`]s.
    pub fn rows(&self) -> impl Iterator<Item = NPauli> + '_ {
        (0..self.num_rows()).map(|i| self.row(i))
    }

    // copy a subset of rows, in the order given
    pub(crate) fn select_rows(&self, idx: &[usize]) -> Self {
        Self {
            n: self.n,
            x: self.x.select_rows(idx.iter()),
            z: self.z.select_rows(idx.iter()),
            r: self.r.select_rows(idx.iter()),
            over32: self.over32,
        }
    }

    /// Return `true` if the operators in rows `a` and `b` commute.
    pub fn commutes(&self, a: usize, b: usize) -> bool {
        self.x.row(a).iter().zip(self.z.row(b).iter())
            .zip(self.z.row(a).iter().zip(self.x.row(b).iter()))
            .map(|((xa, zb), (za, xb))| ((xa & zb) ^ (za & xb)).count_ones())
            .sum::<u32>() % 2 == 0
    }

    /// Return the phase (as a power of **i**) of the product of row `a`'s
    /// operator with row `b`'s operator, with `a` on the left.
    pub fn row_mul_phase(&self, a: usize, b: usize) -> u8 {
        let mut e: i32 = 0;
        let xa = self.x.row(a);
        let xb = self.x.row(b);
        let za = self.z.row(a);
        let zb = self.z.row(b);
        for ((&xaj, &xbj), (&zaj, &zbj)) in
            xa.iter().zip(xb.iter()).zip(za.iter().zip(zb.iter()))
        {
            for &pw in PW.iter() {
                if xaj & pw != 0 && zaj & pw == 0 {
                    if xbj & pw != 0 && zbj & pw != 0 { e += 1; }
                    if xbj & pw == 0 && zbj & pw != 0 { e -= 1; }
                }
                if xaj & pw != 0 && zaj & pw != 0 {
                    if xbj & pw == 0 && zbj & pw != 0 { e += 1; }
                    if xbj & pw != 0 && zbj & pw == 0 { e -= 1; }
                }
                if xaj & pw == 0 && zaj & pw != 0 {
                    if xbj & pw != 0 && zbj & pw == 0 { e += 1; }
                    if xbj & pw != 0 && zbj & pw != 0 { e -= 1; }
                }
            }
        }
        e = (e + i32::from(self.r[b]) + i32::from(self.r[a])).rem_euclid(4);
        e as u8
    }

    /// Return `true` if `self` has 2*n* rows arranged as *n* destabilizers
    /// followed by *n* stabilizers, such that destabilizer *i* anticommutes
    /// with stabilizer *i* and all other pairs of rows commute.
    pub fn is_symplectic(&self) -> bool {
        let n = self.n;
        self.num_rows() == 2 * n
            && (0..2 * n).tuple_combinations()
                .all(|(a, b)| self.commutes(a, b) != (b == a + n))
    }
}

impl fmt::Display for Tableau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.num_rows();
        for (k, row) in self.rows().enumerate() {
            row.fmt(f)?;
            if k < rows - 1 { writeln!(f)?; }
        }
        Ok(())
    }
}

/// The complete `n`-qubit stabilizer/destabilizer groups for a given state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StabGroup {
    pub stab: Vec<NPauli>,
    pub destab: Vec<NPauli>,
}

impl fmt::Display for StabGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.stab.len();
        for (k, (stab, destab)) in
            self.stab.iter().zip(&self.destab).enumerate()
        {
            stab.fmt(f)?;
            write!(f, " | ")?;
            destab.fmt(f)?;
            if k < n - 1 { writeln!(f)?; }
        }
        Ok(())
    }
}

/// Like [`StabGroup`], but including the "logical operators" that fill out
/// extra rows in a mixed state tableau.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StabMGroup {
    pub destab: Vec<NPauli>,
    pub stab: Vec<NPauli>,
    pub logical: Vec<NPauli>,
}

impl fmt::Display for StabMGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.destab.is_empty() {
            writeln!(f, "Destab")?;
            for destab in self.destab.iter() { destab.fmt(f)?; writeln!(f)?; }
        }
        if !self.stab.is_empty() {
            writeln!(f, "Stab")?;
            for stab in self.stab.iter() { stab.fmt(f)?; writeln!(f)?; }
        }
        if !self.logical.is_empty() {
            writeln!(f, "Logical")?;
            for op in self.logical.iter() { op.fmt(f)?; writeln!(f)?; }
        }
        Ok(())
    }
}

/// A full-rank destabilizer tableau: rows `0..n` are destabilizers and rows
/// `n..2n` are stabilizers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Destabilizer(pub(crate) Tableau);

impl TryFrom<Tableau> for Destabilizer {
    type Error = Box<Tableau>;

    fn try_from(tab: Tableau) -> std::result::Result<Self, Self::Error> {
        if tab.is_symplectic() { Ok(Self(tab)) } else { Err(tab.into()) }
    }
}

impl From<Destabilizer> for Tableau {
    fn from(destab: Destabilizer) -> Self { destab.0 }
}

impl fmt::Display for Destabilizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_group().fmt(f)
    }
}

impl Destabilizer {
    /// Sample a uniformly random destabilizer tableau on `n` qubits.
    ///
    /// If `phases` is `true`, every row receives an independent random sign;
    /// otherwise all phases are +1.
    pub fn gen<R>(n: usize, phases: bool, rng: &mut R) -> Result<Self>
    where R: Rng + ?Sized
    {
        Self::gen_with(n, phases, &Inverter::default(), rng)
    }

    /// Like [`Self::gen`], but with a particular GF(2) [`Inverter`].
    pub fn gen_with<E, R>(
        n: usize,
        phases: bool,
        inverter: &Inverter<E>,
        rng: &mut R,
    ) -> Result<Self>
    where
        E: ExactInverse,
        R: Rng + ?Sized,
    {
        canonical::random_tableau(n, phases, inverter, rng).map(Self)
    }

    /// Return the number of qubits.
    pub fn num_qubits(&self) -> usize { self.0.n }

    pub fn as_tableau(&self) -> &Tableau { &self.0 }

    pub fn into_tableau(self) -> Tableau { self.0 }

    /// Copy out the stabilizer half.
    pub fn stabilizer(&self) -> Stabilizer {
        let n = self.0.n;
        Stabilizer(self.0.select_rows(&(n .. 2 * n).collect::<Vec<usize>>()))
    }

    /// Return the destabilizer rows as [`NPauli`]s.
    pub fn destabilizer(&self) -> Vec<NPauli> {
        (0..self.0.n).map(|i| self.0.row(i)).collect()
    }

    /// Convert to a more human-readable stabilizer/destabilizer group
    /// representation.
    pub fn as_group(&self) -> StabGroup {
        let n = self.0.n;
        StabGroup {
            stab: (n .. 2 * n).map(|i| self.0.row(i)).collect(),
            destab: (0..n).map(|i| self.0.row(i)).collect(),
        }
    }
}

/// A destabilizer tableau of which only `rank ≤ n` (de)stabilizers are
/// active.
///
/// Rows `0..rank` are destabilizers, `rank..n` are logical X operators,
/// `n..n + rank` are stabilizers and `n + rank..2n` are logical Z operators;
/// any tableau with `rank < n` describes a mixed state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MixedDestabilizer {
    pub(crate) rank: usize,
    pub(crate) tab: Tableau,
}

impl From<Destabilizer> for MixedDestabilizer {
    fn from(destab: Destabilizer) -> Self {
        let rank = destab.num_qubits();
        Self { rank, tab: destab.0 }
    }
}

impl TryFrom<MixedDestabilizer> for Destabilizer {
    type Error = Box<MixedDestabilizer>;

    fn try_from(mixed: MixedDestabilizer)
        -> std::result::Result<Self, Self::Error>
    {
        if mixed.is_pure() { Ok(Self(mixed.tab)) } else { Err(mixed.into()) }
    }
}

impl fmt::Display for MixedDestabilizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_group().fmt(f)
    }
}

impl MixedDestabilizer {
    /// Truncate a full-rank destabilizer to rank `r`.
    pub fn from_destabilizer(destab: Destabilizer, r: usize) -> Result<Self> {
        let n = destab.num_qubits();
        if r > n { return Err(Error::Rank { r, n }); }
        Ok(Self { rank: r, tab: destab.0 })
    }

    /// Sample a random destabilizer tableau on `n` qubits and truncate it to
    /// rank `r`.
    pub fn gen<R>(r: usize, n: usize, phases: bool, rng: &mut R) -> Result<Self>
    where R: Rng + ?Sized
    {
        if r > n { return Err(Error::Rank { r, n }); }
        Self::from_destabilizer(Destabilizer::gen(n, phases, rng)?, r)
    }

    /// Return the number of qubits.
    pub fn num_qubits(&self) -> usize { self.tab.n }

    /// Return the number of active stabilizers.
    pub fn rank(&self) -> usize { self.rank }

    /// Return `true` if `self` is a pure state.
    pub fn is_pure(&self) -> bool { self.rank == self.tab.n }

    pub fn as_tableau(&self) -> &Tableau { &self.tab }

    /// Copy out the active stabilizers.
    pub fn stabilizer(&self) -> Stabilizer {
        let n = self.tab.n;
        Stabilizer(
            self.tab.select_rows(&(n .. n + self.rank).collect::<Vec<usize>>())
        )
    }

    /// Return the active destabilizers as [`NPauli`]s.
    pub fn destabilizer(&self) -> Vec<NPauli> {
        (0..self.rank).map(|i| self.tab.row(i)).collect()
    }

    /// Return the logical X and Z operators, in that order.
    pub fn logical(&self) -> (Vec<NPauli>, Vec<NPauli>) {
        let n = self.tab.n;
        (
            (self.rank..n).map(|i| self.tab.row(i)).collect(),
            (n + self.rank .. 2 * n).map(|i| self.tab.row(i)).collect(),
        )
    }

    /// Convert to a more human-readable group representation.
    pub fn as_group(&self) -> StabMGroup {
        let (mut logical, logical_z) = self.logical();
        logical.extend(logical_z);
        StabMGroup {
            destab: self.destabilizer(),
            stab: self.stabilizer().0.rows().collect(),
            logical,
        }
    }
}

/// A list of `r ≤ n` commuting `n`-qubit stabilizers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stabilizer(pub(crate) Tableau);

impl fmt::Display for Stabilizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

impl Stabilizer {
    /// Sample the stabilizers of a uniformly random `n`-qubit stabilizer state.
    pub fn gen<R>(n: usize, phases: bool, rng: &mut R) -> Result<Self>
    where R: Rng + ?Sized
    {
        Destabilizer::gen(n, phases, rng).map(|destab| destab.stabilizer())
    }

    /// Sample the stabilizers of a uniformly random `n`-qubit stabilizer state
    /// and keep a uniformly random subset of `r` of them.
    ///
    /// The kept rows retain their relative order.
    pub fn gen_rank<R>(r: usize, n: usize, phases: bool, rng: &mut R)
        -> Result<Self>
    where R: Rng + ?Sized
    {
        if r > n { return Err(Error::Rank { r, n }); }
        let full = Self::gen(n, phases, rng)?;
        let keep: Vec<usize> =
            rand::seq::index::sample(rng, n, r).into_iter()
            .sorted()
            .collect();
        Ok(Self(full.0.select_rows(&keep)))
    }

    /// Return the number of qubits.
    pub fn num_qubits(&self) -> usize { self.0.n }

    /// Return the number of stabilizers.
    pub fn len(&self) -> usize { self.0.num_rows() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Return the `i`-th stabilizer.
    pub fn row(&self, i: usize) -> NPauli { self.0.row(i) }

    pub fn as_tableau(&self) -> &Tableau { &self.0 }

    /// Return `true` if all stabilizers mutually commute.
    pub fn is_commuting(&self) -> bool {
        (0..self.len()).tuple_combinations()
            .all(|(a, b)| self.0.commutes(a, b))
    }
}

/// An `n`-qubit Clifford operator, identified by its action on the Pauli
/// group.
///
/// Row `j` of the underlying tableau is the image of X<sub>*j*</sub> and row
/// `n + j` is the image of Z<sub>*j*</sub>.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliffordOp(pub(crate) Tableau);

impl From<Destabilizer> for CliffordOp {
    fn from(destab: Destabilizer) -> Self { Self(destab.0) }
}

impl fmt::Display for CliffordOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.0.n;
        for j in 0..n {
            write!(f, "X{j} ↦ ")?;
            self.image_x(j).fmt(f)?;
            writeln!(f)?;
        }
        for j in 0..n {
            write!(f, "Z{j} ↦ ")?;
            self.image_z(j).fmt(f)?;
            if j < n - 1 { writeln!(f)?; }
        }
        Ok(())
    }
}

impl CliffordOp {
    /// Sample a uniformly random element of the `n`-qubit Clifford group,
    /// including random signs.
    pub fn gen<R>(n: usize, rng: &mut R) -> Result<Self>
    where R: Rng + ?Sized
    {
        Destabilizer::gen(n, true, rng).map(Self::from)
    }

    /// Return the number of qubits.
    pub fn num_qubits(&self) -> usize { self.0.n }

    /// Return the image of X on the `j`-th qubit.
    pub fn image_x(&self, j: usize) -> NPauli { self.0.row(j) }

    /// Return the image of Z on the `j`-th qubit.
    pub fn image_z(&self, j: usize) -> NPauli { self.0.row(self.0.n + j) }

    pub fn as_tableau(&self) -> &Tableau { &self.0 }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{ rngs::StdRng, SeedableRng };
    use rustc_hash::FxHashSet;
    use crate::gf2;

    fn bell_tableau() -> Tableau {
        // destabilizers Z., .X; stabilizers XX, ZZ
        let xz = BinMatrix::from_row_slice(4, 4, &[
            0, 0, 1, 0,
            0, 1, 0, 0,
            1, 1, 0, 0,
            0, 0, 1, 1,
        ]);
        Tableau::from_bits(&xz, &[0, 0, 0, 2])
    }

    #[test]
    fn pack_unpack() {
        let tab = bell_tableau();
        assert_eq!(tab.num_qubits(), 2);
        assert_eq!(tab.num_rows(), 4);
        assert!(tab.x(2, 0) && tab.x(2, 1) && !tab.z(2, 0));
        assert_eq!(tab.pauli(0, 0), Pauli::Z);
        assert_eq!(tab.pauli(0, 1), Pauli::I);
        assert_eq!(tab.phase(3), 2);
        assert_eq!(format!("{:#}", tab.row(3)), "-1 ZZ");
        let xz = tab.to_bits();
        assert_eq!(Tableau::from_bits(&xz, tab.phases()), tab);
    }

    #[test]
    fn pack_wide() {
        // more than 32 qubits spills into a second word
        let n = 40;
        let xz = BinMatrix::from_fn(1, 2 * n, |_, j| u8::from(j == 35 || j == n + 39));
        let tab = Tableau::from_bits(&xz, &[1]);
        assert_eq!(tab.over32, 2);
        assert_eq!(tab.pauli(0, 35), Pauli::X);
        assert_eq!(tab.pauli(0, 39), Pauli::Z);
        assert_eq!(tab.row(0).weight(), 2);
        assert_eq!(tab.to_bits(), xz);
    }

    #[test]
    fn bell_is_symplectic() {
        let tab = bell_tableau();
        assert!(tab.is_symplectic());
        assert!(tab.commutes(2, 3));
        assert!(!tab.commutes(0, 2));
        assert!(Destabilizer::try_from(tab).is_ok());

        let mut bad = bell_tableau();
        bad.z[(1, 0)] = 0b01; // .X -> ZX
        assert!(!bad.is_symplectic());
        assert!(Destabilizer::try_from(bad).is_err());
    }

    #[test]
    fn row_mul_phase_values() {
        // X Z = -i Y, Z X = i Y
        let xz = BinMatrix::from_row_slice(3, 2, &[
            1, 0,
            0, 1,
            1, 1,
        ]);
        let tab = Tableau::from_bits(&xz, &[0, 0, 2]);
        assert_eq!(tab.row_mul_phase(0, 1), 3);
        assert_eq!(tab.row_mul_phase(1, 0), 1);
        // every Hermitian row squares to +1
        for i in 0..3 { assert_eq!(tab.row_mul_phase(i, i), 0); }
    }

    #[test]
    fn destabilizer_symplectic_small() {
        let mut rng = StdRng::seed_from_u64(12);
        for n in 1..=20 {
            for _ in 0..10 {
                let destab = Destabilizer::gen(n, true, &mut rng).unwrap();
                assert!(destab.as_tableau().is_symplectic(), "n = {n}");
                assert!(destab.stabilizer().is_commuting());
            }
        }
    }

    #[test]
    fn no_phases() {
        let mut rng = StdRng::seed_from_u64(13);
        for _ in 0..50 {
            let destab = Destabilizer::gen(2, false, &mut rng).unwrap();
            assert!(destab.as_tableau().phases().iter().all(|r| *r == 0));
        }
    }

    #[test]
    fn real_phases() {
        let mut rng = StdRng::seed_from_u64(14);
        let mut seen = FxHashSet::default();
        for _ in 0..50 {
            let destab = Destabilizer::gen(3, true, &mut rng).unwrap();
            let tab = destab.as_tableau();
            assert!(tab.phases().iter().all(|r| *r == 0 || *r == 2));
            seen.extend(tab.phases().iter().copied());
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn single_qubit_states() {
        let mut rng = StdRng::seed_from_u64(15);
        let mut states: FxHashSet<NPauli> = FxHashSet::default();
        for _ in 0..600 {
            let destab = Destabilizer::gen(1, true, &mut rng).unwrap();
            let tab = destab.as_tableau();
            assert_eq!(tab.row_mul_phase(0, 0), 0);
            assert_eq!(tab.row_mul_phase(1, 1), 0);
            let stab = tab.row(1);
            assert!(!stab.is_identity());
            states.insert(stab);
        }
        // ±X, ±Y, ±Z
        assert_eq!(states.len(), 6);
    }

    #[test]
    fn single_qubit_cliffords() {
        // up to sign, the images of (X, Z) are the 6 ordered pairs of
        // distinct non-identity Paulis
        let mut rng = StdRng::seed_from_u64(16);
        let mut images: FxHashSet<(Pauli, Pauli)> = FxHashSet::default();
        for _ in 0..2000 {
            let cliff = CliffordOp::gen(1, &mut rng).unwrap();
            images.insert((cliff.image_x(0).ops[0], cliff.image_z(0).ops[0]));
        }
        assert_eq!(images.len(), 6);
    }

    #[test]
    fn mixed_rank() {
        let mut rng = StdRng::seed_from_u64(17);
        for n in 1..=8 {
            for r in 0..=n {
                let destab = Destabilizer::gen(n, true, &mut rng).unwrap();
                let mixed =
                    MixedDestabilizer::from_destabilizer(destab.clone(), r)
                    .unwrap();
                assert_eq!(mixed.rank(), r);
                assert_eq!(mixed.is_pure(), r == n);
                let stab = mixed.stabilizer();
                assert_eq!(stab.len(), r);
                for i in 0..r {
                    assert_eq!(stab.row(i), destab.as_tableau().row(n + i));
                }
                assert_eq!(gf2::rank(&stab.as_tableau().to_bits()), r);
                assert_eq!(mixed.destabilizer().len(), r);
                let (lx, lz) = mixed.logical();
                assert_eq!(lx.len(), n - r);
                assert_eq!(lz.len(), n - r);
            }
        }
    }

    #[test]
    fn mixed_rank_too_large() {
        let mut rng = StdRng::seed_from_u64(18);
        assert_eq!(
            MixedDestabilizer::gen(4, 3, true, &mut rng),
            Err(Error::Rank { r: 4, n: 3 }),
        );
        let destab = Destabilizer::gen(2, true, &mut rng).unwrap();
        assert!(MixedDestabilizer::from_destabilizer(destab, 3).is_err());
    }

    #[test]
    fn mixed_pure_roundtrip() {
        let mut rng = StdRng::seed_from_u64(19);
        let destab = Destabilizer::gen(4, true, &mut rng).unwrap();
        let mixed = MixedDestabilizer::from(destab.clone());
        assert_eq!(Destabilizer::try_from(mixed), Ok(destab.clone()));
        let mixed = MixedDestabilizer::from_destabilizer(destab, 2).unwrap();
        assert!(Destabilizer::try_from(mixed).is_err());
    }

    #[test]
    fn stabilizer_subset() {
        let mut rng = StdRng::seed_from_u64(20);
        for n in 1..=10 {
            for r in 0..=n {
                let stab = Stabilizer::gen_rank(r, n, true, &mut rng).unwrap();
                assert_eq!(stab.len(), r);
                assert_eq!(stab.num_qubits(), n);
                assert!(stab.is_commuting());
                assert_eq!(gf2::rank(&stab.as_tableau().to_bits()), r);
            }
        }
        assert!(Stabilizer::gen_rank(3, 2, true, &mut rng).is_err());
    }

    #[test]
    fn stabilizer_subset_rows_in_order() {
        for seed in 0..20 {
            for (r, n) in [(1, 4), (3, 6), (5, 9), (4, 4)] {
                let mut rng_full = StdRng::seed_from_u64(seed);
                let mut rng_sub = StdRng::seed_from_u64(seed);
                let full = Stabilizer::gen(n, true, &mut rng_full).unwrap();
                let sub = Stabilizer::gen_rank(r, n, true, &mut rng_sub).unwrap();
                assert_eq!(sub.len(), r);
                let mut last: Option<usize> = None;
                for i in 0..r {
                    let row = sub.row(i);
                    let k = (0..n).find(|k| full.row(*k) == row)
                        .unwrap_or_else(|| panic!("row {i} not in full stabilizer"));
                    if let Some(prev) = last { assert!(k > prev); }
                    last = Some(k);
                }
            }
        }
    }

    #[test]
    fn display_group() {
        let destab = Destabilizer::try_from(bell_tableau()).unwrap();
        assert_eq!(
            format!("{:#}", destab),
            "+1 XX | +1 Z.\n-1 ZZ | +1 .X",
        );
        let mixed = MixedDestabilizer::from_destabilizer(destab, 1).unwrap();
        assert_eq!(
            format!("{:#}", mixed),
            "Destab\n+1 Z.\nStab\n+1 XX\nLogical\n+1 .X\n-1 ZZ\n",
        );
    }
}
