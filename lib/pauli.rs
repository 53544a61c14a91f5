//! Single- and multi-qubit Pauli operators, with random sampling.

use std::fmt;
use rand::Rng;
use crate::error::{ Error, Result };

/// Overall phase of an [`NPauli`], a power of *i*.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    /// +1
    Pos,
    /// +*i*
    PosI,
    /// -1
    Neg,
    /// -*i*
    NegI,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Pos => write!(f, "+1"),
            Self::PosI => write!(f, "+i"),
            Self::Neg => write!(f, "-1"),
            Self::NegI => write!(f, "-i"),
        }
    }
}

impl Phase {
    /// Convert from a power of *i* (modulo 4), as stored in a tableau.
    pub fn from_quarter(r: u8) -> Self {
        match r % 4 {
            0 => Self::Pos,
            1 => Self::PosI,
            2 => Self::Neg,
            3 => Self::NegI,
            _ => unreachable!(),
        }
    }

    /// Convert to a power of *i*.
    pub fn to_quarter(self) -> u8 {
        match self {
            Self::Pos => 0,
            Self::PosI => 1,
            Self::Neg => 2,
            Self::NegI => 3,
        }
    }
}

/// Controls the overall phase drawn for a random [`NPauli`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PhaseMode {
    /// Always +1.
    #[default]
    None,
    /// ±1 with equal probability.
    Real,
    /// ±1 or ±*i* with equal probability.
    Full,
}

impl PhaseMode {
    fn sample<R>(self, rng: &mut R) -> Phase
    where R: Rng + ?Sized
    {
        match self {
            Self::None => Phase::Pos,
            Self::Real => Phase::from_quarter(2 * u8::from(rng.gen::<bool>())),
            Self::Full => Phase::from_quarter(rng.gen_range(0..4_u8)),
        }
    }
}

/// A single-qubit Pauli operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Pauli {
    /// Identity
    I,
    /// σ<sub>*x*</sub>
    X,
    /// σ<sub>*y*</sub>
    Y,
    /// σ<sub>*z*</sub>
    Z,
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::I => write!(f, "{}", if f.alternate() { "." } else { "I" }),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl Pauli {
    fn from_int(u: usize) -> Self {
        match u % 4 {
            0 => Self::I,
            1 => Self::X,
            2 => Self::Y,
            3 => Self::Z,
            _ => unreachable!(),
        }
    }

    /// Construct from the X and Z bits of the tableau representation.
    pub fn from_xz(x: bool, z: bool) -> Self {
        match (x, z) {
            (false, false) => Self::I,
            (true,  false) => Self::X,
            (true,  true ) => Self::Y,
            (false, true ) => Self::Z,
        }
    }

    /// Sample uniformly from {I, X, Y, Z}.
    pub fn gen<R>(rng: &mut R) -> Self
    where R: Rng + ?Sized
    {
        Self::from_int(rng.gen_range(0..4))
    }

    /// Sample I with probability `1 - p` and each of X, Y, Z with probability
    /// `p / 3`.
    ///
    /// `p` is assumed to lie in [0, 1].
    pub fn gen_noisy<R>(p: f64, rng: &mut R) -> Self
    where R: Rng + ?Sized
    {
        let r: f64 = rng.gen();
        if r < 1.0 - p {
            Self::I
        } else if r < 1.0 - 2.0 * p / 3.0 {
            Self::X
        } else if r < 1.0 - p / 3.0 {
            Self::Z
        } else {
            Self::Y
        }
    }
}

fn check_prob(p: f64) -> Result<()> {
    if (0.0..=1.0).contains(&p) { Ok(()) } else { Err(Error::Probability(p)) }
}

/// A single `n`-qubit Pauli operator with a phase.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NPauli {
    pub phase: Phase,
    pub ops: Vec<Pauli>,
}

impl fmt::Display for NPauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.phase.fmt(f)?;
        write!(f, " ")?;
        self.ops.iter()
            .try_for_each(|p| p.fmt(f))
    }
}

impl NPauli {
    /// Create the `n`-qubit identity with phase +1.
    pub fn identity(n: usize) -> Self {
        Self { phase: Phase::Pos, ops: vec![Pauli::I; n] }
    }

    /// Return the number of qubits.
    pub fn num_qubits(&self) -> usize { self.ops.len() }

    /// Return `true` if every single-qubit operator is the identity
    /// (regardless of phase).
    pub fn is_identity(&self) -> bool { self.ops.iter().all(|p| *p == Pauli::I) }

    /// Return the number of non-identity single-qubit operators.
    pub fn weight(&self) -> usize {
        self.ops.iter().filter(|p| **p != Pauli::I).count()
    }

    /// Sample a uniformly random `n`-qubit Pauli operator.
    pub fn gen<R>(n: usize, mode: PhaseMode, rng: &mut R) -> Self
    where R: Rng + ?Sized
    {
        let mut pauli = Self::identity(n);
        pauli.randomize(mode, rng);
        pauli
    }

    /// Sample an `n`-qubit Pauli operator where each qubit independently
    /// receives the identity with probability `1 - p` and each of X, Y, Z with
    /// probability `p / 3`.
    pub fn gen_noisy<R>(n: usize, p: f64, mode: PhaseMode, rng: &mut R)
        -> Result<Self>
    where R: Rng + ?Sized
    {
        let mut pauli = Self::identity(n);
        pauli.randomize_noisy(p, mode, rng)?;
        Ok(pauli)
    }

    /// Like [`Self::gen`], but overwriting `self` in place.
    pub fn randomize<R>(&mut self, mode: PhaseMode, rng: &mut R) -> &mut Self
    where R: Rng + ?Sized
    {
        self.ops.iter_mut()
            .for_each(|op| { *op = Pauli::gen(rng); });
        self.phase = mode.sample(rng);
        self
    }

    /// Like [`Self::gen_noisy`], but overwriting `self` in place.
    pub fn randomize_noisy<R>(&mut self, p: f64, mode: PhaseMode, rng: &mut R)
        -> Result<&mut Self>
    where R: Rng + ?Sized
    {
        check_prob(p)?;
        self.ops.iter_mut()
            .for_each(|op| { *op = Pauli::gen_noisy(p, rng); });
        self.phase = mode.sample(rng);
        Ok(self)
    }
}
