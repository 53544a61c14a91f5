//! Sampling from the quantum Mallows distribution.
//!
//! See Algorithm 1 of [arXiv:2003.09412][bm] for details. Each Clifford group
//! element has a canonical form built around a layer of Hadamards and a qubit
//! permutation; drawing both jointly from the quantum Mallows distribution
//! *P*<sub>*n*</sub>(*h*, *S*) is what makes the Clifford sampled in
//! [`canonical`][crate::canonical] uniform over the whole group.
//!
//! [bm]: https://arxiv.org/abs/2003.09412

use num_bigint::{ BigUint, RandBigInt };
use rand::Rng;
use crate::error::{ Error, Result };

/// Largest bound for which [`sample_geometric`] uses exact `u64` arithmetic.
pub const GEOM_EXACT_MAX: usize = 63;

/// Largest bound for which [`sample_geometric`] uses `f64` arithmetic; above
/// this, arbitrary-precision integers are used instead.
pub const GEOM_FLOAT_MAX: usize = 1000;

/// Draw an integer *k* ∈ [1, `n`] with probability proportional to
/// 2<sup>*k*</sup>.
///
/// Exactly, *P*(*k* = *i*) = 2<sup>*i* - 1</sup> / (2<sup>*n*</sup> - 1),
/// which is the distribution of ⌈log<sub>2</sub> *u*⌉ for *u* uniform over [2,
/// 2<sup>*n*</sup>]. Fails if `n` is zero.
pub fn sample_geometric<R>(n: usize, rng: &mut R) -> Result<usize>
where R: Rng + ?Sized
{
    if n < 1 { return Err(Error::Domain(n)); }
    let k: usize =
        if n <= GEOM_EXACT_MAX {
            let u: u64 = rng.gen_range(2..=1_u64 << n);
            (u64::BITS - (u - 1).leading_zeros()) as usize
        } else if n <= GEOM_FLOAT_MAX {
            // uniform over (1, 2^n] has the same distribution of ceil(log2)
            let r: f64 = rng.gen();
            let u: f64 = 1.0 + (1.0 - r) * (2.0_f64.powi(n as i32) - 1.0);
            (u.log2().ceil() as usize).clamp(1, n)
        } else {
            let lo = BigUint::from(2_u8);
            let hi = (BigUint::from(1_u8) << n) + 1_u8;
            let u = rng.gen_biguint_range(&lo, &hi);
            (u - 1_u8).bits() as usize
        };
    Ok(k)
}

/// Sample a Hadamard layer and a qubit permutation on `n` qubits from the
/// quantum Mallows distribution.
///
/// The permutation is returned as a list of 0-based indices, where the `i`-th
/// element is the image of `i`.
pub fn sample_qmallows<R>(n: usize, rng: &mut R)
    -> Result<(Vec<bool>, Vec<usize>)>
where R: Rng + ?Sized
{
    let mut had: Vec<bool> = Vec::with_capacity(n);
    let mut perm: Vec<usize> = Vec::with_capacity(n);
    // removal has to keep the remaining indices in order, since later picks
    // are positions in the shrinking list
    let mut inds: Vec<usize> = (0..n).collect();
    let mut m: usize;
    for _ in 0..n {
        m = inds.len();
        let l = sample_geometric(2 * m, rng)?;
        let weight = 2 * m - l;
        let h = weight < m;
        let k = if h { weight } else { 2 * m - weight - 1 };
        had.push(h);
        perm.push(inds.remove(k));
    }
    Ok((had, perm))
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{ rngs::StdRng, SeedableRng };

    // chi-squared critical values at p = 0.001, indexed by degrees of freedom
    fn chi2_crit(df: usize) -> f64 {
        match df {
            3 => 16.266,
            7 => 24.322,
            15 => 37.697,
            _ => panic!("no critical value for df = {df}"),
        }
    }

    #[test]
    fn geometric_domain() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(sample_geometric(0, &mut rng), Err(Error::Domain(0)));
    }

    #[test]
    fn geometric_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(sample_geometric(1, &mut rng), Ok(1));
        }
        for n in [2, 5, 62, 63, 64, 500, 1000, 1001, 2048] {
            for _ in 0..200 {
                let k = sample_geometric(n, &mut rng).unwrap();
                assert!((1..=n).contains(&k), "n = {n}, k = {k}");
            }
        }
    }

    #[test]
    fn geometric_small_distribution() {
        const N: usize = 4;
        const MC: usize = 100_000;
        let mut rng = StdRng::seed_from_u64(2);
        let mut counts = [0_usize; N + 1];
        for _ in 0..MC {
            counts[sample_geometric(N, &mut rng).unwrap()] += 1;
        }
        assert_eq!(counts[0], 0);
        let norm = (2_usize.pow(N as u32) - 1) as f64;
        for (i, c) in counts.iter().enumerate().skip(1) {
            let expected = 2_f64.powi(i as i32 - 1) / norm;
            let observed = *c as f64 / MC as f64;
            assert!(
                (observed - expected).abs() < 0.05 * expected,
                "k = {i}: observed {observed:.4}, expected {expected:.4}",
            );
        }
    }

    #[test]
    fn geometric_large_regimes() {
        const MC: usize = 20_000;
        let mut rng = StdRng::seed_from_u64(3);
        // float and big-integer paths; P(n) ≈ 1/2, P(n - 1) ≈ 1/4
        for n in [100, 1500] {
            let mut top = 0_usize;
            let mut next = 0_usize;
            for _ in 0..MC {
                match sample_geometric(n, &mut rng).unwrap() {
                    k if k == n => { top += 1; },
                    k if k == n - 1 => { next += 1; },
                    _ => { },
                }
            }
            let top = top as f64 / MC as f64;
            let next = next as f64 / MC as f64;
            assert!((top - 0.5).abs() < 0.02, "n = {n}: P(n) ≈ {top}");
            assert!((next - 0.25).abs() < 0.02, "n = {n}: P(n - 1) ≈ {next}");
        }
    }

    #[test]
    fn qmallows_permutation() {
        let mut rng = StdRng::seed_from_u64(4);
        for n in 0..=30 {
            for _ in 0..20 {
                let (had, perm) = sample_qmallows(n, &mut rng).unwrap();
                assert_eq!(had.len(), n);
                let mut sorted = perm.clone();
                sorted.sort_unstable();
                assert_eq!(sorted, (0..n).collect::<Vec<usize>>());
            }
        }
    }

    // rounds are independent, with P(h[idx]) = 2^m / (2^m + 1) for m = n - idx
    fn hadamard_pattern_prob(n: usize, pattern: usize) -> f64 {
        (0..n)
            .map(|idx| {
                let pm = 2_f64.powi((n - idx) as i32);
                let q = pm / (pm + 1.0);
                if pattern & (1 << idx) != 0 { q } else { 1.0 - q }
            })
            .product()
    }

    #[test]
    fn qmallows_hadamard_marginal() {
        const MC: usize = 50_000;
        let mut rng = StdRng::seed_from_u64(5);
        for n in [2, 3, 4] {
            let mut counts: Vec<usize> = vec![0; 1 << n];
            for _ in 0..MC {
                let (had, _) = sample_qmallows(n, &mut rng).unwrap();
                let pattern: usize =
                    had.iter().enumerate()
                    .filter(|(_, h)| **h)
                    .map(|(idx, _)| 1 << idx)
                    .sum();
                counts[pattern] += 1;
            }
            let chi2: f64 =
                counts.iter().enumerate()
                .map(|(pattern, c)| {
                    let expected = MC as f64 * hadamard_pattern_prob(n, pattern);
                    (*c as f64 - expected).powi(2) / expected
                })
                .sum();
            let crit = chi2_crit((1 << n) - 1);
            assert!(chi2 < crit, "n = {n}: chi2 = {chi2:.2} >= {crit}");
        }
    }
}
