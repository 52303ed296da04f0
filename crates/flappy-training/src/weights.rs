//! Weight vector operations for the genetic algorithm.
//!
//! These operate on the flattened weights of a
//! [`NeuralController`](crate::NeuralController) and are used by
//! [`PopulationEvolver`](crate::genetic::PopulationEvolver):
//!
//! - **Initialization**: [`random`] draws weights uniformly from `[-max_weight, max_weight]`
//! - **Crossover**: [`blx_alpha`] blends two parents
//! - **Mutation**: [`mutate`] adds Gaussian noise
//!
//! Every operation keeps weights inside `[-max_weight, max_weight]`. Network
//! weights are signed, so unlike a simplex of feature weights there is no
//! normalization step.

use rand::Rng;
use rand_distr::{Distribution as _, Normal};

/// Creates a weight vector by applying a function to each index.
///
/// ```
/// use flappy_training::weights;
///
/// let weights = weights::from_fn(|i| if i % 2 == 0 { 1.0 } else { -1.0 }, 4);
/// assert_eq!(weights, vec![1.0, -1.0, 1.0, -1.0]);
/// ```
pub fn from_fn<F>(f: F, len: usize) -> Vec<f32>
where
    F: FnMut(usize) -> f32,
{
    (0..len).map(f).collect()
}

/// Generates `len` weights sampled independently from `[-max_weight, max_weight]`.
pub fn random<R>(rng: &mut R, max_weight: f32, len: usize) -> Vec<f32>
where
    R: Rng + ?Sized,
{
    from_fn(|_| rng.random_range(-max_weight..=max_weight), len)
}

/// Performs BLX-α (blend crossover) between two parent weight vectors.
///
/// For parents `x1` and `x2` at position `i`, with `d = |x2 - x1|`, the child
/// weight is sampled uniformly from `[min - α·d, max + α·d]` and clamped to
/// `[-max_weight, max_weight]`.
///
/// - `alpha = 0.0`: children strictly between the parents
/// - `alpha = 0.5`: standard BLX-0.5
///
/// # Panics
///
/// Panics if the parents have different lengths.
pub fn blx_alpha<R>(p1: &[f32], p2: &[f32], alpha: f32, max_weight: f32, rng: &mut R) -> Vec<f32>
where
    R: Rng + ?Sized,
{
    assert_eq!(p1.len(), p2.len());
    from_fn(
        |i| {
            let min = f32::min(p1[i], p2[i]);
            let max = f32::max(p1[i], p2[i]);
            let d = max - min;
            rng.random_range(min - alpha * d..=max + alpha * d)
                .clamp(-max_weight, max_weight)
        },
        p1.len(),
    )
}

/// Applies Gaussian mutation in place.
///
/// Each weight is perturbed by a sample of `N(0, sigma)` with probability
/// `rate`, then clamped to `[-max_weight, max_weight]`. A negative or NaN
/// `sigma` leaves the weights unchanged.
pub fn mutate<R>(weights: &mut [f32], sigma: f32, max_weight: f32, rate: f32, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let Ok(normal) = Normal::new(0.0, sigma) else {
        return;
    };
    let rate = f64::from(rate.clamp(0.0, 1.0));
    for w in weights {
        if rng.random_bool(rate) {
            *w = (*w + normal.sample(rng)).clamp(-max_weight, max_weight);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_random_within_bounds() {
        let mut rng = Pcg32::seed_from_u64(1);
        let weights = random(&mut rng, 2.0, 1000);
        assert!(weights.iter().all(|w| (-2.0..=2.0).contains(w)));
        assert!(weights.iter().any(|w| *w < 0.0));
        assert!(weights.iter().any(|w| *w > 0.0));
    }

    #[test]
    fn test_blx_zero_alpha_stays_between_parents() {
        let mut rng = Pcg32::seed_from_u64(2);
        let p1 = [-1.0, 0.0, 0.5, 3.0];
        let p2 = [1.0, 0.0, -0.5, 3.0];
        for _ in 0..100 {
            let child = blx_alpha(&p1, &p2, 0.0, 2.0, &mut rng);
            assert!((-1.0..=1.0).contains(&child[0]));
            assert_eq!(child[1], 0.0);
            assert!((-0.5..=0.5).contains(&child[2]));
            assert_eq!(child[3], 2.0, "clamped to max_weight");
        }
    }

    #[test]
    fn test_mutate_rate_zero_is_identity() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut weights = vec![0.25; 16];
        mutate(&mut weights, 1.0, 4.0, 0.0, &mut rng);
        assert_eq!(weights, vec![0.25; 16]);
    }

    #[test]
    fn test_mutate_rate_one_changes_and_clamps() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut weights = vec![0.0; 64];
        mutate(&mut weights, 10.0, 1.0, 1.0, &mut rng);
        assert!(weights.iter().any(|w| *w != 0.0));
        assert!(weights.iter().all(|w| (-1.0..=1.0).contains(w)));
    }

    #[test]
    fn test_mutate_ignores_invalid_sigma() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut weights = vec![0.5; 4];
        mutate(&mut weights, f32::NAN, 1.0, 1.0, &mut rng);
        assert_eq!(weights, vec![0.5; 4]);
    }
}
