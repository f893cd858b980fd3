use rand::distributions::Distribution;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Standard normal distribution (mean 0, variance 1) sampled with the [Marsaglia polar method].
///
/// Every call to [`Distribution::sample`] runs its own rejection loop and returns a single value.
/// The polar method yields a second independent value per accepted pair, it is discarded.
///
/// [Marsaglia polar method]: https://en.wikipedia.org/wiki/Marsaglia_polar_method
///
/// # Examples
///
/// ```
/// use normhist::PolarNormal;
/// use rand::distributions::Distribution;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
/// let value: f64 = PolarNormal.sample(&mut rng);
/// assert!(value.is_finite());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PolarNormal;

impl Distribution<f64> for PolarNormal {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        loop {
            let u = uniform(rng);
            let v = uniform(rng);
            let s = u * u + v * v;
            // s == 0 would make ln(s) / s undefined
            if s > 0.0 && s < 1.0 {
                return u * (-2.0 * s.ln() / s).sqrt();
            }
        }
    }
}

/// Uniform value in `[-1, 1)`.
#[inline]
fn uniform<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen::<f64>() * 2.0 - 1.0
}

/// Draw `n` standard normal samples using the `rng` as the source of uniform values.
///
/// # Examples
///
/// ```
/// use normhist::sample::generate;
///
/// let samples = generate(100, &mut rand::thread_rng());
/// assert_eq!(samples.len(), 100);
/// assert!(generate(0, &mut rand::thread_rng()).is_empty());
/// ```
pub fn generate<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<f64> {
    tracing::trace!(n, "generating normal samples");
    (0..n).map(|_| PolarNormal.sample(rng)).collect()
}

/// Reproducible variant of [`generate`], the same `seed` always gives the same samples.
///
/// # Examples
///
/// ```
/// use normhist::sample::generate_seeded;
///
/// assert_eq!(generate_seeded(10, 7), generate_seeded(10, 7));
/// ```
pub fn generate_seeded(n: usize, seed: u64) -> Vec<f64> {
    generate(n, &mut ChaCha8Rng::seed_from_u64(seed))
}

/// Variant of [`generate`] seeded from the operating system entropy.
pub fn generate_random(n: usize) -> Vec<f64> {
    generate(n, &mut ChaCha8Rng::from_entropy())
}
