use rand::Rng;
use rand::SeedableRng;
use rand::distr::{StandardUniform, Uniform};
use rand::rngs::StdRng;

use crate::samples::{Sample, SampleSet, Topology};

/// Fixed random seed to support repeatable testing
const SEED: [u8; 32] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6,
    5, 4, 3, 2, 1,
];

/// Get a random number generator with a const seed for repeatable testing
pub fn rng_fixed_seed() -> StdRng {
    StdRng::from_seed(SEED)
}

/// Generate `n` random numbers using provided generator
pub fn randn<T>(rng: &mut StdRng, n: usize) -> Vec<T>
where
    StandardUniform: rand::distr::Distribution<T>,
{
    std::iter::repeat_with(|| rng.random::<T>())
        .take(n)
        .collect()
}

/// A point drawn uniformly from the cube [-1, 1]^3
pub fn random_point(rng: &mut StdRng) -> [f64; 3] {
    let u = randn::<f64>(rng, 3);
    [2.0 * u[0] - 1.0, 2.0 * u[1] - 1.0, 2.0 * u[2] - 1.0]
}

/// `n` samples scattered over [-1.5, 1.5]^3, each carrying its own
/// coordinates and index as values named x, y, z, index
pub fn random_cloud(rng: &mut StdRng, n: usize, topology: Topology) -> SampleSet<f64> {
    let dist = Uniform::new(-1.5, 1.5).unwrap();
    let samples = (0..n)
        .map(|i| {
            let c = [rng.sample(dist), rng.sample(dist), rng.sample(dist)];
            Sample::new(c, vec![c[0], c[1], c[2], i as f64])
        })
        .collect();
    let names = ["x", "y", "z", "index"].map(String::from).to_vec();

    SampleSet::new("random", names, topology, samples).unwrap()
}
