// the reason this is named mod.rs has to do with some complexities of how
// testing is handled
//
// we are following the advice of the rust book
// https://doc.rust-lang.org/book/ch11-03-test-organization.html#submodules-in-integration-tests

#![allow(dead_code)]

use ndarray::{ArrayD, IxDyn};
use rand::distr::{Bernoulli, Distribution};
use rand_xoshiro::Xoshiro256PlusPlus;
use rand_xoshiro::rand_core::SeedableRng;

// based on numpy!
// https://numpy.org/doc/stable/reference/generated/numpy.isclose.html
pub fn isclose(actual: f64, ref_val: f64, rtol: f64, atol: f64) -> bool {
    let actual_nan = actual.is_nan();
    let ref_nan = ref_val.is_nan();
    if actual_nan || ref_nan {
        actual_nan && ref_nan
    } else {
        (actual - ref_val).abs() <= (atol + rtol * ref_val.abs())
    }
}

/// produce a random porous grid where each voxel is void with probability
/// `porosity`
pub fn random_grid(seed: u64, shape: &[usize], porosity: f64) -> ArrayD<bool> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let void_dist = Bernoulli::new(porosity).unwrap();
    ArrayD::from_shape_fn(IxDyn(shape), |_| void_dist.sample(&mut rng))
}

/// counts the voxels holding `value`
pub fn count_equal<T: PartialEq>(grid: &ArrayD<T>, value: T) -> usize {
    grid.iter().filter(|&v| *v == value).count()
}
