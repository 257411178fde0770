use ndarray::{Array2, ArrayView2, Axis};

/// Places points on a regular lattice covering a grid with the given `shape`.
///
/// Along each axis the coordinates are `0, spacing, 2*spacing, ...` (strictly
/// less than the axis length) and the lattice is the full cartesian product
/// of those coordinates.
///
/// # Layout
/// The result has shape `(D, n_points)`, where `D` is the number of spatial
/// dimensions. Points are ordered like a row-major traversal of the lattice
/// (the last axis varies fastest).
pub fn regular_sample_points(
    shape: &[usize],
    spacing: usize,
) -> Result<Array2<usize>, &'static str> {
    if spacing == 0 {
        return Err("the spacing between sample points must be positive");
    }
    let counts: Vec<usize> = shape.iter().map(|&len| len.div_ceil(spacing)).collect();
    let n_points: usize = counts.iter().product();

    let mut positions = Array2::zeros((shape.len(), n_points));
    for (i_point, mut column) in positions.axis_iter_mut(Axis(1)).enumerate() {
        let mut remainder = i_point;
        for dim in (0..shape.len()).rev() {
            column[dim] = (remainder % counts[dim]) * spacing;
            remainder /= counts[dim];
        }
    }
    Ok(positions)
}

/// calculate the squared norm of the difference between two (mathematical)
/// vectors stored as columns of `positions`, where spatial dimension varies
/// along axis 0.
pub fn squared_diff_norm(positions: ArrayView2<f64>, i1: usize, i2: usize) -> f64 {
    let mut sum = 0.0;
    for k in 0..positions.len_of(Axis(0)) {
        let diff = positions[[k, i1]] - positions[[k, i2]];
        sum += diff * diff;
    }
    sum
}

/// Computes the `(n_points, n_points)` matrix of euclidean distances between
/// every pair of points (including each point paired with itself).
///
/// # Note
/// Memory usage grows quadratically with the number of points.
pub fn pairwise_distances(positions: ArrayView2<f64>) -> Array2<f64> {
    let n_points = positions.len_of(Axis(1));
    let mut distances = Array2::zeros((n_points, n_points));
    for i_a in 0..n_points {
        for i_b in (i_a + 1)..n_points {
            let distance = squared_diff_norm(positions, i_a, i_b).sqrt();
            distances[[i_a, i_b]] = distance;
            distances[[i_b, i_a]] = distance;
        }
    }
    distances
}
