//! Exact Euclidean distance transform.
//!
//! Squared distances are computed one axis at a time using the lower envelope
//! of parabolas described by Felzenszwalb & Huttenlocher (2012), so the cost
//! is linear in the number of voxels for both 2D and 3D grids.

use ndarray::{ArrayD, ArrayViewD, Axis};

use crate::voxel::Voxel;

/// Scratch space for the 1D transform, reused across every lane of the grid
#[derive(Default)]
struct LowerEnvelope {
    /// the positions of the parabolas forming the envelope
    sites: Vec<usize>,
    /// `bounds[k]` is where the parabola of `sites[k]` starts to be lowest
    bounds: Vec<f64>,
}

impl LowerEnvelope {
    /// the abscissa where the parabolas rooted at `p` and `q` intersect
    fn intersection(f: &[f64], p: usize, q: usize) -> f64 {
        let (pf, qf) = (p as f64, q as f64);
        ((f[q] + qf * qf) - (f[p] + pf * pf)) / (2.0 * (qf - pf))
    }

    /// writes `min_p (q - p)^2 + f[p]` for every `q` into `out`. Infinite
    /// entries of `f` never contribute.
    fn transform<'a>(&mut self, f: &[f64], out: impl Iterator<Item = &'a mut f64>) {
        self.sites.clear();
        self.bounds.clear();
        for (q, fq) in f.iter().enumerate() {
            if !fq.is_finite() {
                continue;
            }
            loop {
                let Some((&p, &left)) = self.sites.last().zip(self.bounds.last()) else {
                    self.sites.push(q);
                    self.bounds.push(f64::NEG_INFINITY);
                    break;
                };
                let s = Self::intersection(f, p, q);
                if s <= left {
                    self.sites.pop();
                    self.bounds.pop();
                } else {
                    self.sites.push(q);
                    self.bounds.push(s);
                    break;
                }
            }
        }

        if self.sites.is_empty() {
            out.for_each(|d| *d = f64::INFINITY);
            return;
        }
        let mut k = 0;
        for (q, d) in out.enumerate() {
            let qf = q as f64;
            while k + 1 < self.sites.len() && self.bounds[k + 1] < qf {
                k += 1;
            }
            let p = self.sites[k];
            *d = (qf - p as f64).powi(2) + f[p];
        }
    }
}

/// Computes the squared distance from every foreground voxel to the nearest
/// background voxel. Background voxels hold 0.
///
/// When `grid` holds no background at all, every voxel is infinitely far
/// away from it.
pub fn squared_distance_transform<A: Voxel>(grid: ArrayViewD<A>) -> ArrayD<f64> {
    let mut dist = grid.mapv(|voxel| {
        if voxel.is_foreground() {
            f64::INFINITY
        } else {
            0.0
        }
    });
    let mut envelope = LowerEnvelope::default();
    let mut lane_copy = Vec::new();
    for axis in 0..dist.ndim() {
        for mut lane in dist.lanes_mut(Axis(axis)) {
            lane_copy.clear();
            lane_copy.extend(lane.iter().copied());
            envelope.transform(&lane_copy, lane.iter_mut());
        }
    }
    dist
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, Array3, Dimension, IxDyn};

    fn brute_force(grid: &ArrayD<bool>) -> ArrayD<f64> {
        let background: Vec<Vec<usize>> = grid
            .indexed_iter()
            .filter(|(_, void)| !**void)
            .map(|(index, _)| index.slice().to_vec())
            .collect();
        ArrayD::from_shape_fn(grid.raw_dim(), |index: IxDyn| {
            background
                .iter()
                .map(|b| {
                    b.iter()
                        .zip(index.slice())
                        .map(|(&x, &y)| (x as f64 - y as f64).powi(2))
                        .sum::<f64>()
                })
                .fold(f64::INFINITY, f64::min)
        })
    }

    #[test]
    fn single_solid_voxel() {
        let mut grid = Array2::from_elem((5, 5), true);
        grid[[2, 2]] = false;
        let dist = squared_distance_transform(grid.view().into_dyn());
        assert_eq!(dist[[2, 2]], 0.0);
        assert_eq!(dist[[2, 3]], 1.0);
        assert_eq!(dist[[1, 1]], 2.0);
        assert_eq!(dist[[0, 0]], 8.0);
        assert_eq!(dist[[4, 1]], 5.0);
    }

    #[test]
    fn matches_brute_force() {
        let grid2 = Array2::from_shape_fn((9, 13), |(i, j)| (3 * i + 7 * j) % 5 != 0).into_dyn();
        let grid3 =
            Array3::from_shape_fn((6, 7, 8), |(i, j, k)| (5 * i + 3 * j + 11 * k) % 13 > 1)
                .into_dyn();
        for grid in [grid2, grid3] {
            let dist = squared_distance_transform(grid.view());
            assert_eq!(dist, brute_force(&grid));
        }
    }

    #[test]
    fn no_background() {
        let grid = Array2::from_elem((3, 4), 1_u8).into_dyn();
        let dist = squared_distance_transform(grid.view());
        assert!(dist.iter().all(|d| d.is_infinite()));

        let grid = Array2::from_elem((3, 4), 0_u8).into_dyn();
        let dist = squared_distance_transform(grid.view());
        assert!(dist.iter().all(|&d| d == 0.0));
    }
}
