//! Greyscale morphological reconstruction.
//!
//! Reconstruction by dilation repeatedly grows the seed into its neighbors
//! without ever exceeding the mask, until nothing changes. Changes are
//! propagated with a FIFO queue, so each voxel is only revisited when one of
//! its neighbors rises.

use std::collections::VecDeque;

use ndarray::{Array, ArrayD, ArrayViewD, IxDyn};

use crate::label::{
    Connectivity, neighbor_index, neighbor_offsets, row_major_strides, unravel_index,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reconstruction {
    /// grows the seed upwards; the seed must not exceed the mask
    Dilation,
    /// shrinks the seed downwards; the seed must not be below the mask
    Erosion,
}

fn reconstruct_by_dilation(
    seed: ArrayViewD<f64>,
    mask: ArrayViewD<f64>,
    connectivity: Connectivity,
) -> Result<ArrayD<f64>, &'static str> {
    let shape = seed.shape().to_vec();
    let strides = row_major_strides(&shape);
    let offsets = neighbor_offsets(shape.len(), connectivity);
    let mask: Vec<f64> = mask.iter().copied().collect();
    let mut result: Vec<f64> = seed.iter().copied().collect();

    let mut queue: VecDeque<usize> = (0..result.len()).collect();
    let mut coord = vec![0_usize; shape.len()];
    while let Some(flat) = queue.pop_front() {
        unravel_index(flat, &strides, &mut coord);
        for offset in &offsets {
            let Some(neighbor) = neighbor_index(&coord, offset, &shape, &strides) else {
                continue;
            };
            let candidate = result[flat].min(mask[neighbor]);
            if candidate > result[neighbor] {
                result[neighbor] = candidate;
                queue.push_back(neighbor);
            }
        }
    }

    Array::from_shape_vec(IxDyn(&shape), result)
        .map_err(|_| "the reconstruction buffer doesn't match the grid shape")
}

/// Reconstructs `mask` from `seed` with the requested `method`.
pub fn reconstruct(
    seed: ArrayViewD<f64>,
    mask: ArrayViewD<f64>,
    method: Reconstruction,
    connectivity: Connectivity,
) -> Result<ArrayD<f64>, &'static str> {
    if seed.shape() != mask.shape() {
        return Err("the seed and the mask must have the same shape");
    }
    match method {
        Reconstruction::Dilation => {
            if seed.iter().zip(mask.iter()).any(|(&s, &m)| !(s <= m)) {
                return Err("the seed must not exceed the mask for reconstruction by dilation");
            }
            reconstruct_by_dilation(seed, mask, connectivity)
        }
        Reconstruction::Erosion => {
            if seed.iter().zip(mask.iter()).any(|(&s, &m)| !(s >= m)) {
                return Err("the seed must not be below the mask for reconstruction by erosion");
            }
            let flipped = reconstruct_by_dilation(
                seed.mapv(|s| -s).view(),
                mask.mapv(|m| -m).view(),
                connectivity,
            )?;
            Ok(flipped.mapv(|v| -v))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn lowers_peaks() {
        let mask = array![[0.0, 1.0, 5.0, 1.0, 0.0, 2.0, 3.0, 2.0]].into_dyn();
        let seed = mask.mapv(|v| v - 2.0);
        let result = reconstruct(
            seed.view(),
            mask.view(),
            Reconstruction::Dilation,
            Connectivity::Full,
        )
        .unwrap();
        assert_eq!(
            result,
            array![[0.0, 1.0, 3.0, 1.0, 0.0, 1.0, 1.0, 1.0]].into_dyn()
        );
    }

    #[test]
    fn fills_valleys() {
        let mask = array![[3.0, 1.0, 3.0, 3.0, 0.0, 3.0]].into_dyn();
        let seed = mask.mapv(|v| v + 1.0);
        let result = reconstruct(
            seed.view(),
            mask.view(),
            Reconstruction::Erosion,
            Connectivity::Full,
        )
        .unwrap();
        assert_eq!(result, array![[3.0, 2.0, 3.0, 3.0, 1.0, 3.0]].into_dyn());
    }

    #[test]
    fn connectivity_matters() {
        // the peak at [0, 0] only reaches [1, 1] diagonally
        let mask = array![[4.0, 0.0], [0.0, 4.0]].into_dyn();
        let seed = array![[4.0, 0.0], [0.0, 0.0]].into_dyn();
        let face = reconstruct(
            seed.view(),
            mask.view(),
            Reconstruction::Dilation,
            Connectivity::Face,
        )
        .unwrap();
        assert_eq!(face[[1, 1]], 0.0);
        let full = reconstruct(
            seed.view(),
            mask.view(),
            Reconstruction::Dilation,
            Connectivity::Full,
        )
        .unwrap();
        assert_eq!(full[[1, 1]], 4.0);
    }

    #[test]
    fn invalid_inputs() {
        let mask = array![[1.0, 2.0]].into_dyn();
        let seed = array![[1.5, 2.0]].into_dyn();
        assert!(
            reconstruct(
                mask.view(),
                seed.view(),
                Reconstruction::Dilation,
                Connectivity::Face
            )
            .is_ok()
        );
        assert!(
            reconstruct(
                seed.view(),
                mask.view(),
                Reconstruction::Dilation,
                Connectivity::Face
            )
            .is_err()
        );
        assert!(
            reconstruct(
                mask.view(),
                seed.view(),
                Reconstruction::Erosion,
                Connectivity::Face
            )
            .is_err()
        );
        let other = array![[1.0], [2.0]].into_dyn();
        assert!(
            reconstruct(
                other.view(),
                mask.view(),
                Reconstruction::Erosion,
                Connectivity::Face
            )
            .is_err()
        );
    }
}
