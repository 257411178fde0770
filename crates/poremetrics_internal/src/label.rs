//! Connected-component labeling of N-dimensional grids.
//!
//! Components are discovered with a breadth-first flood fill that starts from
//! each unlabeled foreground voxel in row-major order. As a consequence,
//! component ids increase with the position of each component's first voxel
//! in a raster scan.

use std::collections::VecDeque;

use ndarray::{Array, ArrayD, ArrayViewD, Dimension, IxDyn};

use crate::voxel::Voxel;

/// Which voxels count as neighbors while labeling
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Connectivity {
    /// voxels sharing a face (4 neighbors in 2D, 6 in 3D)
    Face,
    /// voxels sharing a face, an edge or a corner (8 neighbors in 2D, 26 in
    /// 3D)
    Full,
}

/// the displacement vectors to every neighbor of a voxel
pub(crate) fn neighbor_offsets(ndim: usize, connectivity: Connectivity) -> Vec<Vec<isize>> {
    match connectivity {
        Connectivity::Face => (0..ndim)
            .flat_map(|axis| {
                [-1, 1].map(|step| {
                    let mut offset = vec![0; ndim];
                    offset[axis] = step;
                    offset
                })
            })
            .collect(),
        Connectivity::Full => {
            // enumerate {-1, 0, 1}^ndim, skipping the origin
            let n_combinations = 3_usize.pow(ndim as u32);
            (0..n_combinations)
                .map(|mut code| {
                    (0..ndim)
                        .map(|_| {
                            let step = (code % 3) as isize - 1;
                            code /= 3;
                            step
                        })
                        .collect::<Vec<isize>>()
                })
                .filter(|offset| offset.iter().any(|&step| step != 0))
                .collect()
        }
    }
}

pub(crate) fn row_major_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1; shape.len()];
    for i in (0..shape.len().saturating_sub(1)).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }
    strides
}

pub(crate) fn unravel_index(mut flat: usize, strides: &[usize], coord: &mut [usize]) {
    for (c, &stride) in coord.iter_mut().zip(strides) {
        *c = flat / stride;
        flat %= stride;
    }
}

/// returns the flat index of `coord + offset`, or `None` when it falls outside
/// of the grid
pub(crate) fn neighbor_index(
    coord: &[usize],
    offset: &[isize],
    shape: &[usize],
    strides: &[usize],
) -> Option<usize> {
    let mut flat = 0;
    for i in 0..coord.len() {
        let c = coord[i] as isize + offset[i];
        if c < 0 || c >= shape[i] as isize {
            return None;
        }
        flat += (c as usize) * strides[i];
    }
    Some(flat)
}

fn is_on_border(index: &[usize], shape: &[usize]) -> bool {
    index
        .iter()
        .zip(shape)
        .any(|(&i, &len)| i == 0 || i + 1 == len)
}

/// The half-open index ranges `[start, stop)` enclosing a component
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    start: Vec<usize>,
    stop: Vec<usize>,
}

impl BoundingBox {
    fn around(index: &[usize]) -> Self {
        Self {
            start: index.to_vec(),
            stop: index.iter().map(|i| i + 1).collect(),
        }
    }

    fn include(&mut self, index: &[usize]) {
        for (i, &idx) in index.iter().enumerate() {
            self.start[i] = self.start[i].min(idx);
            self.stop[i] = self.stop[i].max(idx + 1);
        }
    }

    /// the number of voxels spanned along `axis`
    pub fn extent(&self, axis: usize) -> usize {
        self.stop[axis] - self.start[axis]
    }

    pub fn longest_side(&self) -> usize {
        (0..self.start.len())
            .map(|axis| self.extent(axis))
            .max()
            .unwrap_or(0)
    }
}

/// A grid of component ids (0 is background) produced by [`label`]
#[derive(Clone, Debug)]
pub struct LabeledGrid {
    labels: ArrayD<usize>,
    n_labels: usize,
}

impl LabeledGrid {
    pub fn labels(&self) -> &ArrayD<usize> {
        &self.labels
    }

    /// The number of ids handed out while labeling. Ids removed by
    /// [`LabeledGrid::clear_border`] are still counted.
    pub fn n_labels(&self) -> usize {
        self.n_labels
    }

    /// Resets every component that touches a face of the grid to background
    /// and returns the number of components that were removed.
    pub fn clear_border(&mut self) -> usize {
        let shape = self.labels.shape().to_vec();
        let mut touches = vec![false; self.n_labels + 1];
        for (index, &label) in self.labels.indexed_iter() {
            if label != 0 && !touches[label] && is_on_border(index.slice(), &shape) {
                touches[label] = true;
            }
        }
        self.labels
            .mapv_inplace(|label| if touches[label] { 0 } else { label });
        touches.iter().filter(|&&t| t).count()
    }

    /// The bounding box of every component, indexed by `label - 1`. Entries
    /// are `None` for ids that no longer appear in the grid.
    pub fn find_objects(&self) -> Vec<Option<BoundingBox>> {
        let mut boxes: Vec<Option<BoundingBox>> = vec![None; self.n_labels];
        for (index, &label) in self.labels.indexed_iter() {
            if label == 0 {
                continue;
            }
            let index = index.slice();
            match boxes[label - 1].as_mut() {
                Some(bbox) => bbox.include(index),
                None => boxes[label - 1] = Some(BoundingBox::around(index)),
            }
        }
        boxes
    }

    /// voxel count of every id, where entry 0 counts the background
    pub fn component_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.n_labels + 1];
        for &label in self.labels.iter() {
            sizes[label] += 1;
        }
        sizes
    }
}

/// Assigns a unique positive id to each connected component of foreground
/// voxels in `grid`.
pub fn label<A: Voxel>(
    grid: ArrayViewD<A>,
    connectivity: Connectivity,
) -> Result<LabeledGrid, &'static str> {
    let shape = grid.shape().to_vec();
    let foreground: Vec<bool> = grid.iter().map(Voxel::is_foreground).collect();
    let strides = row_major_strides(&shape);
    let offsets = neighbor_offsets(shape.len(), connectivity);

    let mut labels = vec![0_usize; foreground.len()];
    let mut n_labels = 0;
    let mut queue = VecDeque::new();
    let mut coord = vec![0_usize; shape.len()];

    for seed in 0..foreground.len() {
        if !foreground[seed] || labels[seed] != 0 {
            continue;
        }
        n_labels += 1;
        labels[seed] = n_labels;
        queue.push_back(seed);

        while let Some(flat) = queue.pop_front() {
            unravel_index(flat, &strides, &mut coord);
            for offset in &offsets {
                let Some(neighbor) = neighbor_index(&coord, offset, &shape, &strides) else {
                    continue;
                };
                if foreground[neighbor] && labels[neighbor] == 0 {
                    labels[neighbor] = n_labels;
                    queue.push_back(neighbor);
                }
            }
        }
    }

    let labels = Array::from_shape_vec(IxDyn(&shape), labels)
        .map_err(|_| "the label buffer doesn't match the grid shape")?;
    Ok(LabeledGrid { labels, n_labels })
}
