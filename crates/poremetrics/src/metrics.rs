//! Simple aggregate statistics of porous-material images.

use ndarray::{ArrayBase, Data, Dimension};
use poremetrics_internal::Voxel;

/// The fraction of voxels in `grid` that are void (foreground). An empty grid
/// has a porosity of 0.
pub fn porosity<A, S, D>(grid: &ArrayBase<S, D>) -> f64
where
    A: Voxel,
    S: Data<Elem = A>,
    D: Dimension,
{
    if grid.is_empty() {
        return 0.0;
    }
    let n_void = grid.iter().filter(|voxel| voxel.is_foreground()).count();
    n_void as f64 / grid.len() as f64
}

/// Tallies a map of local feature sizes (e.g. the radius of the largest
/// sphere covering each voxel).
///
/// Returns the distinct positive sizes in ascending order, and the number of
/// voxels holding each of them. Non-positive (and `NaN`) entries are treated
/// as background.
pub fn size_distribution<A, S, D>(sizes: &ArrayBase<S, D>) -> (Vec<f64>, Vec<usize>)
where
    A: Copy + Into<f64>,
    S: Data<Elem = A>,
    D: Dimension,
{
    let mut values: Vec<f64> = sizes
        .iter()
        .map(|&size| size.into())
        .filter(|&size: &f64| size > 0.0)
        .collect();
    values.sort_by(f64::total_cmp);

    let mut radii: Vec<f64> = Vec::new();
    let mut counts: Vec<usize> = Vec::new();
    for value in values {
        match radii.last() {
            Some(&last) if last == value => {
                if let Some(count) = counts.last_mut() {
                    *count += 1;
                }
            }
            _ => {
                radii.push(value);
                counts.push(1);
            }
        }
    }
    (radii, counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, array};

    #[test]
    fn porosity_of_simple_grids() {
        let grid = array![[true, false], [true, true]];
        assert_eq!(porosity(&grid), 0.75);
        let labels = array![[0_u8, 2, 0], [0, 0, 1]];
        assert_eq!(porosity(&labels), 2.0 / 6.0);
        assert_eq!(porosity(&Array2::<bool>::from_elem((0, 3), true)), 0.0);
    }

    #[test]
    fn sizes() {
        let sizes = array![[0.0, 2.0, 2.0], [1.5, 0.0, 2.0], [1.5, 3.0, -1.0]];
        let (radii, counts) = size_distribution(&sizes);
        assert_eq!(radii, vec![1.5, 2.0, 3.0]);
        assert_eq!(counts, vec![2, 3, 1]);

        let (radii, counts) = size_distribution(&array![[0_u8, 0], [0, 0]]);
        assert!(radii.is_empty());
        assert!(counts.is_empty());
    }
}
