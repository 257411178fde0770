//! Axis bookkeeping for 2D and 3D grids.
//!
//! The chord machinery only knows how to probe along axis 0 of a 3D array.
//! Every other orientation is reduced to that case by moving the probe axis to
//! the front (and promoting 2D grids to 3D with a trailing singleton axis),
//! then undoing both steps on the result.

use ndarray::{Array3, ArrayBase, ArrayD, Axis, Data, Ix3, IxDyn};

pub const MIN_NDIM: usize = 2;
pub const MAX_NDIM: usize = 3;

/// Check that a grid has a supported number of dimensions
pub fn check_ndim(ndim: usize) -> Result<(), &'static str> {
    if (MIN_NDIM..=MAX_NDIM).contains(&ndim) {
        Ok(())
    } else {
        Err("grids must have either 2 or 3 dimensions")
    }
}

/// returns the axis order that places `axis` at position 0 while every other
/// axis keeps its relative order.
///
/// For example, `axis_to_front_order(3, 2)` is `[2, 0, 1]`.
pub fn axis_to_front_order(ndim: usize, axis: usize) -> Result<Vec<usize>, &'static str> {
    if axis >= ndim {
        return Err("axis exceeds the number of grid dimensions");
    }
    let mut order = Vec::with_capacity(ndim);
    order.push(axis);
    order.extend((0..ndim).filter(|&i| i != axis));
    Ok(order)
}

/// Reorders the axes of `grid` so that `axis` becomes axis 0.
///
/// This never copies data, it only adjusts the strides of the array.
pub fn permute_axis_to_front<S>(
    grid: ArrayBase<S, IxDyn>,
    axis: usize,
) -> Result<ArrayBase<S, IxDyn>, &'static str>
where
    S: Data,
{
    let order = axis_to_front_order(grid.ndim(), axis)?;
    Ok(grid.permuted_axes(order))
}

/// The exact inverse of [`permute_axis_to_front`]
pub fn restore_axis_order<S>(
    grid: ArrayBase<S, IxDyn>,
    axis: usize,
) -> Result<ArrayBase<S, IxDyn>, &'static str>
where
    S: Data,
{
    let order = axis_to_front_order(grid.ndim(), axis)?;
    let mut inverse = vec![0; order.len()];
    for (dst, &src) in order.iter().enumerate() {
        inverse[src] = dst;
    }
    Ok(grid.permuted_axes(inverse))
}

/// Views a 2D or 3D grid as 3D. 2D grids gain a trailing axis of length 1.
pub fn promote_to_3d<S>(grid: ArrayBase<S, IxDyn>) -> Result<ArrayBase<S, Ix3>, &'static str>
where
    S: Data,
{
    check_ndim(grid.ndim())?;
    let grid = if grid.ndim() == 2 {
        grid.insert_axis(Axis(2))
    } else {
        grid
    };
    grid.into_dimensionality::<Ix3>()
        .map_err(|_| "unable to view the grid as a 3D array")
}

/// Undoes [`promote_to_3d`] for an array that was derived from an
/// `ndim`-dimensional grid.
pub fn demote_from_3d<A>(grid: Array3<A>, ndim: usize) -> ArrayD<A> {
    let grid = grid.into_dyn();
    if ndim == 2 {
        grid.index_axis_move(Axis(2), 0)
    } else {
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array, ArrayD};

    fn arange(shape: &[usize]) -> ArrayD<usize> {
        let n: usize = shape.iter().product();
        Array::from_shape_vec(IxDyn(shape), (0..n).collect()).unwrap()
    }

    #[test]
    fn front_order() {
        assert_eq!(axis_to_front_order(3, 0).unwrap(), vec![0, 1, 2]);
        assert_eq!(axis_to_front_order(3, 1).unwrap(), vec![1, 0, 2]);
        assert_eq!(axis_to_front_order(3, 2).unwrap(), vec![2, 0, 1]);
        assert_eq!(axis_to_front_order(2, 1).unwrap(), vec![1, 0]);
        assert!(axis_to_front_order(2, 2).is_err());
    }

    #[test]
    fn permutation_round_trip() {
        let grid = arange(&[2, 3, 4]);
        for axis in 0..3 {
            let front = permute_axis_to_front(grid.view(), axis).unwrap();
            assert_eq!(front.shape()[0], grid.shape()[axis]);
            let restored = restore_axis_order(front, axis).unwrap();
            assert_eq!(restored, grid.view());
        }
    }

    #[test]
    fn permutation_keeps_relative_order() {
        let grid = arange(&[2, 3, 4]);
        let front = permute_axis_to_front(grid.view(), 2).unwrap();
        assert_eq!(front.shape(), &[4, 2, 3]);
        // element [k, i, j] of the permuted view is element [i, j, k]
        assert_eq!(front[[3, 1, 2]], grid[[1, 2, 3]]);
    }

    #[test]
    fn promote_and_demote() {
        let grid = arange(&[3, 5]);
        let promoted = promote_to_3d(grid.view()).unwrap();
        assert_eq!(promoted.shape(), &[3, 5, 1]);
        let demoted = demote_from_3d(promoted.to_owned(), 2);
        assert_eq!(demoted, grid);

        let grid = arange(&[2, 2, 2]);
        assert_eq!(promote_to_3d(grid.view()).unwrap().shape(), &[2, 2, 2]);

        assert!(promote_to_3d(arange(&[4]).view()).is_err());
        assert!(promote_to_3d(arange(&[1, 1, 1, 1]).view()).is_err());
    }
}
