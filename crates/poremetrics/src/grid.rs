//! Axis utilities for the grid model.
//!
//! Every operation in this crate accepts 2D or 3D grids. Probing along an
//! arbitrary axis works by moving that axis to the front, running the
//! fixed-orientation algorithm, and moving it back.

use ndarray::{ArrayBase, Data, Dimension, IxDyn};

use crate::Error;

/// the dimension counts accepted by the operations of this crate
pub(crate) const SUPPORTED_NDIM: &[usize] = &[2, 3];

/// Check that `who` received a grid with a supported number of dimensions
pub(crate) fn check_ndim(who: &'static str, ndim: usize) -> Result<(), Error> {
    poremetrics_internal::check_ndim(ndim).map_err(|_| Error::dimensionality(who, ndim, SUPPORTED_NDIM))
}

pub(crate) fn check_axis(axis: usize, ndim: usize) -> Result<(), Error> {
    if axis < ndim {
        Ok(())
    } else {
        Err(Error::axis(axis, ndim))
    }
}

/// Reorders the dimensions of `grid` so that `axis` becomes dimension 0.
/// The remaining dimensions keep their relative order.
///
/// No data is copied. [`restore_axis_order`] undoes the permutation.
///
/// # Errors
/// Fails when `grid` isn't 2D or 3D, or when `axis` is out of range.
pub fn permute_axis_to_front<S, D>(
    grid: ArrayBase<S, D>,
    axis: usize,
) -> Result<ArrayBase<S, IxDyn>, Error>
where
    S: Data,
    D: Dimension,
{
    check_ndim("permute_axis_to_front", grid.ndim())?;
    check_axis(axis, grid.ndim())?;
    poremetrics_internal::permute_axis_to_front(grid.into_dyn(), axis)
        .map_err(Error::internal_legacy_adhoc)
}

/// The exact inverse of [`permute_axis_to_front`] for the same `axis`
pub fn restore_axis_order<S, D>(
    grid: ArrayBase<S, D>,
    axis: usize,
) -> Result<ArrayBase<S, IxDyn>, Error>
where
    S: Data,
    D: Dimension,
{
    check_ndim("restore_axis_order", grid.ndim())?;
    check_axis(axis, grid.ndim())?;
    poremetrics_internal::restore_axis_order(grid.into_dyn(), axis)
        .map_err(Error::internal_legacy_adhoc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCategory;
    use ndarray::{Array1, Array3, Array4};

    #[test]
    fn round_trip() {
        let grid = Array3::from_shape_fn((2, 3, 4), |(i, j, k)| 100 * i + 10 * j + k);
        for axis in 0..3 {
            let front = permute_axis_to_front(grid.view(), axis).unwrap();
            assert_eq!(front.shape()[0], grid.shape()[axis]);
            let back = restore_axis_order(front, axis).unwrap();
            assert_eq!(back, grid.view().into_dyn());
        }
    }

    #[test]
    fn invalid_dimensions() {
        let grid = Array3::<bool>::from_elem((2, 2, 2), true);
        let err = permute_axis_to_front(grid.view(), 3).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::InvalidDimension);

        let line = Array1::<bool>::from_elem(4, true);
        let err = permute_axis_to_front(line.view(), 0).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::InvalidDimension);

        let hyper = Array4::<bool>::from_elem((2, 2, 2, 2), true);
        let err = restore_axis_order(hyper.view(), 0).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::InvalidDimension);
    }
}
