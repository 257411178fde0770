//! Chord metrology: probe lines through the void phase and their lengths.
//!
//! A chord is a maximal run of void voxels along one axis, sampled at the
//! nodes of a regular lattice laid over the other axes. The pipeline is
//! [`generate_chords`] (or [`generate_chords_3d`]), then optionally
//! [`trim_boundary_chords`], then [`chord_lengths`].

use ndarray::{Array3, ArrayBase, ArrayD, Data, Dimension, Ix3, Zip, s};
use poremetrics_internal::{
    Connectivity, Voxel, demote_from_3d, label, permute_axis_to_front, promote_to_3d,
    restore_axis_order,
};
use tracing::debug;

use crate::{
    Error,
    grid::{check_axis, check_ndim},
};

/// the smallest center-to-center distance between neighboring chords
const MIN_CHORD_STRIDE: usize = 4;

/// the offset between the lattices of the 3 chord families in
/// [`generate_chords_3d`]
const PHASE_SHIFT: usize = 2;

/// converts the user-facing spacing into the distance between neighboring
/// probe lines
pub(crate) fn chord_stride(spacing: i64) -> Result<usize, Error> {
    const MAX_SPACING: i64 = (i64::MAX - MIN_CHORD_STRIDE as i64) / 2;
    if !(0..=MAX_SPACING).contains(&spacing) {
        return Err(Error::integer_range(
            "chord spacing",
            spacing,
            0,
            MAX_SPACING,
        ));
    }
    Ok(MIN_CHORD_STRIDE + 2 * (spacing as usize))
}

/// Marks the void voxels lying on probe lines parallel to `axis`.
///
/// The probe lines pass through every position of the other axes whose
/// coordinates are multiples of `4 + 2*spacing`, so neighboring chords are
/// at least 4 voxels apart. Each maximal run of `true` voxels along `axis` in
/// the result is one chord.
///
/// # Errors
/// Fails when `spacing` is negative, when `grid` isn't 2D or 3D, or when
/// `axis` is out of range.
pub fn generate_chords<A, S, D>(
    grid: &ArrayBase<S, D>,
    axis: usize,
    spacing: i64,
) -> Result<ArrayD<bool>, Error>
where
    A: Voxel,
    S: Data<Elem = A>,
    D: Dimension,
{
    let ndim = grid.ndim();
    check_ndim("generate_chords", ndim)?;
    check_axis(axis, ndim)?;
    let stride = chord_stride(spacing)?;

    let oriented = permute_axis_to_front(grid.view().into_dyn(), axis)
        .and_then(promote_to_3d)
        .map_err(Error::internal_legacy_adhoc)?;

    let step = stride as isize;
    let mut probes = Array3::from_elem(oriented.raw_dim(), false);
    probes.slice_mut(s![.., ..;step, ..;step]).fill(true);

    let chords = Zip::from(&probes)
        .and(&oriented)
        .map_collect(|&probe, voxel| probe && voxel.is_foreground());
    let chords = restore_axis_order(demote_from_3d(chords, ndim), axis)
        .map_err(Error::internal_legacy_adhoc)?;

    debug!(
        shape = ?grid.shape(),
        axis,
        stride,
        n_chord_voxels = chords.iter().filter(|&&c| c).count(),
        "generated chords"
    );
    Ok(chords.as_standard_layout().into_owned())
}

/// The three families of probe lines drawn by [`generate_chords_3d`]. The
/// discriminant is the label written into the chord map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ChordFamily {
    Axis0 = 1,
    Axis1 = 2,
    Axis2 = 3,
}

impl ChordFamily {
    const ALL: [ChordFamily; 3] = [ChordFamily::Axis0, ChordFamily::Axis1, ChordFamily::Axis2];

    fn label(self) -> u8 {
        self as u8
    }

    /// whether voxel `[i, j, k]` lies on one of this family's probe lines
    fn samples(self, [i, j, k]: [usize; 3], stride: usize) -> bool {
        match self {
            ChordFamily::Axis0 => j % stride == 0 && k % stride == 0,
            ChordFamily::Axis1 => i % stride == 0 && k % stride == PHASE_SHIFT,
            ChordFamily::Axis2 => i % stride == PHASE_SHIFT && j % stride == PHASE_SHIFT,
        }
    }
}

/// builds the label map of every probe line, refusing to let a voxel carry
/// more than one label
fn probe_lines_3d(dim: Ix3, stride: usize) -> Result<Array3<u8>, Error> {
    let mut probes = Array3::<u8>::zeros(dim);
    for ((i, j, k), voxel) in probes.indexed_iter_mut() {
        for family in ChordFamily::ALL {
            if !family.samples([i, j, k], stride) {
                continue;
            }
            if *voxel != 0 && *voxel != family.label() {
                return Err(Error::label_collision([i, j, k], *voxel, family.label()));
            }
            *voxel = family.label();
        }
    }
    Ok(probes)
}

/// Draws chords along all 3 axes of a 3D grid at once.
///
/// Voxels of chords parallel to axis 0, 1 and 2 are labeled 1, 2 and 3
/// respectively, every other voxel is 0. The lattices of the 3 families use
/// the same stride as [`generate_chords`], but the axis-1 and axis-2 lattices
/// are shifted by 2 voxels so that the families never share a voxel.
///
/// # Errors
/// Fails when `grid` isn't 3D or when `spacing` is negative. A voxel claimed
/// by two families is reported as an internal error.
pub fn generate_chords_3d<A, S, D>(grid: &ArrayBase<S, D>, spacing: i64) -> Result<ArrayD<u8>, Error>
where
    A: Voxel,
    S: Data<Elem = A>,
    D: Dimension,
{
    if grid.ndim() != 3 {
        return Err(Error::dimensionality("generate_chords_3d", grid.ndim(), &[3]));
    }
    let stride = chord_stride(spacing)?;

    let grid = grid
        .view()
        .into_dimensionality::<Ix3>()
        .map_err(|_| Error::internal_legacy_adhoc("unable to view the grid as a 3D array"))?;
    let probes = probe_lines_3d(grid.raw_dim(), stride)?;
    let chords = Zip::from(&probes)
        .and(&grid)
        .map_collect(|&family, voxel| if voxel.is_foreground() { family } else { 0 });

    debug!(
        shape = ?grid.shape(),
        stride,
        n_chord_voxels = chords.iter().filter(|&&c| c != 0).count(),
        "generated 3-axis chords"
    );
    Ok(chords.into_dyn())
}

/// Removes every chord whose connected component touches a face of the grid.
///
/// These chords were cut short by the edge of the image, so their length
/// says nothing about the pore they pass through. Removed voxels are reset to
/// background, surviving voxels keep their value (this preserves the labels
/// of [`generate_chords_3d`]).
///
/// Trimming is idempotent.
pub fn trim_boundary_chords<A, S, D>(chords: &ArrayBase<S, D>) -> Result<ArrayD<A>, Error>
where
    A: Voxel,
    S: Data<Elem = A>,
    D: Dimension,
{
    check_ndim("trim_boundary_chords", chords.ndim())?;
    let chords = chords.view().into_dyn();
    let mut components =
        label(chords.view(), Connectivity::Face).map_err(Error::internal_legacy_adhoc)?;
    let n_removed = components.clear_border();

    debug!(
        n_chords = components.n_labels(),
        n_removed, "trimmed boundary chords"
    );
    Ok(Zip::from(&chords)
        .and(components.labels())
        .map_collect(|&voxel, &id| if id > 0 { voxel } else { A::background() }))
}

/// [`generate_chords`] followed by [`trim_boundary_chords`] when `trim_edges`
/// is set
pub fn apply_chords<A, S, D>(
    grid: &ArrayBase<S, D>,
    spacing: i64,
    axis: usize,
    trim_edges: bool,
) -> Result<ArrayD<bool>, Error>
where
    A: Voxel,
    S: Data<Elem = A>,
    D: Dimension,
{
    let chords = generate_chords(grid, axis, spacing)?;
    if trim_edges {
        trim_boundary_chords(&chords)
    } else {
        Ok(chords)
    }
}

/// [`generate_chords_3d`] followed by [`trim_boundary_chords`] when
/// `trim_edges` is set
pub fn apply_chords_3d<A, S, D>(
    grid: &ArrayBase<S, D>,
    spacing: i64,
    trim_edges: bool,
) -> Result<ArrayD<u8>, Error>
where
    A: Voxel,
    S: Data<Elem = A>,
    D: Dimension,
{
    let chords = generate_chords_3d(grid, spacing)?;
    if trim_edges {
        trim_boundary_chords(&chords)
    } else {
        Ok(chords)
    }
}

/// Measures the length of every chord in `chords`.
///
/// Each connected component of foreground voxels counts as one chord, and its
/// length is the longest side of its bounding box. Lengths are reported in
/// the order that components are first encountered in a row-major scan of the
/// grid. A grid without chords produces an empty vector.
pub fn chord_lengths<A, S, D>(chords: &ArrayBase<S, D>) -> Result<Vec<usize>, Error>
where
    A: Voxel,
    S: Data<Elem = A>,
    D: Dimension,
{
    check_ndim("chord_lengths", chords.ndim())?;
    let components = label(chords.view().into_dyn(), Connectivity::Face)
        .map_err(Error::internal_legacy_adhoc)?;
    Ok(components
        .find_objects()
        .into_iter()
        .flatten()
        .map(|bbox| bbox.longest_side())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn stride_from_spacing() {
        assert_eq!(chord_stride(0).unwrap(), 4);
        assert_eq!(chord_stride(1).unwrap(), 6);
        assert_eq!(chord_stride(3).unwrap(), 10);
        assert!(chord_stride(-1).is_err());
        assert!(chord_stride(i64::MAX).is_err());
    }

    #[test]
    fn families_are_disjoint() {
        for stride in [4, 6, 8, 10] {
            let probes = probe_lines_3d(Ix3(13, 13, 13), stride);
            assert!(probes.is_ok());
        }
    }

    #[test]
    fn family_lattices() {
        let probes = probe_lines_3d(Ix3(9, 9, 9), 4).unwrap();
        assert_eq!(probes[[5, 4, 8]], 1);
        assert_eq!(probes[[4, 7, 6]], 2);
        assert_eq!(probes[[6, 2, 1]], 3);
        assert_eq!(probes[[1, 1, 1]], 0);
    }

    #[test]
    fn solid_grid_has_no_chords() {
        let grid = Array3::from_elem((8, 8, 8), false);
        let chords = generate_chords(&grid, 1, 0).unwrap();
        assert!(chords.iter().all(|&c| !c));
        assert!(chord_lengths(&chords).unwrap().is_empty());
    }
}
