//! Connectivity-based filters: blind pores, floating solid, region flooding
//! and extrema trimming.

use std::str::FromStr;

use ndarray::{ArrayBase, ArrayD, ArrayViewD, Data, Dimension, Zip};
use poremetrics_internal::{Connectivity, Reconstruction, Voxel, label, reconstruct};
use tracing::debug;

use crate::{Error, grid::check_ndim};

/// Finds the foreground voxels that aren't connected to any face of the grid.
///
/// Applied to the void phase, this locates blind pores; applied to the solid
/// phase it locates floating solid.
pub fn find_disconnected_voxels<A, S, D>(
    grid: &ArrayBase<S, D>,
    connectivity: Connectivity,
) -> Result<ArrayD<bool>, Error>
where
    A: Voxel,
    S: Data<Elem = A>,
    D: Dimension,
{
    check_ndim("find_disconnected_voxels", grid.ndim())?;
    let mut components =
        label(grid.view().into_dyn(), connectivity).map_err(Error::internal_legacy_adhoc)?;
    let n_connected = components.clear_border();
    debug!(
        n_components = components.n_labels(),
        n_connected, "found disconnected voxels"
    );
    Ok(components.labels().mapv(|id| id > 0))
}

/// Converts every void voxel that isn't connected to a face of the grid into
/// solid. Connectivity is [`Connectivity::Full`].
pub fn fill_blind_pores<S, D>(grid: &ArrayBase<S, D>) -> Result<ArrayD<bool>, Error>
where
    S: Data<Elem = bool>,
    D: Dimension,
{
    let holes = find_disconnected_voxels(grid, Connectivity::Full)?;
    let grid = grid.view().into_dyn();
    Ok(Zip::from(&grid)
        .and(&holes)
        .map_collect(|&void, &hole| void && !hole))
}

/// Converts every solid voxel that isn't connected to a face of the grid into
/// void. Connectivity is [`Connectivity::Full`].
pub fn trim_floating_solid<S, D>(grid: &ArrayBase<S, D>) -> Result<ArrayD<bool>, Error>
where
    S: Data<Elem = bool>,
    D: Dimension,
{
    let solid = grid.mapv(|void| !void);
    let floating = find_disconnected_voxels(&solid, Connectivity::Full)?;
    let grid = grid.view().into_dyn();
    Ok(Zip::from(&grid)
        .and(&floating)
        .map_collect(|&void, &floating| void || floating))
}

/// The per-region statistic written by [`flood`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FloodMode {
    /// the largest value in the region
    Max,
    /// the smallest value in the region
    Min,
    /// the number of voxels in the region
    Size,
}

impl FromStr for FloodMode {
    type Err = Error;

    /// Matches on the start of the name, so `"maximum"` and `"sizes"` are
    /// also accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("max") {
            Ok(FloodMode::Max)
        } else if s.starts_with("min") {
            Ok(FloodMode::Min)
        } else if s.starts_with("size") {
            Ok(FloodMode::Size)
        } else {
            Err(Error::mode_name(
                s.to_owned(),
                ["max", "min", "size"].map(String::from).to_vec(),
            ))
        }
    }
}

/// Fills each region of an image with a single value computed from the
/// region.
///
/// A region is a face-connected cluster of nonzero voxels. Every voxel of a
/// region receives the statistic selected by `mode`, and zeros stay zero.
pub fn flood<S, D>(values: &ArrayBase<S, D>, mode: FloodMode) -> Result<ArrayD<f64>, Error>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    check_ndim("flood", values.ndim())?;
    let values = values.view().into_dyn();
    let nonzero = values.mapv(|v| v != 0.0);
    let components =
        label(nonzero.view(), Connectivity::Face).map_err(Error::internal_legacy_adhoc)?;

    let region_values: Vec<f64> = match mode {
        FloodMode::Max | FloodMode::Min => {
            let (init, pick): (f64, fn(f64, f64) -> f64) = if mode == FloodMode::Max {
                (f64::NEG_INFINITY, f64::max)
            } else {
                (f64::INFINITY, f64::min)
            };
            let mut extrema = vec![init; components.n_labels() + 1];
            Zip::from(&values)
                .and(components.labels())
                .for_each(|&value, &id| extrema[id] = pick(extrema[id], value));
            extrema
        }
        FloodMode::Size => components
            .component_sizes()
            .into_iter()
            .map(|size| size as f64)
            .collect(),
    };

    debug!(?mode, n_regions = components.n_labels(), "flooded regions");
    Ok(components
        .labels()
        .mapv(|id| if id == 0 { 0.0 } else { region_values[id] }))
}

/// The extrema removed by [`trim_extrema`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtremaMode {
    /// decapitate peaks
    Maxima,
    /// fill valleys
    Minima,
    /// decapitate peaks, then fill valleys
    Extrema,
}

impl FromStr for ExtremaMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "maxima" => Ok(ExtremaMode::Maxima),
            "minima" => Ok(ExtremaMode::Minima),
            "extrema" => Ok(ExtremaMode::Extrema),
            _ => Err(Error::mode_name(
                s.to_owned(),
                ["maxima", "minima", "extrema"].map(String::from).to_vec(),
            )),
        }
    }
}

/// Trims the local extrema of a greyscale image by `h`.
///
/// Every regional maximum is lowered by up to `h` (and every regional minimum
/// is raised by up to `h`) using greyscale reconstruction with full
/// connectivity. Peaks and valleys shallower than `h` disappear entirely.
///
/// # Errors
/// Fails when `values` isn't 2D or 3D, or when `h` is negative, infinite or
/// NaN.
pub fn trim_extrema<S, D>(
    values: &ArrayBase<S, D>,
    h: f64,
    mode: ExtremaMode,
) -> Result<ArrayD<f64>, Error>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    check_ndim("trim_extrema", values.ndim())?;
    if !(0.0..=f64::MAX).contains(&h) {
        return Err(Error::float_range("extrema height", h, 0.0, f64::MAX));
    }
    let values = values.view().into_dyn();

    let lower_peaks = |mask: ArrayViewD<f64>| {
        reconstruct(
            mask.mapv(|v| v - h).view(),
            mask,
            Reconstruction::Dilation,
            Connectivity::Full,
        )
        .map_err(Error::internal_legacy_adhoc)
    };
    let raise_valleys = |mask: ArrayViewD<f64>| {
        reconstruct(
            mask.mapv(|v| v + h).view(),
            mask,
            Reconstruction::Erosion,
            Connectivity::Full,
        )
        .map_err(Error::internal_legacy_adhoc)
    };
    let trimmed = match mode {
        ExtremaMode::Maxima => lower_peaks(values)?,
        ExtremaMode::Minima => raise_valleys(values)?,
        ExtremaMode::Extrema => raise_valleys(lower_peaks(values)?.view())?,
    };

    debug!(?mode, h, "trimmed extrema");
    Ok(trimmed)
}
