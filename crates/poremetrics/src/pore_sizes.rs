//! Distance-based pore size maps: local thickness and simulated porosimetry.
//!
//! Both are built from the exact Euclidean distance transform of the void
//! phase. A sphere of radius `r` fits wherever the distance transform is at
//! least `r`, and the voxels covered by such spheres are found by thresholding
//! the distance transform of the sphere centers.

use ndarray::{ArrayBase, ArrayD, ArrayViewD, Data, Dimension, IxDyn, Zip};
use poremetrics_internal::{Connectivity, Voxel, label, squared_distance_transform};
use tracing::debug;

use crate::{
    Error,
    config::{InvasionSizes, PorosimetryConfig},
    grid::check_ndim,
};

/// squared distance from every voxel to the nearest voxel of `centers`
fn squared_distance_to(centers: &ArrayD<bool>) -> ArrayD<f64> {
    squared_distance_transform(centers.mapv(|center| !center).view())
}

/// Computes the euclidean distance from every foreground voxel to the nearest
/// background voxel. Background voxels hold 0.
///
/// The faces of the grid aren't treated as background, so a grid without any
/// background voxels is infinitely far from the background everywhere.
pub fn distance_transform<A, S, D>(grid: &ArrayBase<S, D>) -> Result<ArrayD<f64>, Error>
where
    A: Voxel,
    S: Data<Elem = A>,
    D: Dimension,
{
    check_ndim("distance_transform", grid.ndim())?;
    Ok(squared_distance_transform(grid.view().into_dyn()).mapv(f64::sqrt))
}

/// Computes the local thickness of the foreground phase.
///
/// Each foreground voxel receives the radius of the largest sphere that
/// covers it while fitting entirely inside the foreground. This differs from
/// the distance transform, which only considers spheres centered on the
/// voxel. Candidate radii are the distinct values of the distance transform
/// rounded to the nearest integer (ties to even). Background voxels hold 0.
///
/// A grid without background voxels has an infinite local thickness.
pub fn local_thickness<A, S, D>(grid: &ArrayBase<S, D>) -> Result<ArrayD<f64>, Error>
where
    A: Voxel,
    S: Data<Elem = A>,
    D: Dimension,
{
    let dist = distance_transform(grid)?;

    let mut radii: Vec<f64> = dist.iter().map(|d| d.round_ties_even()).collect();
    radii.sort_by(f64::total_cmp);
    radii.dedup();

    let mut thickness = ArrayD::<f64>::zeros(dist.raw_dim());
    for &radius in radii.iter().filter(|&&r| r > 0.0) {
        let centers = dist.mapv(|d| d >= radius);
        if !centers.iter().any(|&c| c) {
            continue;
        }
        let covered_sqr = radius * radius;
        Zip::from(&mut thickness)
            .and(&squared_distance_to(&centers))
            .for_each(|t, &d_sqr| {
                if d_sqr <= covered_sqr {
                    *t = radius;
                }
            });
    }

    let grid = grid.view().into_dyn();
    Zip::from(&mut thickness)
        .and(&grid)
        .for_each(|t, voxel| {
            if !voxel.is_foreground() {
                *t = 0.0;
            }
        });
    debug!(
        shape = ?grid.shape(),
        n_radii = radii.len(),
        "computed local thickness"
    );
    Ok(thickness)
}

/// marks every voxel lying on a face of a grid with `shape`
fn face_voxels(shape: &[usize]) -> ArrayD<bool> {
    ArrayD::from_shape_fn(IxDyn(shape), |index: IxDyn| {
        index
            .slice()
            .iter()
            .zip(shape)
            .any(|(&i, &len)| i == 0 || i + 1 == len)
    })
}

/// the default radii: `n` values evenly spaced in log space, from
/// `largest` down to 1
fn log_spaced_radii(largest: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![largest];
    }
    (0..n)
        .map(|i| largest.powf(1.0 - (i as f64) / ((n - 1) as f64)))
        .collect()
}

/// keeps the sphere centers that the invading phase can reach from `inlets`
/// without passing through a narrower constriction
fn accessible_centers(
    centers: &ArrayD<bool>,
    inlets: &ArrayViewD<bool>,
) -> Result<ArrayD<bool>, Error> {
    let with_inlets = Zip::from(centers)
        .and(inlets)
        .map_collect(|&center, &inlet| center || inlet);
    let components =
        label(with_inlets.view(), Connectivity::Face).map_err(Error::internal_legacy_adhoc)?;

    let mut reached = vec![false; components.n_labels() + 1];
    Zip::from(components.labels())
        .and(inlets)
        .for_each(|&id, &inlet| {
            if inlet {
                reached[id] = true;
            }
        });
    reached[0] = false;
    Ok(Zip::from(components.labels())
        .and(inlets)
        .map_collect(|&id, &inlet| reached[id] && !inlet))
}

/// Simulates a porosimetry (non-wetting invasion) experiment on the void
/// phase.
///
/// Spheres of decreasing radius are inserted wherever they fit. Each void
/// voxel receives the largest radius at which it is covered by an inserted
/// sphere, and 0 when no sphere ever covers it. Solid voxels always hold 0.
/// Comparing the result against a radius `r` gives the invaded configuration
/// at the capillary pressure matching `r`.
///
/// When the configuration is access limited, spheres only enter through
/// `inlets` (every face of the grid when `None`) and may only reach sphere
/// centers that are connected to an inlet through other centers of the same
/// size.
///
/// # Errors
/// Fails when `grid` isn't 2D or 3D, or when `inlets` doesn't have the shape
/// of `grid`.
pub fn porosimetry<A, S, D>(
    grid: &ArrayBase<S, D>,
    inlets: Option<ArrayViewD<bool>>,
    config: &PorosimetryConfig,
) -> Result<ArrayD<f64>, Error>
where
    A: Voxel,
    S: Data<Elem = A>,
    D: Dimension,
{
    check_ndim("porosimetry", grid.ndim())?;
    let grid = grid.view().into_dyn();
    let inlets = match inlets {
        Some(inlets) if inlets.shape() != grid.shape() => {
            return Err(Error::shape_mismatch(
                "porosimetry inlets",
                grid.shape(),
                inlets.shape(),
            ));
        }
        Some(inlets) => inlets.to_owned(),
        None => face_voxels(grid.shape()),
    };

    let dist = squared_distance_transform(grid.view()).mapv(f64::sqrt);
    let mut invaded = ArrayD::<f64>::zeros(dist.raw_dim());
    let radii = match config.sizes() {
        InvasionSizes::Radii(radii) => radii.clone(),
        InvasionSizes::Count(n) => {
            let largest = dist.iter().copied().fold(0.0, f64::max);
            if largest == 0.0 {
                // no void voxels
                return Ok(invaded);
            } else if largest.is_infinite() {
                // no solid voxels, so a sphere of any size fits everywhere
                return Ok(dist);
            }
            log_spaced_radii(largest, *n)
        }
    };

    for &radius in radii.iter().filter(|&&r| r > 0.0) {
        let mut centers = dist.mapv(|d| d >= radius);
        if config.access_limited() {
            centers = accessible_centers(&centers, &inlets.view())?;
        }
        if !centers.iter().any(|&c| c) {
            continue;
        }
        let reach_sqr = radius * radius;
        Zip::from(&mut invaded)
            .and(&squared_distance_to(&centers))
            .for_each(|v, &d_sqr| {
                if *v == 0.0 && d_sqr < reach_sqr {
                    *v = radius;
                }
            });
    }

    debug!(
        shape = ?grid.shape(),
        n_radii = radii.len(),
        access_limited = config.access_limited(),
        n_invaded = invaded.iter().filter(|&&v| v > 0.0).count(),
        "simulated porosimetry"
    );
    Ok(invaded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_spacing() {
        assert_eq!(log_spaced_radii(7.5, 1), vec![7.5]);
        let radii = log_spaced_radii(100.0, 3);
        assert_eq!(radii.len(), 3);
        assert_eq!(radii[0], 100.0);
        assert!((radii[1] - 10.0).abs() < 1e-12);
        assert_eq!(radii[2], 1.0);
    }

    #[test]
    fn faces() {
        let faces = face_voxels(&[3, 4]);
        assert_eq!(faces.iter().filter(|&&f| f).count(), 10);
        assert!(!faces[[1, 1]]);
        assert!(!faces[[1, 2]]);
    }
}
