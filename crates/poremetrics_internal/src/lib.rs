//! Numerical primitives shared by the `poremetrics` crate.
//!
//! Everything in here operates on plain [`ndarray`] arrays and reports
//! problems with `&'static str` messages. The public crate is responsible for
//! validating user input up front and for wrapping these messages in its own
//! error type.

mod bins;
mod distance;
mod edt;
mod grid;
mod histogram;
mod label;
mod reconstruct;
mod voxel;

pub use bins::{BinEdges, RegularBinEdges};
pub use distance::{pairwise_distances, regular_sample_points};
pub use edt::squared_distance_transform;
pub use grid::{
    MAX_NDIM, check_ndim, demote_from_3d, permute_axis_to_front, promote_to_3d, restore_axis_order,
};
pub use histogram::Histogram;
pub use label::{BoundingBox, Connectivity, LabeledGrid, label};
pub use reconstruct::{Reconstruction, reconstruct};
pub use voxel::Voxel;
