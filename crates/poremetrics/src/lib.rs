/*!
Computes statistical morphology descriptors of porous materials from binary
voxel images (2D or 3D grids where foreground marks the void phase and
background marks the solid).

# Chord metrology

Chords are straight runs of void voxels sampled along one axis at the nodes
of a regular lattice. The pipeline is:

1. [`generate_chords`] (one axis) or [`generate_chords_3d`] (all 3 axes,
   labeled 1/2/3),
2. [`trim_boundary_chords`] to drop chords cut short by the edges of the
   image,
3. [`chord_lengths`] to measure each remaining chord.

[`apply_chords`], [`apply_chords_3d`] and [`ChordConfig`] bundle the first
two steps.

# Two-point correlation

[`two_point_correlation`] samples a lattice of points, computes the distance
between every pair of them and reports, per distance bin, how often a pair
starting in the void phase also ends in the void phase.

# Pore sizes

[`distance_transform`], [`local_thickness`] and [`porosimetry`] map the size
of the pores each void voxel belongs to. [`size_distribution`] tallies such a
map.

# Grid model

Grids are [`ndarray`] arrays of any element implementing [`Voxel`] (`bool`
or integers, where positive values are foreground). All operations are pure
functions of their inputs.

# Logging

Diagnostics are emitted as `tracing` events at the `debug` level. No
subscriber is installed by this crate.
*/

#![deny(rustdoc::broken_intra_doc_links)]

// inform build-system of the crates in this package
mod chords;
mod config;
mod correlation;
mod error;
mod filters;
mod grid;
mod metrics;
mod pore_sizes;

// symbols visible outside of the package
pub use chords::{
    apply_chords, apply_chords_3d, chord_lengths, generate_chords, generate_chords_3d,
    trim_boundary_chords,
};
pub use config::{ChordConfig, ChordsBuilder, PorosimetryBuilder, PorosimetryConfig};
pub use correlation::{TwoPointCorrelation, two_point_correlation};
pub use error::{Error, ErrorCategory};
pub use filters::{
    ExtremaMode, FloodMode, fill_blind_pores, find_disconnected_voxels, flood, trim_extrema,
    trim_floating_solid,
};
pub use grid::{permute_axis_to_front, restore_axis_order};
pub use metrics::{porosity, size_distribution};
pub use pore_sizes::{distance_transform, local_thickness, porosimetry};
pub use poremetrics_internal::{Connectivity, Voxel};
