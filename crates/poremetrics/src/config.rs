use ndarray::{ArrayBase, ArrayD, Data, Dimension};
use poremetrics_internal::{MAX_NDIM, Voxel};

use crate::{
    Error,
    chords::{apply_chords, apply_chords_3d, chord_stride},
    pore_sizes::porosimetry,
};

/// Assembles a [`ChordConfig`]
///
/// ```
/// use ndarray::Array2;
/// use poremetrics::ChordsBuilder;
///
/// let config = ChordsBuilder::new().spacing(1).axis(1).build().unwrap();
/// let grid = Array2::from_elem((16, 16), true);
/// let chords = config.apply(&grid).unwrap();
/// assert_eq!(chords.shape(), &[16, 16]);
/// ```
#[derive(Clone, Debug)]
pub struct ChordsBuilder {
    spacing: i64,
    axis: Option<usize>,
    trim_edges: bool,
}

impl Default for ChordsBuilder {
    fn default() -> Self {
        Self {
            spacing: 0,
            axis: None,
            trim_edges: true,
        }
    }
}

impl ChordsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// increases the separation between neighboring chords by `2*spacing`
    /// voxels beyond the minimum of 4
    pub fn spacing(mut self, spacing: i64) -> Self {
        self.spacing = spacing;
        self
    }

    /// Pins the axis that single-axis chords run along (axis 0 when left
    /// unset). A pinned configuration can't be used for 3-axis chords.
    pub fn axis(mut self, axis: usize) -> Self {
        self.axis = Some(axis);
        self
    }

    /// whether chords touching a face of the grid are discarded
    pub fn trim_edges(mut self, trim_edges: bool) -> Self {
        self.trim_edges = trim_edges;
        self
    }

    /// Validates the configuration.
    ///
    /// The axis can only be compared against the dimensions of a particular
    /// grid when the configuration is applied, so here it is only checked
    /// against the largest supported grid.
    pub fn build(self) -> Result<ChordConfig, Error> {
        chord_stride(self.spacing)?;
        if let Some(axis) = self.axis.filter(|&axis| axis >= MAX_NDIM) {
            return Err(Error::axis(axis, MAX_NDIM));
        }
        Ok(ChordConfig {
            spacing: self.spacing,
            axis: self.axis,
            trim_edges: self.trim_edges,
        })
    }
}

/// A validated chord configuration that can be applied to many grids
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChordConfig {
    spacing: i64,
    axis: Option<usize>,
    trim_edges: bool,
}

impl Default for ChordConfig {
    fn default() -> Self {
        Self {
            spacing: 0,
            axis: None,
            trim_edges: true,
        }
    }
}

impl ChordConfig {
    pub fn spacing(&self) -> i64 {
        self.spacing
    }

    /// the pinned axis, if any
    pub fn axis(&self) -> Option<usize> {
        self.axis
    }

    pub fn trim_edges(&self) -> bool {
        self.trim_edges
    }

    /// see [`apply_chords`]
    pub fn apply<A, S, D>(&self, grid: &ArrayBase<S, D>) -> Result<ArrayD<bool>, Error>
    where
        A: Voxel,
        S: Data<Elem = A>,
        D: Dimension,
    {
        apply_chords(
            grid,
            self.spacing,
            self.axis.unwrap_or(0),
            self.trim_edges,
        )
    }

    /// see [`apply_chords_3d`]
    ///
    /// # Errors
    /// Fails when the configuration was built with an explicit axis.
    pub fn apply_3d<A, S, D>(&self, grid: &ArrayBase<S, D>) -> Result<ArrayD<u8>, Error>
    where
        A: Voxel,
        S: Data<Elem = A>,
        D: Dimension,
    {
        if let Some(axis) = self.axis {
            return Err(Error::chord_axis(axis));
        }
        apply_chords_3d(grid, self.spacing, self.trim_edges)
    }
}

/// the radii tried by [`porosimetry`]
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum InvasionSizes {
    /// this many radii, log-spaced from the largest value of the distance
    /// transform down to 1
    Count(usize),
    /// explicit radii, sorted from largest to smallest
    Radii(Vec<f64>),
}

/// Assembles a [`PorosimetryConfig`]
///
/// ```
/// use ndarray::Array2;
/// use poremetrics::PorosimetryBuilder;
///
/// let config = PorosimetryBuilder::new()
///     .radii(vec![1.0, 3.0, 2.0])
///     .build()
///     .unwrap();
/// let grid = Array2::from_shape_fn((12, 12), |(i, _)| i > 0 && i < 11);
/// let invaded = config.apply(&grid).unwrap();
/// assert_eq!(invaded[[0, 0]], 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct PorosimetryBuilder {
    n_radii: usize,
    radii: Option<Vec<f64>>,
    access_limited: bool,
}

impl Default for PorosimetryBuilder {
    fn default() -> Self {
        Self {
            n_radii: 25,
            radii: None,
            access_limited: true,
        }
    }
}

impl PorosimetryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// the number of log-spaced radii to try when no explicit radii are given
    pub fn n_radii(mut self, n_radii: usize) -> Self {
        self.n_radii = n_radii;
        self
    }

    /// explicit radii to try, in any order. Takes precedence over
    /// [`PorosimetryBuilder::n_radii`].
    pub fn radii(mut self, radii: Vec<f64>) -> Self {
        self.radii = Some(radii);
        self
    }

    /// whether the invading phase must enter through the inlets (the
    /// default), or may appear anywhere a sphere fits
    pub fn access_limited(mut self, access_limited: bool) -> Self {
        self.access_limited = access_limited;
        self
    }

    pub fn build(self) -> Result<PorosimetryConfig, Error> {
        let sizes = match self.radii {
            None => {
                if self.n_radii == 0 {
                    return Err(Error::integer_range(
                        "number of invasion radii",
                        0,
                        1,
                        i64::MAX,
                    ));
                }
                InvasionSizes::Count(self.n_radii)
            }
            Some(mut radii) => {
                if radii.is_empty() {
                    return Err(Error::integer_range(
                        "number of invasion radii",
                        0,
                        1,
                        i64::MAX,
                    ));
                }
                if let Some(&bad) = radii.iter().find(|r| !(**r >= 0.0)) {
                    return Err(Error::float_range(
                        "invasion radius",
                        bad,
                        0.0,
                        f64::INFINITY,
                    ));
                }
                radii.sort_by(|a, b| b.total_cmp(a));
                InvasionSizes::Radii(radii)
            }
        };
        Ok(PorosimetryConfig {
            sizes,
            access_limited: self.access_limited,
        })
    }
}

/// A validated porosimetry configuration
#[derive(Clone, Debug, PartialEq)]
pub struct PorosimetryConfig {
    sizes: InvasionSizes,
    access_limited: bool,
}

impl Default for PorosimetryConfig {
    fn default() -> Self {
        Self {
            sizes: InvasionSizes::Count(25),
            access_limited: true,
        }
    }
}

impl PorosimetryConfig {
    pub(crate) fn sizes(&self) -> &InvasionSizes {
        &self.sizes
    }

    pub fn access_limited(&self) -> bool {
        self.access_limited
    }

    /// see [`porosimetry`], with every face of the grid acting as an inlet
    pub fn apply<A, S, D>(&self, grid: &ArrayBase<S, D>) -> Result<ArrayD<f64>, Error>
    where
        A: Voxel,
        S: Data<Elem = A>,
        D: Dimension,
    {
        porosimetry(grid, None, self)
    }
}
