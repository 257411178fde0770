//! Brute-force estimation of the two-point correlation of the void phase.

use ndarray::{ArrayBase, Axis, Data, Dimension};
use poremetrics_internal::{
    Histogram, RegularBinEdges, Voxel, pairwise_distances, regular_sample_points,
};
use tracing::debug;

use crate::{Error, grid::check_ndim};

/// The binned output of [`two_point_correlation`]
///
/// The per-bin weights of both histograms are kept alongside the probability
/// so that callers can tell empty bins apart from bins with zero correlation.
#[derive(Clone, Debug)]
pub struct TwoPointCorrelation {
    bin_edges: Vec<f64>,
    distances: Vec<f64>,
    probability: Vec<f64>,
    void_pairs: Vec<f64>,
    void_void_pairs: Vec<f64>,
}

impl TwoPointCorrelation {
    /// a result without any distance bins, keeping the (at most one) edge
    /// that fit in the distance range
    fn without_bins(bin_edges: Vec<f64>) -> Self {
        Self {
            bin_edges,
            distances: Vec::new(),
            probability: Vec::new(),
            void_pairs: Vec::new(),
            void_void_pairs: Vec::new(),
        }
    }

    /// Every bin edge, including the right edge of the last bin. When the
    /// distance range is too short to hold a bin, this holds at most one
    /// edge and every other accessor is empty.
    pub fn bin_edges(&self) -> &[f64] {
        &self.bin_edges
    }

    /// The left edge of every distance bin. Bin `i` covers
    /// `[distances[i], distances[i] + spacing)`.
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// The fraction of pairs in each bin whose second point is void, given
    /// that the first point is void. Bins without any such pairs hold `NaN`.
    pub fn probability(&self) -> &[f64] {
        &self.probability
    }

    /// number of (ordered) pairs per bin whose first point is void
    pub fn void_pairs(&self) -> &[f64] {
        &self.void_pairs
    }

    /// number of (ordered) pairs per bin whose points are both void
    pub fn void_void_pairs(&self) -> &[f64] {
        &self.void_void_pairs
    }

    /// whether bin `i` holds any pairs (a `NaN` probability means "no data",
    /// not zero correlation)
    pub fn has_data(&self, i: usize) -> bool {
        self.void_pairs[i] > 0.0
    }

    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.distances, self.probability)
    }
}

/// Estimates the two-point correlation function of the void phase.
///
/// A lattice of sample points with stride `spacing` is overlaid on the grid,
/// and the euclidean distance between every ordered pair of sample points
/// (each point is also paired with itself) is binned into
/// `[0, spacing), [spacing, 2*spacing), ...` up to `floor(min(shape) / 2)`.
/// For each bin, the result is the fraction of pairs whose first point is
/// void that also have a void second point.
///
/// # Note
/// This is the one-sided conditional probability `P(b void | a void, |a-b|)`,
/// which is what the pair selection produces. It is not symmetrized.
///
/// The full distance matrix between sample points is held in memory, so the
/// cost grows quadratically with the number of sample points. Pick `spacing`
/// accordingly for large grids.
///
/// When `floor(min(shape) / 2)` is too short to hold a whole bin, the result
/// has no bins at all.
///
/// # Errors
/// Fails when `spacing` isn't positive, when `grid` isn't 2D or 3D, or when
/// fewer than two sample points fit in the grid.
pub fn two_point_correlation<A, S, D>(
    grid: &ArrayBase<S, D>,
    spacing: i64,
) -> Result<TwoPointCorrelation, Error>
where
    A: Voxel,
    S: Data<Elem = A>,
    D: Dimension,
{
    check_ndim("two_point_correlation", grid.ndim())?;
    const MAX_SPACING: i64 = isize::MAX as i64;
    if !(1..=MAX_SPACING).contains(&spacing) {
        return Err(Error::integer_range(
            "two-point correlation spacing",
            spacing,
            1,
            MAX_SPACING,
        ));
    }
    let spacing = spacing as usize;

    let grid = grid.view().into_dyn();
    let shape = grid.shape();
    let positions = regular_sample_points(shape, spacing).map_err(Error::internal_legacy_adhoc)?;
    let n_points = positions.len_of(Axis(1));
    if n_points < 2 {
        return Err(Error::sample_grid(
            shape,
            spacing,
            "fewer than two sample points fit inside the grid",
        ));
    }

    let half_extent = shape.iter().copied().min().unwrap_or(0) / 2;
    if half_extent.div_ceil(spacing) < 2 {
        // the edges 0, spacing, ... below half_extent don't close a single bin
        debug!(
            shape = ?shape,
            spacing,
            n_points,
            "distance range holds no complete bin"
        );
        return Ok(TwoPointCorrelation::without_bins(
            (0..half_extent).step_by(spacing).map(|e| e as f64).collect(),
        ));
    }
    let edges = RegularBinEdges::from_range(0, half_extent, spacing)
        .map_err(Error::internal_legacy_adhoc)?;

    let is_void: Vec<bool> = positions
        .axis_iter(Axis(1))
        .map(|point| {
            let index = point.to_vec();
            grid[index.as_slice()].is_foreground()
        })
        .collect();
    let distances = pairwise_distances(positions.mapv(|x| x as f64).view());

    let mut void_pairs = Histogram::new(edges.clone());
    let mut void_void_pairs = Histogram::new(edges.clone());
    for (row, &first_void) in distances.rows().into_iter().zip(&is_void) {
        if !first_void {
            continue;
        }
        for (&distance, &second_void) in row.iter().zip(&is_void) {
            void_pairs.consume(distance, 1.0);
            if second_void {
                void_void_pairs.consume(distance, 1.0);
            }
        }
    }

    let void_pairs = void_pairs.into_weights();
    let void_void_pairs = void_void_pairs.into_weights();
    // 0/0 yields NaN for bins without data
    let probability = void_void_pairs
        .iter()
        .zip(&void_pairs)
        .map(|(both, first)| both / first)
        .collect();

    debug!(
        shape = ?shape,
        spacing,
        n_points,
        n_void_points = is_void.iter().filter(|&&v| v).count(),
        n_bins = void_pairs.len(),
        "computed two-point correlation"
    );
    Ok(TwoPointCorrelation {
        bin_edges: edges.edges(),
        distances: edges.left_edges(),
        probability,
        void_pairs,
        void_void_pairs,
    })
}
