//! Implements types to represent "bin edges", used for distance binning of the
//! two-point statistics. The [`BinEdges`] trait provides a common interface
//! so that histograms don't need to know how their edges are laid out.

/// Super simple. This can be expanded as needed.
pub trait BinEdges {
    /// Calculate the bin index for a given value. Values which are equal to
    /// boundary values are considered part of the higher bin, i.e. intervals
    /// do not include the right edge (this also holds for the last bin).
    fn bin_index(&self, value: f64) -> Option<usize>;

    fn n_bins(&self) -> usize;
}

/// Regular bins with uniform spacing
#[derive(Clone, Debug, PartialEq)]
pub struct RegularBinEdges {
    start: f64,
    step: f64,
    n_bins: usize,
}

impl RegularBinEdges {
    /// The edges are the members of the integer range `start..stop` taken
    /// with stride `step`, i.e. `start, start + step, ...` up to (but not
    /// including) `stop`. This must produce at least two edges.
    pub fn from_range(start: usize, stop: usize, step: usize) -> Result<Self, &'static str> {
        if step == 0 {
            return Err("the step between bin edges must be positive");
        } else if stop <= start {
            return Err("stop must be greater than start");
        }
        let n_edges = (stop - start).div_ceil(step);
        if n_edges < 2 {
            Err("a minimum of two bin edges are required")
        } else {
            Ok(Self {
                start: start as f64,
                step: step as f64,
                n_bins: n_edges - 1,
            })
        }
    }

    pub fn edge(&self, i: usize) -> f64 {
        self.start + (i as f64) * self.step
    }

    /// every edge, including the right edge of the last bin
    pub fn edges(&self) -> Vec<f64> {
        (0..=self.n_bins).map(|i| self.edge(i)).collect()
    }

    /// the left edge of each bin
    pub fn left_edges(&self) -> Vec<f64> {
        (0..self.n_bins).map(|i| self.edge(i)).collect()
    }
}

impl BinEdges for RegularBinEdges {
    fn bin_index(&self, value: f64) -> Option<usize> {
        // written to reject NaN
        if !(value >= self.start && value < self.edge(self.n_bins)) {
            return None;
        }

        // this cast handles the truncation
        let index = ((value - self.start) / self.step) as usize;

        Some(index.min(self.n_bins - 1))
    }

    fn n_bins(&self) -> usize {
        self.n_bins
    }
}
