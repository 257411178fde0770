use crate::bins::BinEdges;

/// A weighted 1D histogram over an arbitrary set of bin edges.
///
/// Values that fall outside of the bins are silently dropped.
#[derive(Clone, Debug)]
pub struct Histogram<B> {
    edges: B,
    weights: Vec<f64>,
}

impl<B: BinEdges> Histogram<B> {
    pub fn new(edges: B) -> Self {
        let weights = vec![0.0; edges.n_bins()];
        Self { edges, weights }
    }

    /// consume the value and weight to update the histogram
    pub fn consume(&mut self, val: f64, weight: f64) {
        if let Some(bin_idx) = self.edges.bin_index(val) {
            self.weights[bin_idx] += weight;
        }
    }

    pub fn into_weights(self) -> Vec<f64> {
        self.weights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bins::RegularBinEdges;

    #[test]
    fn consume_values() {
        let edges = RegularBinEdges::from_range(0, 7, 2).unwrap();
        let mut hist = Histogram::new(edges);
        for val in [0.0, 1.5, 2.0, 3.0, 4.5, 6.0, 7.5, -1.0] {
            hist.consume(val, 1.0);
        }
        hist.consume(5.0, 0.5);
        // edges are [0, 2, 4, 6]; 6.0 lies on the exclusive right edge
        assert_eq!(hist.into_weights(), vec![2.0, 2.0, 1.5]);
    }
}
