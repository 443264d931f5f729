use crate::core::data::iteration_grid::IterationGrid;

/// Population statistics of a frame's iteration counts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityStatistics {
    pub mean: f64,
    pub variance: f64,
    pub standard_deviation: f64,
}

impl DensityStatistics {
    #[must_use]
    pub fn from_grid(grid: &IterationGrid) -> Self {
        let counts = grid.counts();
        let n = counts.len() as f64;

        let mean = counts.iter().map(|&count| f64::from(count)).sum::<f64>() / n;
        let variance = counts
            .iter()
            .map(|&count| (f64::from(count) - mean).powi(2))
            .sum::<f64>()
            / n;

        Self {
            mean,
            variance,
            standard_deviation: variance.sqrt(),
        }
    }

    /// `mean + sigma * standard_deviation`.
    #[must_use]
    pub fn threshold(&self, sigma: f64) -> f64 {
        self.mean + sigma * self.standard_deviation
    }
}
