use crate::core::actions::analyse_density::density_statistics::DensityStatistics;
use crate::core::actions::analyse_density::find_interesting_point::find_interesting_point;
use crate::core::data::density_map::DensityMap;
use crate::core::data::frame_spec::Centering;
use crate::core::data::iteration_grid::IterationGrid;
use crate::core::data::point::Point;

#[derive(Debug, Clone, PartialEq)]
pub struct DensityAnalysis {
    pub statistics: DensityStatistics,
    pub threshold: f64,
    /// Nearest interesting pixel to the centre, `None` when the search ran dry.
    pub nearest: Option<Point>,
}

pub fn analyse_density(grid: &IterationGrid, centering: Centering) -> DensityAnalysis {
    let statistics = DensityStatistics::from_grid(grid);
    let threshold = statistics.threshold(centering.sigma);
    let map = DensityMap::from_threshold(grid, threshold);

    DensityAnalysis {
        statistics,
        threshold,
        nearest: find_interesting_point(&map, centering.directions),
    }
}
