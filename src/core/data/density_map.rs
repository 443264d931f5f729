use crate::core::data::frame_size::FrameSize;
use crate::core::data::iteration_grid::IterationGrid;
use crate::core::data::point::Point;

/// Which pixels of a frame count as "interesting"; row-major like the grid it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DensityMap {
    size: FrameSize,
    flags: Vec<bool>,
}

impl DensityMap {
    /// Returns `None` when `flags` does not cover `size` exactly.
    #[must_use]
    pub fn from_row_major(size: FrameSize, flags: Vec<bool>) -> Option<Self> {
        (flags.len() == size.pixel_count()).then_some(Self { size, flags })
    }

    /// Marks every cell of `grid` whose count reaches `threshold`.
    #[must_use]
    pub fn from_threshold(grid: &IterationGrid, threshold: f64) -> Self {
        let flags = grid
            .counts()
            .iter()
            .map(|&count| f64::from(count) >= threshold)
            .collect();

        Self {
            size: grid.size(),
            flags,
        }
    }

    #[must_use]
    pub fn size(&self) -> FrameSize {
        self.size
    }

    #[must_use]
    pub fn is_interesting(&self, point: Point) -> bool {
        self.size.contains_point(point) && self.flags[self.size.index_of(point)]
    }

    #[must_use]
    pub fn interesting_count(&self) -> usize {
        self.flags.iter().filter(|&&flag| flag).count()
    }
}
