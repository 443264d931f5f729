use crate::core::data::frame_size::FrameSize;
use crate::core::data::point::Point;
use std::error::Error;
use std::fmt;

/// Iteration count recorded for points that never escaped.
pub const INTERIOR_MARKER: u16 = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IterationGridError {
    BoundsMismatch { expected: usize, actual: usize },
}

impl fmt::Display for IterationGridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoundsMismatch { expected, actual } => {
                write!(
                    f,
                    "iteration grid expects {} cells but got {}",
                    expected, actual
                )
            }
        }
    }
}

impl Error for IterationGridError {}

/// Per-pixel escape-time counts of one frame, stored row-major.
///
/// A count of [`INTERIOR_MARKER`] means the point stayed bounded for the whole
/// iteration budget. The escape loop starts counting at 1, so an escaping point
/// never collides with the marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationGrid {
    size: FrameSize,
    counts: Vec<u16>,
}

impl IterationGrid {
    pub fn from_row_major(size: FrameSize, counts: Vec<u16>) -> Result<Self, IterationGridError> {
        if counts.len() != size.pixel_count() {
            return Err(IterationGridError::BoundsMismatch {
                expected: size.pixel_count(),
                actual: counts.len(),
            });
        }

        Ok(Self { size, counts })
    }

    #[must_use]
    pub fn size(&self) -> FrameSize {
        self.size
    }

    #[must_use]
    pub fn counts(&self) -> &[u16] {
        &self.counts
    }

    #[must_use]
    pub fn get(&self, point: Point) -> Option<u16> {
        if !self.size.contains_point(point) {
            return None;
        }

        Some(self.counts[self.size.index_of(point)])
    }

    /// Counts in column-major order: column 0 top to bottom, then column 1, ...
    pub fn column_major(&self) -> impl Iterator<Item = u16> + '_ {
        let width = self.size.width() as usize;
        let height = self.size.height() as usize;

        (0..width).flat_map(move |x| (0..height).map(move |y| self.counts[y * width + x]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_2x3() -> IterationGrid {
        // rows: [1, 2], [3, 4], [5, 6]
        IterationGrid::from_row_major(FrameSize::new(2, 3).unwrap(), vec![1, 2, 3, 4, 5, 6])
            .unwrap()
    }

    #[test]
    fn test_from_row_major_rejects_wrong_length() {
        let result = IterationGrid::from_row_major(FrameSize::new(2, 2).unwrap(), vec![1, 2, 3]);

        assert_eq!(
            result,
            Err(IterationGridError::BoundsMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_get_reads_by_column_and_row() {
        let grid = grid_2x3();

        assert_eq!(grid.get(Point { x: 0, y: 0 }), Some(1));
        assert_eq!(grid.get(Point { x: 1, y: 0 }), Some(2));
        assert_eq!(grid.get(Point { x: 1, y: 2 }), Some(6));
        assert_eq!(grid.get(Point { x: 2, y: 0 }), None);
    }

    #[test]
    fn test_column_major_walks_columns_first() {
        let grid = grid_2x3();

        assert_eq!(grid.column_major().collect::<Vec<_>>(), vec![1, 3, 5, 2, 4, 6]);
    }
}
