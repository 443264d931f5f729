use std::collections::BTreeSet;
use std::num::NonZeroUsize;
use std::ops::Range;

/// Contiguous run of rows rendered by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBand {
    pub start_row: u32,
    pub end_row: u32,
}

impl RowBand {
    #[must_use]
    pub fn rows(&self) -> Range<u32> {
        self.start_row..self.end_row
    }

    #[must_use]
    pub fn row_count(&self) -> u32 {
        self.end_row - self.start_row
    }
}

/// Splits `height` rows into bands of `ceil(height / workers)` rows.
///
/// Only non-empty bands are returned, in ascending row order; their union is exactly
/// `0..height`. With more workers than rows every band holds a single row.
#[must_use]
pub fn calculate_row_bands(height: u32, workers: NonZeroUsize) -> Vec<RowBand> {
    let workers = u32::try_from(workers.get()).unwrap_or(u32::MAX);
    let rows_per_band = height.div_ceil(workers).max(1);

    (0..height)
        .step_by(rows_per_band as usize)
        .map(|start_row| RowBand {
            start_row,
            end_row: start_row.saturating_add(rows_per_band).min(height),
        })
        .collect()
}

/// Worker count used when none is configured.
#[must_use]
pub fn available_workers() -> NonZeroUsize {
    std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
}

/// Powers of two up to `up_to`, plus `up_to` itself, ascending and without repeats.
#[must_use]
pub fn worker_count_ladder(up_to: NonZeroUsize) -> Vec<NonZeroUsize> {
    let mut ladder: BTreeSet<NonZeroUsize> = std::iter::successors(Some(NonZeroUsize::MIN), |n| {
        n.checked_mul(NonZeroUsize::new(2)?)
    })
    .take_while(|n| *n <= up_to)
    .collect();
    ladder.insert(up_to);

    ladder.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workers(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn assert_covers(bands: &[RowBand], height: u32) {
        let rows: Vec<u32> = bands.iter().flat_map(RowBand::rows).collect();

        assert_eq!(rows, (0..height).collect::<Vec<_>>());
        assert!(bands.iter().all(|band| band.row_count() > 0));
    }

    #[test]
    fn test_even_split() {
        let bands = calculate_row_bands(20, workers(4));

        assert_eq!(bands.len(), 4);
        assert_eq!(
            bands[1],
            RowBand {
                start_row: 5,
                end_row: 10
            }
        );
        assert_covers(&bands, 20);
    }

    #[test]
    fn test_uneven_split_last_band_is_short() {
        let bands = calculate_row_bands(10, workers(4));

        // ceil(10 / 4) = 3 rows per band
        assert_eq!(
            bands,
            vec![
                RowBand { start_row: 0, end_row: 3 },
                RowBand { start_row: 3, end_row: 6 },
                RowBand { start_row: 6, end_row: 9 },
                RowBand { start_row: 9, end_row: 10 },
            ]
        );
    }

    #[test]
    fn test_empty_bands_are_dropped() {
        // ceil(9 / 8) = 2 rows per band leaves only 5 non-empty bands
        let bands = calculate_row_bands(9, workers(8));

        assert_eq!(bands.len(), 5);
        assert_covers(&bands, 9);
    }

    #[test]
    fn test_more_workers_than_rows() {
        let bands = calculate_row_bands(3, workers(16));

        assert_eq!(bands.len(), 3);
        assert_covers(&bands, 3);
    }

    #[test]
    fn test_single_worker_gets_whole_frame() {
        let bands = calculate_row_bands(1088, workers(1));

        assert_eq!(
            bands,
            vec![RowBand {
                start_row: 0,
                end_row: 1088
            }]
        );
    }

    #[test]
    fn test_worker_ladder_has_no_repeats() {
        let counts = |n| -> Vec<usize> {
            worker_count_ladder(workers(n)).iter().map(|w| w.get()).collect()
        };

        assert_eq!(counts(1), vec![1]);
        assert_eq!(counts(2), vec![1, 2]);
        assert_eq!(counts(4), vec![1, 2, 4]);
        assert_eq!(counts(6), vec![1, 2, 4, 6]);
    }

    #[test]
    fn test_available_workers_is_at_least_one() {
        assert!(available_workers().get() >= 1);
    }
}
