use rayon::ThreadPool;
use rayon::prelude::*;
use std::num::NonZeroUsize;

use crate::core::actions::generate_fractal::generate_fractal::generate_rows;
use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::actions::progress::ProgressObserver;
use crate::core::util::calculate_row_bands::{RowBand, calculate_row_bands};

/// Output of one band, row-major within the band.
#[derive(Debug, Clone, PartialEq)]
pub struct RowBlock<T> {
    pub band: RowBand,
    pub values: Vec<T>,
}

/// Renders the frame on `pool`, one band of contiguous rows per task.
///
/// Bands come from [`calculate_row_bands`] with `workers`; each worker writes only its own
/// block, and blocks are stitched back in ascending row order. The result is identical to
/// [`generate_fractal`](super::generate_fractal::generate_fractal) for any worker count.
/// `progress` hears about every finished row.
pub fn generate_fractal_parallel_rayon<Alg, P>(
    pool: &ThreadPool,
    workers: NonZeroUsize,
    algorithm: &Alg,
    progress: &P,
) -> Result<Vec<Alg::Success>, Alg::Failure>
where
    Alg: FractalAlgorithm + Sync,
    Alg::Success: Send,
    Alg::Failure: Send,
    P: ProgressObserver,
{
    let bands = calculate_row_bands(algorithm.frame_size().height(), workers);

    let blocks = pool.install(|| {
        bands
            .into_par_iter()
            .map(|band| render_band(algorithm, band, progress))
            .collect::<Result<Vec<_>, _>>()
    })?;

    Ok(merge_row_blocks(blocks))
}

fn render_band<Alg, P>(
    algorithm: &Alg,
    band: RowBand,
    progress: &P,
) -> Result<RowBlock<Alg::Success>, Alg::Failure>
where
    Alg: FractalAlgorithm,
    P: ProgressObserver,
{
    let width = algorithm.frame_size().width() as usize;
    let mut values = Vec::with_capacity(width * band.row_count() as usize);

    for y in band.rows() {
        values.extend(generate_rows(algorithm, y..y + 1)?);
        progress.rows_completed(1);
    }

    Ok(RowBlock { band, values })
}

/// Concatenates blocks by ascending start row.
pub fn merge_row_blocks<T>(mut blocks: Vec<RowBlock<T>>) -> Vec<T> {
    blocks.sort_by_key(|block| block.band.start_row);

    blocks.into_iter().flat_map(|block| block.values).collect()
}
