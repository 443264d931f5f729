use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::point::Point;
use std::ops::Range;

/// Computes every pixel of the algorithm's frame on the calling thread, row-major.
pub fn generate_fractal<Alg: FractalAlgorithm>(
    algorithm: &Alg,
) -> Result<Vec<Alg::Success>, Alg::Failure> {
    generate_rows(algorithm, 0..algorithm.frame_size().height())
}

/// Computes whole rows `rows` of the frame, row-major.
pub fn generate_rows<Alg: FractalAlgorithm>(
    algorithm: &Alg,
    rows: Range<u32>,
) -> Result<Vec<Alg::Success>, Alg::Failure> {
    let width = algorithm.frame_size().width();

    rows.flat_map(|y| (0..width).map(move |x| Point { x, y }))
        .map(|pixel| algorithm.compute(pixel))
        .collect()
}
