use rayon::ThreadPool;
use std::error::Error;
use std::fmt;
use std::num::NonZeroUsize;

use crate::core::actions::generate_fractal::generate_fractal_parallel_rayon::generate_fractal_parallel_rayon;
use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::actions::generate_pixel_buffer::generate_pixel_buffer::{
    GeneratePixelBufferError, generate_pixel_buffer,
};
use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::actions::progress::ProgressObserver;
use crate::core::data::iteration_grid::{IterationGrid, IterationGridError};
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::fractals::escape_time::EscapeTime;

/// Both artifacts of one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRender {
    pub iterations: IterationGrid,
    pub pixels: PixelBuffer,
}

#[derive(Debug)]
pub enum RenderFrameError<E> {
    Algorithm(E),
    IterationGrid(IterationGridError),
    PixelBuffer(GeneratePixelBufferError),
}

impl<E: fmt::Display> fmt::Display for RenderFrameError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Algorithm(err) => write!(f, "algorithm error: {}", err),
            Self::IterationGrid(err) => write!(f, "iteration grid error: {}", err),
            Self::PixelBuffer(err) => write!(f, "{}", err),
        }
    }
}

impl<E: Error + 'static> Error for RenderFrameError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Algorithm(err) => Some(err),
            Self::IterationGrid(err) => Some(err),
            Self::PixelBuffer(err) => Some(err),
        }
    }
}

impl<E> From<IterationGridError> for RenderFrameError<E> {
    fn from(err: IterationGridError) -> Self {
        Self::IterationGrid(err)
    }
}

impl<E> From<GeneratePixelBufferError> for RenderFrameError<E> {
    fn from(err: GeneratePixelBufferError) -> Self {
        Self::PixelBuffer(err)
    }
}

/// Computes a frame's iteration grid in parallel, then colours it.
pub fn render_frame<Alg, CMap, P>(
    pool: &ThreadPool,
    workers: NonZeroUsize,
    algorithm: &Alg,
    colour_map: &CMap,
    progress: &P,
) -> Result<FrameRender, RenderFrameError<Alg::Failure>>
where
    Alg: FractalAlgorithm<Success = EscapeTime> + Sync,
    Alg::Failure: Send,
    CMap: ColourMap<EscapeTime>,
    P: ProgressObserver,
{
    let size = algorithm.frame_size();
    let escape_times = generate_fractal_parallel_rayon(pool, workers, algorithm, progress)
        .map_err(RenderFrameError::Algorithm)?;

    let counts = escape_times
        .iter()
        .map(|escape_time| escape_time.iteration_count())
        .collect();
    let iterations = IterationGrid::from_row_major(size, counts)?;
    let pixels = generate_pixel_buffer(escape_times, colour_map, size)?;

    Ok(FrameRender { iterations, pixels })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::progress::NoProgress;
    use crate::core::data::colour::Colour;
    use crate::core::data::frame_size::FrameSize;
    use crate::core::data::frame_spec::ColourWeights;
    use crate::core::data::point::Point;
    use crate::core::data::viewport::Viewport;
    use crate::core::fractals::fractal_kinds::FractalKind;
    use crate::core::fractals::frame_algorithm::FrameAlgorithm;
    use crate::core::fractals::weighted_colour_map::WeightedColourMap;
    use crate::core::util::pixel_to_complex_coords::PlaneMapping;
    use rayon::ThreadPoolBuilder;

    fn julia(width: u32, height: u32) -> FrameAlgorithm {
        let viewport = Viewport::from_f64(-1.25, 1.25, -1.25, 1.25).unwrap();
        let mapping = PlaneMapping::new(&viewport, FrameSize::new(width, height).unwrap(), 24);

        FrameAlgorithm::new(FractalKind::Julia { a: 0.39, b: 0.6 }, mapping, 100).unwrap()
    }

    fn render(workers: usize, algorithm: &FrameAlgorithm) -> FrameRender {
        let pool = ThreadPoolBuilder::new().num_threads(workers).build().unwrap();
        let colour_map = WeightedColourMap::new(ColourWeights { r: 15, g: 25, b: 18 }, 100);

        render_frame(
            &pool,
            NonZeroUsize::new(workers).unwrap(),
            algorithm,
            &colour_map,
            &NoProgress,
        )
        .unwrap()
    }

    #[test]
    fn test_output_is_independent_of_worker_count() {
        let algorithm = julia(32, 20);
        let reference = render(1, &algorithm);

        for workers in [2, 3, 7] {
            assert_eq!(render(workers, &algorithm), reference, "workers = {}", workers);
        }
    }

    #[test]
    fn test_pixels_follow_iteration_counts() {
        let frame = render(2, &julia(16, 16));
        let corner = Point { x: 0, y: 0 };

        assert_eq!(frame.iterations.get(corner), Some(2));
        assert_eq!(
            frame.pixels.colour_at(corner),
            Some(Colour { r: 30, g: 50, b: 36 })
        );
    }

    #[test]
    fn test_interior_pixels_are_black() {
        let frame = render(2, &julia(16, 16));
        let size = frame.iterations.size();

        for y in 0..size.height() {
            for x in 0..size.width() {
                let point = Point { x, y };
                if frame.iterations.get(point) == Some(0) {
                    assert_eq!(frame.pixels.colour_at(point), Some(Colour::BLACK));
                }
            }
        }
    }
}
