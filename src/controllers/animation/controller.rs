use crate::controllers::animation::errors::AnimationError;
use crate::controllers::animation::run_config::{RunConfig, RunStart, RunSummary};
use crate::controllers::ports::checkpoint_store::CheckpointStore;
use crate::controllers::ports::frame_sink::{FrameSink, RenderedFrame};
use crate::core::actions::adjust_precision::adjust_precision;
use crate::core::actions::analyse_density::analyse_density::analyse_density;
use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::actions::render_frame::render_frame;
use crate::core::actions::stop_signal::{NeverStop, StopSignal};
use crate::core::actions::transform_viewport::transform_viewport;
use crate::core::data::checkpoint::Checkpoint;
use crate::core::data::frame_sequence::FrameSequence;
use crate::core::data::viewport::Viewport;
use crate::core::fractals::frame_algorithm::FrameAlgorithm;
use crate::core::fractals::weighted_colour_map::WeightedColourMap;
use crate::core::util::pixel_to_complex_coords::PlaneMapping;
use rayon::{ThreadPool, ThreadPoolBuilder};
use rug::Float;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Drives a frame sequence from its start (or a checkpoint) to the end.
///
/// Frames run strictly in order. Within a frame, rows are spread over a worker pool that is
/// built once and reused for every frame. After each frame the artifacts go to the sink and
/// then the checkpoint store, so a saved checkpoint always refers to emitted frames.
pub struct AnimationController<S: FrameSink, C: CheckpointStore> {
    config: RunConfig,
    pool: ThreadPool,
    sink: S,
    store: C,
}

impl<S: FrameSink, C: CheckpointStore> AnimationController<S, C> {
    pub fn new(config: RunConfig, sink: S, store: C) -> Result<Self, AnimationError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.workers.get())
            .thread_name(|index| format!("render-{}", index))
            .build()?;

        Ok(Self {
            config,
            pool,
            sink,
            store,
        })
    }

    #[must_use]
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[must_use]
    pub fn store(&self) -> &C {
        &self.store
    }

    pub fn into_parts(self) -> (S, C) {
        (self.sink, self.store)
    }

    pub fn run(
        &mut self,
        frames: &FrameSequence,
        start: RunStart,
    ) -> Result<RunSummary, AnimationError> {
        self.run_until(frames, start, &NeverStop)
    }

    /// Like [`run`](Self::run), but asks `stop` before each frame whether to end early.
    pub fn run_until<T: StopSignal>(
        &mut self,
        frames: &FrameSequence,
        start: RunStart,
        stop: &T,
    ) -> Result<RunSummary, AnimationError> {
        let (first_frame, mut viewport, previous_elapsed) = resolve_start(frames, start)?;
        let started = Instant::now();
        let mut frames_rendered = 0;
        let mut next_frame = first_frame;

        while next_frame < frames.len() {
            if stop.should_stop(next_frame) {
                info!(next_frame = next_frame + 1, "stopping before frame");
                break;
            }

            viewport = self.render_one(frames, next_frame, &viewport)?;
            next_frame += 1;
            frames_rendered += 1;

            let elapsed = previous_elapsed + started.elapsed();
            let checkpoint = Checkpoint::capture(next_frame, &viewport, elapsed);
            self.store
                .save(&checkpoint)
                .map_err(|source| AnimationError::Checkpoint {
                    frame: next_frame - 1,
                    source,
                })?;

            info!(
                frame = next_frame,
                of = frames.len(),
                elapsed_secs = elapsed.as_secs_f64(),
                "frame complete"
            );
        }

        Ok(RunSummary {
            frames_rendered,
            next_frame,
            final_viewport: viewport,
            elapsed: previous_elapsed + started.elapsed(),
        })
    }

    /// Renders frame `index` inside `viewport`, emits it and returns the next viewport.
    fn render_one(
        &mut self,
        frames: &FrameSequence,
        index: usize,
        viewport: &Viewport,
    ) -> Result<Viewport, AnimationError> {
        let Some(frame) = frames.get(index) else {
            return Err(AnimationError::InvalidStart {
                next_frame: index,
                frame_count: frames.len(),
            });
        };

        let precision = adjust_precision(viewport, self.config.significant_digits)
            .map_err(|source| AnimationError::Precision {
                frame: index,
                source,
            })?;

        let frame_size = self.config.frame_size;
        let mapping = PlaneMapping::new(viewport, frame_size, precision.bits());
        let algorithm = FrameAlgorithm::new(frame.kind(), mapping, frame.max_iterations())
            .map_err(|source| AnimationError::Algorithm {
                frame: index,
                source,
            })?;
        let colour_map = WeightedColourMap::new(frame.colour_weights(), frame.max_iterations());
        debug!(
            frame = index + 1,
            bits = precision.bits(),
            max_iterations = frame.max_iterations(),
            colour_map = colour_map.display_name(),
            "frame setup"
        );

        let height = frame_size.height();
        let rows_done = AtomicU32::new(0);
        let progress = |rows: u32| {
            let done = rows_done.fetch_add(rows, Ordering::Relaxed) + rows;
            if done * 10 / height != (done - rows) * 10 / height {
                debug!(frame = index + 1, rows = done, of = height, "rendering");
            }
        };

        let render = render_frame(
            &self.pool,
            self.config.workers,
            &algorithm,
            &colour_map,
            &progress,
        )
        .map_err(|source| AnimationError::Render {
            frame: index,
            source,
        })?;

        let behaviour = frame.behaviour();
        let nearest = match behaviour.centering {
            Some(centering) => {
                let analysis = analyse_density(&render.iterations, centering);
                debug!(
                    frame = index + 1,
                    mean = analysis.statistics.mean,
                    standard_deviation = analysis.statistics.standard_deviation,
                    threshold = analysis.threshold,
                    "density analysed"
                );

                let nearest = analysis
                    .nearest
                    .ok_or(AnimationError::NoFurtherDetail { frame: index })?;
                Some(nearest)
            }
            None => None,
        };

        let next_viewport = transform_viewport(
            viewport,
            behaviour,
            frames.get(index + 1).map(|next| next.bounds()),
            nearest,
            frame_size,
            precision,
        )
        .map_err(|source| AnimationError::Viewport {
            frame: index,
            source,
        })?;

        self.sink
            .emit(RenderedFrame {
                index,
                iterations: &render.iterations,
                pixels: &render.pixels,
            })
            .map_err(|source| AnimationError::Output {
                frame: index,
                source,
            })?;

        info!(
            frame = index + 1,
            digits = precision.digits(),
            xmin = %short(viewport.xmin()),
            xmax = %short(viewport.xmax()),
            ymin = %short(viewport.ymin()),
            ymax = %short(viewport.ymax()),
            nearest = ?nearest.map(|point| (point.x, point.y)),
            "frame rendered"
        );

        Ok(next_viewport)
    }
}

fn resolve_start(
    frames: &FrameSequence,
    start: RunStart,
) -> Result<(usize, Viewport, Duration), AnimationError> {
    let invalid_start = |next_frame| AnimationError::InvalidStart {
        next_frame,
        frame_count: frames.len(),
    };

    match start {
        RunStart::Fresh => Ok((0, frames.start_viewport().clone(), Duration::ZERO)),
        RunStart::Resume(checkpoint) => {
            if checkpoint.next_frame > frames.len() {
                return Err(invalid_start(checkpoint.next_frame));
            }

            let viewport = checkpoint
                .viewport()
                .map_err(AnimationError::InvalidCheckpoint)?;
            let elapsed = checkpoint
                .elapsed()
                .map_err(AnimationError::InvalidCheckpoint)?;

            Ok((checkpoint.next_frame, viewport, elapsed))
        }
    }
}

fn short(value: &Float) -> String {
    format!("{:.12e}", value)
}
