//! Per-frame control loop of a zoom animation.
//!
//! The controller follows the ports & adapters pattern:
//! - **Input**: a `FrameSequence` and a `RunStart` (fresh or from a checkpoint)
//! - **Output**: the `FrameSink` and `CheckpointStore` ports
//! - **Core**: precision, rendering, density analysis and viewport actions from `core/`

mod controller;
pub mod errors;
pub mod run_config;

pub use controller::AnimationController;
pub use errors::AnimationError;
pub use run_config::{RunConfig, RunStart, RunSummary};
