pub mod controllers;
pub mod core;
pub mod input;
pub mod presenters;
pub mod storage;

pub use controllers::animation::{
    AnimationController, AnimationError, RunConfig, RunStart, RunSummary,
};
pub use controllers::ports::checkpoint_store::CheckpointStore;
pub use controllers::ports::frame_sink::{FrameSink, RenderedFrame};
pub use core::actions::analyse_density::density_statistics::DensityStatistics;
pub use core::codec::iteration_grid_codec::{CodecError, decode_archive, encode_archive};
pub use core::data::checkpoint::Checkpoint;
pub use core::data::frame_sequence::FrameSequence;
pub use core::data::frame_size::FrameSize;
pub use core::data::iteration_grid::IterationGrid;
pub use core::data::viewport::Viewport;
pub use input::frame_table::{parse_frame_table, read_frame_table};
pub use presenters::file::frame_files::FrameFiles;
pub use storage::checkpoint::{FileCheckpointStore, load_checkpoint, save_checkpoint};
