use crate::core::data::checkpoint::Checkpoint;
use std::error::Error;

/// Durable home of the run's checkpoint.
///
/// `save` returns only once the record is durable; a failed save must leave the
/// previously saved record readable.
pub trait CheckpointStore {
    fn save(&mut self, checkpoint: &Checkpoint) -> Result<(), Box<dyn Error + Send + Sync>>;
}
