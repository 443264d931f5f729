use std::error::Error;
use std::ffi::OsString;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::controllers::ports::checkpoint_store::CheckpointStore;
use crate::core::data::checkpoint::{Checkpoint, CheckpointError};

#[derive(Debug)]
pub enum CheckpointFileError {
    Io { path: PathBuf, source: io::Error },
    Json(serde_json::Error),
    Record(CheckpointError),
}

impl fmt::Display for CheckpointFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            Self::Json(err) => write!(f, "malformed checkpoint: {}", err),
            Self::Record(err) => write!(f, "{}", err),
        }
    }
}

impl Error for CheckpointFileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
            Self::Record(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for CheckpointFileError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<CheckpointError> for CheckpointFileError {
    fn from(err: CheckpointError) -> Self {
        Self::Record(err)
    }
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");

    PathBuf::from(name)
}

fn write_and_sync(path: &Path, checkpoint: &Checkpoint) -> Result<(), CheckpointFileError> {
    let io_error = |source| CheckpointFileError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, checkpoint)?;
    writer.write_all(b"\n").map_err(io_error)?;

    let file = writer
        .into_inner()
        .map_err(|err| io_error(err.into_error()))?;
    file.sync_all().map_err(io_error)
}

/// Replaces the checkpoint at `path` without ever exposing a partial file.
///
/// The record is written and synced to `<path>.tmp`, then renamed over `path`. On any
/// failure the temporary file is removed and the previous checkpoint stays as it was.
pub fn save_checkpoint(path: &Path, checkpoint: &Checkpoint) -> Result<(), CheckpointFileError> {
    let temporary = temporary_path(path);

    let result = write_and_sync(&temporary, checkpoint).and_then(|()| {
        fs::rename(&temporary, path).map_err(|source| CheckpointFileError::Io {
            path: path.to_path_buf(),
            source,
        })
    });

    if result.is_err() {
        let _ = fs::remove_file(&temporary);
    }

    result
}

/// Reads and validates the checkpoint at `path`.
pub fn load_checkpoint(path: &Path) -> Result<Checkpoint, CheckpointFileError> {
    let file = File::open(path).map_err(|source| CheckpointFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let checkpoint: Checkpoint = serde_json::from_reader(BufReader::new(file))?;
    checkpoint.validate()?;

    Ok(checkpoint)
}

/// Checkpoint store backed by a single JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCheckpointStore {
    path: PathBuf,
}

impl FileCheckpointStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CheckpointStore for FileCheckpointStore {
    fn save(&mut self, checkpoint: &Checkpoint) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(save_checkpoint(&self.path, checkpoint)?)
    }
}
