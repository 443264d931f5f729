use crate::controllers::ports::frame_sink::{FrameSink, RenderedFrame};
use crate::core::codec::iteration_grid_codec::{CodecError, encode_archive};
use crate::core::data::iteration_grid::IterationGrid;
use crate::core::data::pixel_buffer::PixelBuffer;
use image::{ColorType, ImageError, ImageFormat};
use std::error::Error;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Debug)]
pub enum FrameFilesError {
    Io { path: PathBuf, source: io::Error },
    Image { path: PathBuf, source: ImageError },
    Codec { path: PathBuf, source: CodecError },
}

impl fmt::Display for FrameFilesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            Self::Image { path, source } => write!(f, "{}: {}", path.display(), source),
            Self::Codec { path, source } => write!(f, "{}: {}", path.display(), source),
        }
    }
}

impl Error for FrameFilesError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Image { source, .. } => Some(source),
            Self::Codec { source, .. } => Some(source),
        }
    }
}

/// Writes `<image_prefix>NNNNN.png` and `<iterations_prefix>NNNNN.zip` per frame.
///
/// `NNNNN` is the one-based frame number padded to five digits. Either artifact can be
/// switched off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameFiles {
    output_dir: PathBuf,
    image_prefix: String,
    iterations_prefix: String,
    images_enabled: bool,
    iterations_enabled: bool,
}

impl FrameFiles {
    /// Creates `output_dir` if needed.
    pub fn create(output_dir: impl Into<PathBuf>) -> Result<Self, FrameFilesError> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|source| FrameFilesError::Io {
            path: output_dir.clone(),
            source,
        })?;

        Ok(Self {
            output_dir,
            image_prefix: "frame_".to_string(),
            iterations_prefix: "iterations_".to_string(),
            images_enabled: true,
            iterations_enabled: true,
        })
    }

    #[must_use]
    pub fn with_image_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.image_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_iterations_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.iterations_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_images(mut self, enabled: bool) -> Self {
        self.images_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_iterations(mut self, enabled: bool) -> Self {
        self.iterations_enabled = enabled;
        self
    }

    #[must_use]
    pub fn image_path(&self, index: usize) -> PathBuf {
        self.output_dir
            .join(format!("{}{:05}.png", self.image_prefix, index + 1))
    }

    /// Archive path; its single entry is named after the file without `.zip`.
    #[must_use]
    pub fn iterations_path(&self, index: usize) -> PathBuf {
        self.output_dir
            .join(format!("{}.zip", self.iterations_entry_name(index)))
    }

    /// Deletes frame artifacts left in the output directory by an earlier run.
    ///
    /// Only files named `<prefix><digits>.png` or `<prefix><digits>.zip` for the configured
    /// prefixes are removed. Returns how many were deleted.
    pub fn clear_stale(&self) -> Result<usize, FrameFilesError> {
        let io_error = |source| FrameFilesError::Io {
            path: self.output_dir.clone(),
            source,
        };

        let mut removed = 0;
        for entry in fs::read_dir(&self.output_dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };

            let is_artifact = is_numbered(name, &self.image_prefix, ".png")
                || is_numbered(name, &self.iterations_prefix, ".zip");
            if is_artifact && path.is_file() {
                fs::remove_file(&path).map_err(|source| FrameFilesError::Io {
                    path: path.clone(),
                    source,
                })?;
                removed += 1;
            }
        }

        Ok(removed)
    }

    fn iterations_entry_name(&self, index: usize) -> String {
        format!("{}{:05}", self.iterations_prefix, index + 1)
    }

    fn write_image(&self, index: usize, pixels: &PixelBuffer) -> Result<(), FrameFilesError> {
        let path = self.image_path(index);
        let size = pixels.size();

        image::save_buffer_with_format(
            &path,
            pixels.buffer(),
            size.width(),
            size.height(),
            ColorType::Rgb8,
            ImageFormat::Png,
        )
        .map_err(|source| FrameFilesError::Image { path, source })
    }

    fn write_iterations(&self, index: usize, grid: &IterationGrid) -> Result<(), FrameFilesError> {
        let path = self.iterations_path(index);
        let io_error = |source| FrameFilesError::Io {
            path: path.clone(),
            source,
        };

        let file = File::create(&path).map_err(io_error)?;
        let mut writer = encode_archive(grid, &self.iterations_entry_name(index), BufWriter::new(file))
            .map_err(|source| FrameFilesError::Codec {
                path: path.clone(),
                source,
            })?;

        writer.flush().map_err(io_error)
    }
}

fn is_numbered(name: &str, prefix: &str, extension: &str) -> bool {
    name.strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix(extension))
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

impl FrameSink for FrameFiles {
    fn emit(&mut self, frame: RenderedFrame<'_>) -> Result<(), Box<dyn Error + Send + Sync>> {
        if self.images_enabled {
            self.write_image(frame.index, frame.pixels)?;
        }

        if self.iterations_enabled {
            self.write_iterations(frame.index, frame.iterations)?;
        }

        Ok(())
    }
}
