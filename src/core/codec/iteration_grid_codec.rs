use std::error::Error;
use std::fmt;
use std::io::{self, Read, Seek, Write};

use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::core::data::frame_size::FrameSize;
use crate::core::data::iteration_grid::{IterationGrid, IterationGridError};

const BYTES_PER_COUNT: usize = 2;
const MAX_DEFLATE_LEVEL: i64 = 9;

#[derive(Debug)]
pub enum CodecError {
    SizeMismatch { expected: usize, actual: usize },
    EmptyArchive,
    Io(io::Error),
    Zip(ZipError),
    Grid(IterationGridError),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => write!(
                f,
                "iteration data is {} bytes, expected exactly {}",
                actual, expected
            ),
            Self::EmptyArchive => write!(f, "archive holds no entry"),
            Self::Io(err) => write!(f, "io error: {}", err),
            Self::Zip(err) => write!(f, "zip error: {}", err),
            Self::Grid(err) => write!(f, "{}", err),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Zip(err) => Some(err),
            Self::Grid(err) => Some(err),
            Self::SizeMismatch { .. } | Self::EmptyArchive => None,
        }
    }
}

impl From<io::Error> for CodecError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ZipError> for CodecError {
    fn from(err: ZipError) -> Self {
        Self::Zip(err)
    }
}

impl From<IterationGridError> for CodecError {
    fn from(err: IterationGridError) -> Self {
        Self::Grid(err)
    }
}

/// Byte length of the raw encoding of a `size` grid.
#[must_use]
pub fn encoded_len(size: FrameSize) -> usize {
    size.pixel_count() * BYTES_PER_COUNT
}

/// Column-major `u16` little-endian counts, no header.
#[must_use]
pub fn encode_raw(grid: &IterationGrid) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(encoded_len(grid.size()));

    for count in grid.column_major() {
        bytes.extend_from_slice(&count.to_le_bytes());
    }

    bytes
}

/// Inverse of [`encode_raw`]; anything but exactly `2 * width * height` bytes is rejected.
pub fn decode_raw(bytes: &[u8], size: FrameSize) -> Result<IterationGrid, CodecError> {
    let expected = encoded_len(size);
    if bytes.len() != expected {
        return Err(CodecError::SizeMismatch {
            expected,
            actual: bytes.len(),
        });
    }

    let width = size.width() as usize;
    let height = size.height() as usize;
    let mut counts = vec![0u16; size.pixel_count()];

    for (index, pair) in bytes.chunks_exact(BYTES_PER_COUNT).enumerate() {
        let (x, y) = (index / height, index % height);
        counts[y * width + x] = u16::from_le_bytes([pair[0], pair[1]]);
    }

    Ok(IterationGrid::from_row_major(size, counts)?)
}

/// Writes the raw encoding as the single Deflate entry `entry_name` of a zip archive.
pub fn encode_archive<W: Write + Seek>(
    grid: &IterationGrid,
    entry_name: &str,
    writer: W,
) -> Result<W, CodecError> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(MAX_DEFLATE_LEVEL));

    let mut archive = ZipWriter::new(writer);
    archive.start_file(entry_name, options)?;
    archive.write_all(&encode_raw(grid))?;

    Ok(archive.finish()?)
}

/// Reads the first entry of a zip archive back into a grid of `size`.
pub fn decode_archive<R: Read + Seek>(reader: R, size: FrameSize) -> Result<IterationGrid, CodecError> {
    let mut archive = ZipArchive::new(reader)?;
    if archive.is_empty() {
        return Err(CodecError::EmptyArchive);
    }

    let expected = encoded_len(size);
    let entry = archive.by_index(0)?;
    let declared = usize::try_from(entry.size()).unwrap_or(usize::MAX);
    if declared != expected {
        return Err(CodecError::SizeMismatch {
            expected,
            actual: declared,
        });
    }

    // One byte past `expected` is enough to detect an entry longer than its header says.
    let mut bytes = Vec::with_capacity(expected);
    entry.take(expected as u64 + 1).read_to_end(&mut bytes)?;

    decode_raw(&bytes, size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn grid_2x3() -> IterationGrid {
        // rows: [1, 2], [3, 300], [0, 65535]
        IterationGrid::from_row_major(
            FrameSize::new(2, 3).unwrap(),
            vec![1, 2, 3, 300, 0, 65535],
        )
        .unwrap()
    }

    #[test]
    fn test_raw_layout_is_column_major_little_endian() {
        let bytes = encode_raw(&grid_2x3());

        assert_eq!(
            bytes,
            vec![1, 0, 3, 0, 0, 0, 2, 0, 44, 1, 255, 255]
        );
        assert_eq!(bytes.len(), encoded_len(FrameSize::new(2, 3).unwrap()));
    }

    #[test]
    fn test_raw_decode_restores_grid() {
        let grid = grid_2x3();

        assert_eq!(decode_raw(&encode_raw(&grid), grid.size()).unwrap(), grid);
    }

    #[test]
    fn test_raw_decode_rejects_wrong_length() {
        let size = FrameSize::new(2, 3).unwrap();
        let mut bytes = encode_raw(&grid_2x3());
        bytes.pop();

        assert!(matches!(
            decode_raw(&bytes, size),
            Err(CodecError::SizeMismatch {
                expected: 12,
                actual: 11
            })
        ));
    }

    #[test]
    fn test_raw_decode_rejects_trailing_bytes() {
        let mut bytes = encode_raw(&grid_2x3());
        bytes.extend_from_slice(&[0, 0]);

        assert!(matches!(
            decode_raw(&bytes, FrameSize::new(2, 3).unwrap()),
            Err(CodecError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn test_archive_round_trip() {
        let size = FrameSize::new(37, 23).unwrap();
        let counts = (0..size.pixel_count()).map(|i| (i * 7 % 1001) as u16).collect();
        let grid = IterationGrid::from_row_major(size, counts).unwrap();

        let cursor = encode_archive(&grid, "iterations_00001", Cursor::new(Vec::new())).unwrap();
        let decoded = decode_archive(Cursor::new(cursor.into_inner()), size).unwrap();

        assert_eq!(decoded, grid);
    }

    #[test]
    fn test_archive_holds_single_named_entry() {
        let cursor = encode_archive(&grid_2x3(), "iterations_00042", Cursor::new(Vec::new())).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(cursor.into_inner())).unwrap();

        assert_eq!(archive.len(), 1);
        assert_eq!(archive.by_index(0).unwrap().name(), "iterations_00042");
    }

    #[test]
    fn test_archive_decode_with_wrong_dimensions_fails() {
        let cursor = encode_archive(&grid_2x3(), "grid", Cursor::new(Vec::new())).unwrap();

        assert!(matches!(
            decode_archive(Cursor::new(cursor.into_inner()), FrameSize::new(3, 3).unwrap()),
            Err(CodecError::SizeMismatch {
                expected: 18,
                actual: 12
            })
        ));
    }

    #[test]
    fn test_oversized_entry_is_rejected_from_its_header() {
        let mut archive = ZipWriter::new(Cursor::new(Vec::new()));
        archive
            .start_file("grid", SimpleFileOptions::default())
            .unwrap();
        archive.write_all(&vec![0u8; 1 << 20]).unwrap();
        let cursor = archive.finish().unwrap();

        assert!(matches!(
            decode_archive(Cursor::new(cursor.into_inner()), FrameSize::new(2, 3).unwrap()),
            Err(CodecError::SizeMismatch {
                expected: 12,
                actual: 1_048_576
            })
        ));
    }

    #[test]
    fn test_empty_archive_is_rejected() {
        let cursor = ZipWriter::new(Cursor::new(Vec::new())).finish().unwrap();

        assert!(matches!(
            decode_archive(Cursor::new(cursor.into_inner()), FrameSize::new(1, 1).unwrap()),
            Err(CodecError::EmptyArchive)
        ));
    }
}
