use std::io::{Read, Seek, SeekFrom};
use std::ops::Range;
use std::path::Path;

use crate::{DEFAULT_CHUNK_SIZE, TransferError};

// ---------------------------------------------------------------------------
// Chunk math
// ---------------------------------------------------------------------------

/// Number of chunks a source of `source_size` bytes splits into.
///
/// `chunk_size` must be non-zero. A zero-length source has zero chunks;
/// callers reject empty sources before starting an upload.
pub fn chunk_count(source_size: u64, chunk_size: u64) -> u32 {
    debug_assert!(chunk_size > 0);
    if source_size == 0 || chunk_size == 0 {
        return 0;
    }
    source_size.div_ceil(chunk_size) as u32
}

/// Half-open byte range `[start, end)` of chunk `index`.
///
/// The final chunk is shorter when `chunk_size` does not divide
/// `source_size`. `index` must be below `chunk_count(source_size, chunk_size)`.
pub fn chunk_range(index: u32, source_size: u64, chunk_size: u64) -> Range<u64> {
    debug_assert!(index < chunk_count(source_size, chunk_size));
    let start = index as u64 * chunk_size;
    let end = (start + chunk_size).min(source_size);
    start..end
}

// ---------------------------------------------------------------------------
// ChunkedFile
// ---------------------------------------------------------------------------

/// Reads a source file one fixed-size chunk at a time.
///
/// Only the requested chunk's bytes are ever held in memory; the file is
/// never copied wholesale.
#[derive(Debug)]
pub struct ChunkedFile {
    file: std::fs::File,
    size: u64,
    chunk_size: u64,
}

impl ChunkedFile {
    /// Opens `path` for chunked reading.
    ///
    /// If `chunk_size` is 0, [`DEFAULT_CHUNK_SIZE`] is used.
    pub fn open(path: &Path, chunk_size: u64) -> Result<Self, TransferError> {
        let file = std::fs::File::open(path)?;
        let size = file.metadata()?.len();
        let chunk_size = if chunk_size == 0 {
            DEFAULT_CHUNK_SIZE
        } else {
            chunk_size
        };
        Ok(Self {
            file,
            size,
            chunk_size,
        })
    }

    /// Total source size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Effective chunk size in bytes.
    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    /// Number of chunks the source splits into.
    pub fn chunk_count(&self) -> u32 {
        chunk_count(self.size, self.chunk_size)
    }

    /// Reads the bytes of chunk `index`.
    ///
    /// The read is exact: a source that shrank after open surfaces as an
    /// I/O error rather than a short chunk.
    pub fn read_chunk(&mut self, index: u32) -> Result<Vec<u8>, TransferError> {
        let count = self.chunk_count();
        if index >= count {
            return Err(TransferError::ChunkOutOfRange { index, count });
        }
        let range = chunk_range(index, self.size, self.chunk_size);
        self.file.seek(SeekFrom::Start(range.start))?;
        let mut buf = vec![0u8; (range.end - range.start) as usize];
        self.file.read_exact(&mut buf)?;
        Ok(buf)
    }
}
