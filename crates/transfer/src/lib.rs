//! Client-side chunking for the Vidora ingest protocol.
//!
//! Splits a source file into fixed-size byte ranges, materializes one range
//! at a time, and tracks the per-upload session record whose state machine
//! the uploader drives.

mod chunked;
mod session;

pub use chunked::{ChunkedFile, chunk_count, chunk_range};
pub use session::UploadSession;

/// Default chunk size: 5 MiB.
///
/// The ingest API reassembles chunks by index, so all chunks of one session
/// must use the same size.
pub const DEFAULT_CHUNK_SIZE: u64 = 5 * 1024 * 1024;

/// Errors produced by the transfer crate.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("chunk index {index} out of range for {count} chunks")]
    ChunkOutOfRange { index: u32, count: u32 },
}
