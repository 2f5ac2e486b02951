//! Upload error taxonomy.

use crate::transport::TransportError;

/// Errors surfaced by the upload driver.
///
/// `ChunkTransmission` and `FinishCommit` are deliberately distinct: the
/// former means the bytes never fully arrived, the latter means every chunk
/// is persisted server-side but the commit/transcode trigger did not
/// confirm.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("invalid metadata: {0}")]
    Validation(#[from] vidora_protocol::MetaError),

    #[error("source file is empty")]
    EmptySource,

    #[error("transfer error: {0}")]
    Transfer(#[from] vidora_transfer::TransferError),

    #[error("could not deliver chunk {} of {total}: {source}", .index + 1)]
    ChunkTransmission {
        /// 0-based index of the chunk that exhausted its retry budget.
        index: u32,
        total: u32,
        #[source]
        source: TransportError,
    },

    #[error("finish call failed after all chunks were delivered: {source}")]
    FinishCommit {
        #[source]
        source: TransportError,
    },

    #[error("upload cancelled")]
    Cancelled,

    #[error("upload task failed: {0}")]
    Task(String),
}
