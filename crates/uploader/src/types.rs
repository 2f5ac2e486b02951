//! Uploader configuration, events, and results.

use vidora_protocol::{ServerReply, UploadProgress};
use vidora_transfer::DEFAULT_CHUNK_SIZE;

use crate::retry::RetryPolicy;

/// Knobs for the upload driver.
#[derive(Debug, Clone)]
pub struct UploaderConfig {
    /// Bytes per chunk. All chunks except the last are exactly this size.
    pub chunk_size: u64,
    /// Retry tiers applied to each chunk call, in order.
    pub retry_tiers: Vec<RetryPolicy>,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            retry_tiers: vec![RetryPolicy::default(), RetryPolicy::escalation()],
        }
    }
}

/// Progress notifications emitted while an upload runs.
#[derive(Debug, Clone)]
pub enum UploadEvent {
    Progress(UploadProgress),
    Finished { session_id: String },
    Failed { session_id: String, error: String },
    Cancelled { session_id: String },
}

/// Returned once the finish call was accepted.
#[derive(Debug)]
pub struct UploadOutcome {
    pub session_id: String,
    pub total_chunks: u32,
    /// Whatever the server sent back with the finish response.
    pub reply: ServerReply,
}
