//! Transport seam between the upload driver and a concrete HTTP client.

use std::future::Future;
use std::pin::Pin;

use vidora_protocol::{ChunkFields, FinishRequest, ServerReply};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures a transport can report back to the upload driver.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a 5xx status.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The server answered with a 4xx status. Retrying the same request
    /// cannot succeed.
    #[error("server rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
}

impl TransportError {
    pub fn is_retryable(&self) -> bool {
        !matches!(self, TransportError::Rejected { .. })
    }
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// One logical call per method; the driver layers retries on top.
pub trait IngestTransport: Send + Sync {
    /// Deliver one chunk of the source file together with its coordinates
    /// and the video metadata.
    fn send_chunk(
        &self,
        fields: &ChunkFields,
        data: &[u8],
    ) -> Pin<Box<dyn Future<Output = Result<ServerReply, TransportError>> + Send + '_>>;

    /// Tell the server all chunks are delivered and processing may start.
    fn finish(
        &self,
        request: &FinishRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ServerReply, TransportError>> + Send + '_>>;
}
