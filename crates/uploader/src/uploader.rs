//! Sequential chunk upload driver.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::mpsc;
use tokio::task;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use vidora_protocol::{ChunkFields, FinishRequest, VideoMeta};
use vidora_transfer::{ChunkedFile, UploadSession};

use crate::error::UploadError;
use crate::retry::run_with_retry;
use crate::transport::IngestTransport;
use crate::types::{UploadEvent, UploadOutcome, UploaderConfig};

// ---------------------------------------------------------------------------
// Session ids
// ---------------------------------------------------------------------------

/// Session ids are `{targetId}-{unix_millis}-{random8}` so the server can
/// group chunks without any prior handshake.
fn generate_session_id(target_id: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let nonce = uuid::Uuid::new_v4().simple().to_string();
    format!("{target_id}-{millis}-{}", &nonce[..8])
}

// ---------------------------------------------------------------------------
// Uploader
// ---------------------------------------------------------------------------

/// Drives a source file through validation, chunking, sequential delivery,
/// and the finish call.
pub struct Uploader {
    config: UploaderConfig,
    events_tx: mpsc::Sender<UploadEvent>,
    events_rx: Option<mpsc::Receiver<UploadEvent>>,
    cancel: CancellationToken,
}

impl Default for Uploader {
    fn default() -> Self {
        Self::new(UploaderConfig::default())
    }
}

impl Uploader {
    pub fn new(config: UploaderConfig) -> Self {
        let (events_tx, events_rx) = mpsc::channel(256);
        Self {
            config,
            events_tx,
            events_rx: Some(events_rx),
            cancel: CancellationToken::new(),
        }
    }

    /// Take the event receiver. Returns `None` after the first call.
    pub fn take_events(&mut self) -> Option<mpsc::Receiver<UploadEvent>> {
        self.events_rx.take()
    }

    /// Token observed between chunks; cancelling it stops the upload at the
    /// next chunk boundary.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Upload `source` as `meta` describes it. Chunks go out strictly in
    /// order; the returned outcome means the server accepted the finish
    /// call, not that processing completed.
    pub async fn upload(
        &self,
        transport: &dyn IngestTransport,
        source: &Path,
        meta: VideoMeta,
    ) -> Result<UploadOutcome, UploadError> {
        meta.validate()?;

        let mut file = open_chunked(source.to_path_buf(), self.config.chunk_size).await?;
        if file.size() == 0 {
            return Err(UploadError::EmptySource);
        }

        let session = UploadSession::new(
            generate_session_id(&meta.target_id),
            meta,
            file.size(),
            file.chunk_size(),
        );
        session.start();

        let total = session.total_chunks();
        info!(
            session = %session.id(),
            source = %source.display(),
            bytes = session.source_size(),
            chunks = total,
            "upload started"
        );
        self.emit(UploadEvent::Progress(session.progress())).await;

        for index in 0..total {
            if self.cancel.is_cancelled() {
                return self.cancelled(&session).await;
            }

            let (returned, data) = match read_chunk(file, index).await {
                Ok(pair) => pair,
                Err(err) => return self.failed(&session, err).await,
            };
            file = returned;

            let fields = ChunkFields {
                session_id: session.id(),
                chunk_index: index,
                total_chunks: total,
                meta: session.meta(),
            };
            match run_with_retry(&self.config.retry_tiers, "send_chunk", || {
                transport.send_chunk(&fields, &data)
            })
            .await
            {
                Ok(_) => {
                    session.chunk_sent();
                    debug!(session = %session.id(), chunk = index, "chunk delivered");
                    self.emit(UploadEvent::Progress(session.progress())).await;
                }
                Err(source) => {
                    let err = UploadError::ChunkTransmission {
                        index,
                        total,
                        source,
                    };
                    return self.failed(&session, err).await;
                }
            }
        }

        if self.cancel.is_cancelled() {
            return self.cancelled(&session).await;
        }

        let request = FinishRequest {
            session_id: session.id(),
            meta: session.meta(),
        };
        match transport.finish(&request).await {
            Ok(reply) => {
                session.finish();
                let elapsed_ms = session.elapsed().map(|d| d.as_millis()).unwrap_or(0);
                info!(
                    session = %session.id(),
                    elapsed_ms,
                    "all chunks delivered, processing started"
                );
                self.emit(UploadEvent::Finished {
                    session_id: session.id(),
                })
                .await;
                Ok(UploadOutcome {
                    session_id: session.id(),
                    total_chunks: total,
                    reply,
                })
            }
            Err(source) => {
                let err = UploadError::FinishCommit { source };
                self.failed(&session, err).await
            }
        }
    }

    async fn cancelled(&self, session: &UploadSession) -> Result<UploadOutcome, UploadError> {
        session.cancel();
        info!(
            session = %session.id(),
            sent = session.sent_chunks(),
            "upload cancelled"
        );
        self.emit(UploadEvent::Cancelled {
            session_id: session.id(),
        })
        .await;
        Err(UploadError::Cancelled)
    }

    async fn failed(
        &self,
        session: &UploadSession,
        err: UploadError,
    ) -> Result<UploadOutcome, UploadError> {
        let message = err.to_string();
        session.fail(&message);
        warn!(session = %session.id(), error = %message, "upload failed");
        self.emit(UploadEvent::Failed {
            session_id: session.id(),
            error: message,
        })
        .await;
        Err(err)
    }

    async fn emit(&self, event: UploadEvent) {
        let _ = self.events_tx.send(event).await;
    }
}

// ---------------------------------------------------------------------------
// Blocking file access
// ---------------------------------------------------------------------------

async fn open_chunked(path: PathBuf, chunk_size: u64) -> Result<ChunkedFile, UploadError> {
    task::spawn_blocking(move || ChunkedFile::open(&path, chunk_size))
        .await
        .map_err(|e| UploadError::Task(format!("task join error: {e}")))?
        .map_err(UploadError::from)
}

async fn read_chunk(
    mut file: ChunkedFile,
    index: u32,
) -> Result<(ChunkedFile, Vec<u8>), UploadError> {
    task::spawn_blocking(move || {
        let data = file.read_chunk(index)?;
        Ok::<_, vidora_transfer::TransferError>((file, data))
    })
    .await
    .map_err(|e| UploadError::Task(format!("task join error: {e}")))?
    .map_err(UploadError::from)
}
