use std::sync::RwLock;
use std::time::{Duration, Instant};

use vidora_protocol::{UploadProgress, UploadStatus, VideoMeta};

use crate::chunked::chunk_count;

/// Tracks one in-flight upload attempt (thread-safe).
///
/// The record is mutated exclusively by the uploader loop; other threads
/// take read-only snapshots. All transitions move forward: terminal states
/// absorb every later call, so a cancel racing a finish never rewinds the
/// machine.
pub struct UploadSession {
    inner: RwLock<SessionInner>,
}

struct SessionInner {
    id: String,
    meta: VideoMeta,
    source_size: u64,
    chunk_size: u64,
    total_chunks: u32,
    sent_chunks: u32,
    status: UploadStatus,
    error: String,
    started_at: Option<Instant>,
    updated_at: Instant,
    completed_at: Option<Instant>,
}

impl UploadSession {
    /// Creates a new session in `NotStarted`.
    pub fn new(id: String, meta: VideoMeta, source_size: u64, chunk_size: u64) -> Self {
        Self {
            inner: RwLock::new(SessionInner {
                id,
                meta,
                source_size,
                chunk_size,
                total_chunks: chunk_count(source_size, chunk_size),
                sent_chunks: 0,
                status: UploadStatus::NotStarted,
                error: String::new(),
                started_at: None,
                updated_at: Instant::now(),
                completed_at: None,
            }),
        }
    }

    /// Moves `NotStarted` to `InProgress`. Ignored from any other state.
    pub fn start(&self) {
        let mut s = self.inner.write().unwrap();
        if s.status != UploadStatus::NotStarted {
            return;
        }
        s.status = UploadStatus::InProgress;
        let now = Instant::now();
        s.started_at = Some(now);
        s.updated_at = now;
    }

    /// Records one acknowledged chunk.
    ///
    /// Once every chunk is acknowledged the session moves to
    /// `AwaitingFinish`. Ignored outside `InProgress`.
    pub fn chunk_sent(&self) {
        let mut s = self.inner.write().unwrap();
        if s.status != UploadStatus::InProgress {
            return;
        }
        s.sent_chunks += 1;
        if s.sent_chunks == s.total_chunks {
            s.status = UploadStatus::AwaitingFinish;
        }
        s.updated_at = Instant::now();
    }

    /// Moves `AwaitingFinish` to `Finished`. Ignored from any other state.
    pub fn finish(&self) {
        let mut s = self.inner.write().unwrap();
        if s.status != UploadStatus::AwaitingFinish {
            return;
        }
        s.status = UploadStatus::Finished;
        let now = Instant::now();
        s.completed_at = Some(now);
        s.updated_at = now;
    }

    /// Marks the session failed with an error message. Ignored once terminal.
    pub fn fail(&self, err: &str) {
        let mut s = self.inner.write().unwrap();
        if s.status.is_terminal() {
            return;
        }
        s.status = UploadStatus::Failed;
        s.error = err.to_string();
        let now = Instant::now();
        s.completed_at = Some(now);
        s.updated_at = now;
    }

    /// Marks the session cancelled. Idempotent; ignored once terminal.
    pub fn cancel(&self) {
        let mut s = self.inner.write().unwrap();
        if s.status.is_terminal() {
            return;
        }
        s.status = UploadStatus::Cancelled;
        let now = Instant::now();
        s.completed_at = Some(now);
        s.updated_at = now;
    }

    /// Current progress snapshot.
    pub fn progress(&self) -> UploadProgress {
        let s = self.inner.read().unwrap();
        UploadProgress {
            session_id: s.id.clone(),
            status: s.status,
            sent_chunks: s.sent_chunks,
            total_chunks: s.total_chunks,
            error: s.error.clone(),
        }
    }

    /// Returns `true` while chunks or the finish call are still outstanding.
    pub fn is_active(&self) -> bool {
        let s = self.inner.read().unwrap();
        matches!(
            s.status,
            UploadStatus::InProgress | UploadStatus::AwaitingFinish
        )
    }

    /// Returns the session ID.
    pub fn id(&self) -> String {
        let s = self.inner.read().unwrap();
        s.id.clone()
    }

    /// Returns the metadata attached to every chunk and the finish call.
    pub fn meta(&self) -> VideoMeta {
        let s = self.inner.read().unwrap();
        s.meta.clone()
    }

    /// Returns the current status.
    pub fn status(&self) -> UploadStatus {
        let s = self.inner.read().unwrap();
        s.status
    }

    /// Returns the total source size in bytes.
    pub fn source_size(&self) -> u64 {
        let s = self.inner.read().unwrap();
        s.source_size
    }

    /// Returns the chunk size the session was created with.
    pub fn chunk_size(&self) -> u64 {
        let s = self.inner.read().unwrap();
        s.chunk_size
    }

    /// Returns the immutable chunk count.
    pub fn total_chunks(&self) -> u32 {
        let s = self.inner.read().unwrap();
        s.total_chunks
    }

    /// Returns how many chunks have been acknowledged so far.
    pub fn sent_chunks(&self) -> u32 {
        let s = self.inner.read().unwrap();
        s.sent_chunks
    }

    /// Index of the next chunk to send. Equals `total_chunks` once all
    /// chunks are acknowledged.
    pub fn next_chunk_index(&self) -> u32 {
        self.sent_chunks()
    }

    /// Time since the session started; stops advancing at completion.
    pub fn elapsed(&self) -> Option<Duration> {
        let s = self.inner.read().unwrap();
        let started = s.started_at?;
        Some(match s.completed_at {
            Some(done) => done.duration_since(started),
            None => started.elapsed(),
        })
    }
}
