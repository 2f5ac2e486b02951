//! Wire-facing types for the Vidora ingest API.
//!
//! Everything the upload protocol puts on the wire lives here: video
//! metadata and its validation rules, the chunk and finish payloads with
//! their form-field mapping, upload status and progress snapshots, and the
//! envelopes for server replies and structured error bodies.

mod envelope;
mod meta;
mod types;
mod upload;

pub use envelope::{ApiErrorBody, ServerReply};
pub use meta::{EpisodeRef, MetaError, TargetKind, VideoMeta};
pub use types::{UploadProgress, UploadStatus};
pub use upload::{CHUNK_PART_NAME, ChunkFields, FinishRequest};
