//! Sequential chunked upload driver for the Vidora ingest API.
//!
//! This crate implements the **business logic** of the upload protocol.
//! It is a library crate with no HTTP dependency; the caller provides an
//! [`IngestTransport`] implementation (the reqwest one lives in
//! `vidora-api-client`) and observes progress over an event channel.
//!
//! # Pipeline
//!
//! 1. **Validate** — check metadata and the source file before any
//!    transport call
//! 2. **Split** — fixed-size byte ranges via `vidora-transfer`
//! 3. **Send** — chunks strictly in ascending order, each under the
//!    tiered retry policy
//! 4. **Finish** — one commit call that starts server-side processing
//!
//! The finish call is fire-and-forget: acceptance is reported, transcode
//! completion is never observed.

pub mod error;
pub mod retry;
pub mod transport;
pub mod types;
pub mod uploader;

pub use error::UploadError;
pub use retry::{RetryPolicy, run_with_retry};
pub use transport::{IngestTransport, TransportError};
pub use types::{UploadEvent, UploadOutcome, UploaderConfig};
pub use uploader::Uploader;
