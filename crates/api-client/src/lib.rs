//! HTTP transport and session persistence for the Vidora ingest API.
//!
//! Implements the `vidora-uploader` transport trait over `reqwest`:
//! multipart chunk posts, the JSON finish call, bearer-token attachment
//! from a persisted session store, and primary-then-fallback endpoint
//! candidates for each logical call.

pub mod client;
pub mod endpoints;
pub mod store;

pub use client::{ClientError, IngestClient};
pub use endpoints::IngestEndpoints;
pub use store::{
    ACCESS_TOKEN_KEY, FileSessionStore, MemorySessionStore, SessionStore, StoreError,
    default_store_path,
};
