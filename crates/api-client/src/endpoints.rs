//! Ingest endpoint candidates.
//!
//! Each logical call has an ordered list of endpoint paths: the
//! movie-specific path first, then the generic upload path older backends
//! expose. The transport walks the list once per call; this is separate
//! from the retry budget, which re-runs the whole walk.

/// API base URL plus candidate paths for the chunk and finish calls.
#[derive(Debug, Clone)]
pub struct IngestEndpoints {
    base_url: String,
    chunk_paths: Vec<String>,
    finish_paths: Vec<String>,
}

impl IngestEndpoints {
    /// Creates the default candidate lists under the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base(base_url.into()),
            chunk_paths: vec![
                "api/v1/movies/upload/chunk".into(),
                "api/v1/upload/chunk".into(),
            ],
            finish_paths: vec![
                "api/v1/movies/upload/finish".into(),
                "api/v1/upload/finish".into(),
            ],
        }
    }

    /// Replaces the chunk path candidates.
    pub fn with_chunk_paths(mut self, paths: Vec<String>) -> Self {
        self.chunk_paths = paths;
        self
    }

    /// Replaces the finish path candidates.
    pub fn with_finish_paths(mut self, paths: Vec<String>) -> Self {
        self.finish_paths = paths;
        self
    }

    /// Full candidate URLs for the chunk call, in try order.
    pub fn chunk_urls(&self) -> Vec<String> {
        self.chunk_paths
            .iter()
            .map(|p| join(&self.base_url, p))
            .collect()
    }

    /// Full candidate URLs for the finish call, in try order.
    pub fn finish_urls(&self) -> Vec<String> {
        self.finish_paths
            .iter()
            .map(|p| join(&self.base_url, p))
            .collect()
    }
}

fn normalize_base(mut base: String) -> String {
    while base.ends_with('/') {
        base.pop();
    }
    base
}

fn join(base: &str, path: &str) -> String {
    format!("{base}/{}", path.trim_start_matches('/'))
}
