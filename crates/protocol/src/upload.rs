use serde::{Deserialize, Serialize};

use crate::meta::VideoMeta;

/// Multipart part name carrying the chunk bytes.
pub const CHUNK_PART_NAME: &str = "chunk";

/// Fields attached to one chunk-upload call.
///
/// On the wire the chunk call is a multipart form: a binary part named
/// [`CHUNK_PART_NAME`] plus one text field per entry of
/// [`ChunkFields::form_fields`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkFields {
    pub session_id: String,
    pub chunk_index: u32,
    pub total_chunks: u32,
    #[serde(flatten)]
    pub meta: VideoMeta,
}

impl ChunkFields {
    /// Ordered text fields for the multipart request.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("sessionId", self.session_id.clone()),
            ("chunkIndex", self.chunk_index.to_string()),
            ("totalChunks", self.total_chunks.to_string()),
        ];
        fields.extend(self.meta.form_fields());
        fields
    }
}

/// JSON body of the finish/commit call: the session id plus the same
/// metadata the chunks carried, with no chunk coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishRequest {
    pub session_id: String,
    #[serde(flatten)]
    pub meta: VideoMeta,
}
