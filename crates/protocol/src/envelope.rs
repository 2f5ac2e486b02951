use serde::{Deserialize, Serialize};

/// Structured error body the ingest API returns on failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<i32>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

impl ApiErrorBody {
    /// Attempts to read a structured error body from raw response bytes.
    ///
    /// Returns `None` when the body is not JSON or carries no message, so
    /// callers can fall back to the HTTP status line.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let body: ApiErrorBody = serde_json::from_slice(bytes).ok()?;
        if body.message.trim().is_empty() {
            None
        } else {
            Some(body)
        }
    }
}

/// Successful response from a chunk or finish call.
///
/// The body is opaque to the upload protocol: it is carried as raw JSON and
/// never interpreted beyond success/failure. `parse_payload` is available to
/// callers that do know the server's shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerReply {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Box<serde_json::value::RawValue>>,
}

impl ServerReply {
    /// Reply with no body.
    pub fn empty() -> Self {
        Self { payload: None }
    }

    /// Wraps a response body, degrading to an empty reply when the body is
    /// blank or not JSON.
    pub fn from_body(body: impl Into<String>) -> Self {
        let body = body.into();
        if body.trim().is_empty() {
            return Self::empty();
        }
        match serde_json::value::RawValue::from_string(body) {
            Ok(raw) => Self { payload: Some(raw) },
            Err(_) => Self::empty(),
        }
    }

    /// Deserializes the payload into the given type.
    pub fn parse_payload<T: for<'de> Deserialize<'de>>(
        &self,
    ) -> Result<Option<T>, serde_json::Error> {
        match &self.payload {
            Some(raw) => Ok(Some(serde_json::from_str(raw.get())?)),
            None => Ok(None),
        }
    }
}
