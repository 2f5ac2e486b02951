//! Reqwest implementation of the upload transport.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use vidora_protocol::{ApiErrorBody, CHUNK_PART_NAME, ChunkFields, FinishRequest, ServerReply};
use vidora_uploader::{IngestTransport, TransportError};

use crate::endpoints::IngestEndpoints;
use crate::store::{ACCESS_TOKEN_KEY, SessionStore};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from building the ingest client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// HTTP client for the Vidora ingest API.
///
/// One logical transport call walks the endpoint candidates in order; the
/// first success wins. Retry budgets live a layer up in `vidora-uploader`
/// and re-run the whole walk.
pub struct IngestClient {
    http: reqwest::Client,
    endpoints: IngestEndpoints,
    session: Arc<dyn SessionStore>,
}

impl IngestClient {
    /// Creates a client over the given endpoints and session store.
    pub fn new(
        endpoints: IngestEndpoints,
        session: Arc<dyn SessionStore>,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("vidora-client/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            endpoints,
            session,
        })
    }

    fn bearer_token(&self) -> Option<String> {
        self.session.get(ACCESS_TOKEN_KEY)
    }

    /// Posts one chunk as a multipart form to one endpoint candidate.
    async fn post_chunk(
        &self,
        url: &str,
        fields: &ChunkFields,
        data: Vec<u8>,
    ) -> Result<ServerReply, TransportError> {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in fields.form_fields() {
            form = form.text(name, value);
        }
        let part = reqwest::multipart::Part::bytes(data)
            .file_name(format!("chunk-{}", fields.chunk_index));
        form = form.part(CHUNK_PART_NAME, part);

        let mut req = self.http.post(url).multipart(form);
        if let Some(token) = self.bearer_token() {
            req = req.bearer_auth(token);
        }
        let resp = req
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        read_reply(resp).await
    }

    /// Posts the finish request as JSON to one endpoint candidate.
    async fn post_finish(
        &self,
        url: &str,
        request: &FinishRequest,
    ) -> Result<ServerReply, TransportError> {
        let mut req = self.http.post(url).json(request);
        if let Some(token) = self.bearer_token() {
            req = req.bearer_auth(token);
        }
        let resp = req
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        read_reply(resp).await
    }
}

impl IngestTransport for IngestClient {
    fn send_chunk(
        &self,
        fields: &ChunkFields,
        data: &[u8],
    ) -> Pin<Box<dyn Future<Output = Result<ServerReply, TransportError>> + Send + '_>> {
        let fields = fields.clone();
        let data = data.to_vec();
        Box::pin(async move {
            let urls = self.endpoints.chunk_urls();
            let mut last_err = None;
            for (i, url) in urls.iter().enumerate() {
                // The form body is consumed per request, so each candidate
                // gets its own copy of the chunk bytes.
                match self.post_chunk(url, &fields, data.clone()).await {
                    Ok(reply) => return Ok(reply),
                    Err(err) => {
                        if i + 1 < urls.len() {
                            warn!(
                                url = %url,
                                error = %err,
                                "chunk endpoint failed, trying fallback"
                            );
                        }
                        last_err = Some(err);
                    }
                }
            }
            Err(last_err.unwrap_or_else(|| {
                TransportError::Network("no ingest endpoints configured".into())
            }))
        })
    }

    fn finish(
        &self,
        request: &FinishRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ServerReply, TransportError>> + Send + '_>> {
        let request = request.clone();
        Box::pin(async move {
            let urls = self.endpoints.finish_urls();
            let mut last_err = None;
            for (i, url) in urls.iter().enumerate() {
                match self.post_finish(url, &request).await {
                    Ok(reply) => return Ok(reply),
                    Err(err) => {
                        if i + 1 < urls.len() {
                            warn!(
                                url = %url,
                                error = %err,
                                "finish endpoint failed, trying fallback"
                            );
                        }
                        last_err = Some(err);
                    }
                }
            }
            Err(last_err.unwrap_or_else(|| {
                TransportError::Network("no ingest endpoints configured".into())
            }))
        })
    }
}

/// Maps a response to the transport result, preferring the structured
/// error body's message over raw text.
async fn read_reply(resp: reqwest::Response) -> Result<ServerReply, TransportError> {
    let status = resp.status();
    if status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Ok(ServerReply::from_body(body));
    }

    let status = status.as_u16();
    let bytes = resp.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
    let message = match ApiErrorBody::from_slice(&bytes) {
        Some(body) => body.message,
        None => {
            let text = String::from_utf8_lossy(&bytes).trim().to_string();
            if text.is_empty() {
                format!("HTTP {status}")
            } else {
                text
            }
        }
    };
    if (400..500).contains(&status) {
        Err(TransportError::Rejected { status, message })
    } else {
        Err(TransportError::Server { status, message })
    }
}
