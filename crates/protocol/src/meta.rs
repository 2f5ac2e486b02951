use serde::{Deserialize, Serialize};

/// What kind of catalog entry an upload is destined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetKind {
    #[serde(rename = "movie")]
    Movie,
    #[serde(rename = "series")]
    Series,
}

impl TargetKind {
    /// Wire name, identical to the serde rename.
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::Movie => "movie",
            TargetKind::Series => "series",
        }
    }
}

/// Season/episode coordinates for an episodic upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeRef {
    pub season_id: String,
    pub episode_id: String,
}

/// Caller-supplied attributes attached to every chunk and to the finish call.
///
/// The episodic coordinates flatten into the enclosing object so multipart
/// and JSON requests carry identical top-level field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoMeta {
    pub target_id: String,
    pub kind: TargetKind,
    pub title: String,
    pub language_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub quality: String,
    #[serde(flatten)]
    pub episode: Option<EpisodeRef>,
}

/// Metadata validation failure raised before any transport call is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetaError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("season and episode ids are required for series uploads")]
    MissingEpisode,
}

impl VideoMeta {
    /// Checks the fields the ingest API requires before an upload may start.
    ///
    /// Series targets additionally need season/episode coordinates. A stray
    /// `episode` on a movie target is ignored rather than rejected; the
    /// server drops fields it does not expect.
    pub fn validate(&self) -> Result<(), MetaError> {
        if self.target_id.trim().is_empty() {
            return Err(MetaError::MissingField("targetId"));
        }
        if self.title.trim().is_empty() {
            return Err(MetaError::MissingField("title"));
        }
        if self.language_id.trim().is_empty() {
            return Err(MetaError::MissingField("languageId"));
        }
        if self.kind == TargetKind::Series {
            let complete = self.episode.as_ref().is_some_and(|ep| {
                !ep.season_id.trim().is_empty() && !ep.episode_id.trim().is_empty()
            });
            if !complete {
                return Err(MetaError::MissingEpisode);
            }
        }
        Ok(())
    }

    /// Form-field representation shared by the chunk and finish calls.
    pub(crate) fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("targetId", self.target_id.clone()),
            ("kind", self.kind.as_str().to_string()),
            ("title", self.title.clone()),
            ("languageId", self.language_id.clone()),
        ];
        if !self.quality.is_empty() {
            fields.push(("quality", self.quality.clone()));
        }
        if let Some(ep) = &self.episode {
            fields.push(("seasonId", ep.season_id.clone()));
            fields.push(("episodeId", ep.episode_id.clone()));
        }
        fields
    }
}
