use serde::{Deserialize, Serialize};

/// Lifecycle state of an upload session.
///
/// Transitions only move forward; `Finished`, `Failed` and `Cancelled` are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadStatus {
    #[serde(rename = "not_started")]
    NotStarted,
    #[serde(rename = "in_progress")]
    InProgress,
    #[serde(rename = "awaiting_finish")]
    AwaitingFinish,
    #[serde(rename = "finished")]
    Finished,
    #[serde(rename = "failed")]
    Failed,
    #[serde(rename = "cancelled")]
    Cancelled,
}

impl UploadStatus {
    /// True once the session can no longer make progress.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            UploadStatus::Finished | UploadStatus::Failed | UploadStatus::Cancelled
        )
    }
}

/// Progress snapshot for an upload session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadProgress {
    pub session_id: String,
    pub status: UploadStatus,
    pub sent_chunks: u32,
    pub total_chunks: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,
}

impl UploadProgress {
    /// Chunks delivered as a percentage, rounded to the nearest whole point.
    pub fn percent(&self) -> u8 {
        if self.total_chunks == 0 {
            return 0;
        }
        (self.sent_chunks as f64 / self.total_chunks as f64 * 100.0).round() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(sent: u32, total: u32) -> UploadProgress {
        UploadProgress {
            session_id: "sess-1".into(),
            status: UploadStatus::InProgress,
            sent_chunks: sent,
            total_chunks: total,
            error: String::new(),
        }
    }

    #[test]
    fn status_serialization() {
        assert_eq!(
            serde_json::to_string(&UploadStatus::AwaitingFinish).unwrap(),
            "\"awaiting_finish\""
        );
        assert_eq!(
            serde_json::to_string(&UploadStatus::NotStarted).unwrap(),
            "\"not_started\""
        );
        assert_eq!(
            serde_json::to_string(&UploadStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
    }

    #[test]
    fn terminal_states() {
        assert!(UploadStatus::Finished.is_terminal());
        assert!(UploadStatus::Failed.is_terminal());
        assert!(UploadStatus::Cancelled.is_terminal());
        assert!(!UploadStatus::NotStarted.is_terminal());
        assert!(!UploadStatus::InProgress.is_terminal());
        assert!(!UploadStatus::AwaitingFinish.is_terminal());
    }

    #[test]
    fn percent_rounds_to_nearest() {
        assert_eq!(progress(1, 3).percent(), 33);
        assert_eq!(progress(2, 3).percent(), 67);
        assert_eq!(progress(3, 3).percent(), 100);
        assert_eq!(progress(0, 3).percent(), 0);
    }

    #[test]
    fn percent_zero_total() {
        assert_eq!(progress(0, 0).percent(), 0);
    }

    #[test]
    fn progress_field_names() {
        let json = serde_json::to_string(&progress(1, 2)).unwrap();
        assert!(json.contains("\"sessionId\""));
        assert!(json.contains("\"sentChunks\""));
        assert!(json.contains("\"totalChunks\""));
        assert!(json.contains("\"status\":\"in_progress\""));
    }

    #[test]
    fn progress_omits_empty_error() {
        let json = serde_json::to_string(&progress(0, 1)).unwrap();
        assert!(!json.contains("error"));
    }
}
