fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use vidora_protocol::{
        ApiErrorBody, ChunkFields, EpisodeRef, FinishRequest, ServerReply, TargetKind,
        UploadProgress, UploadStatus, VideoMeta,
    };

    /// Parses a wire sample, re-serializes it, and asserts the JSON is
    /// unchanged, then returns the parsed value.
    fn roundtrip<T>(json: &str) -> T
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let value: serde_json::Value = serde_json::from_str(json).unwrap();
        let parsed: T = serde_json::from_value(value.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize sample: {e}"));
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize sample: {e}"));
        assert_eq!(
            value, reserialized,
            "roundtrip mismatch:\n  wire: {value}\n  rust: {reserialized}"
        );
        parsed
    }

    fn object_keys(value: &serde_json::Value) -> Vec<String> {
        value
            .as_object()
            .expect("expected a JSON object")
            .keys()
            .cloned()
            .collect()
    }

    fn series_meta() -> VideoMeta {
        VideoMeta {
            target_id: "sr-301".into(),
            kind: TargetKind::Series,
            title: "Harbor Lights".into(),
            language_id: "lang-es".into(),
            quality: "720p".into(),
            episode: Some(EpisodeRef {
                season_id: "season-2".into(),
                episode_id: "ep-14".into(),
            }),
        }
    }

    fn movie_meta() -> VideoMeta {
        VideoMeta {
            target_id: "mov-42".into(),
            kind: TargetKind::Movie,
            title: "Night Train".into(),
            language_id: "lang-en".into(),
            quality: "1080p".into(),
            episode: None,
        }
    }

    // --- Outbound: chunk call ---

    #[test]
    fn chunk_form_fields_cover_backend_contract() {
        let fields = ChunkFields {
            session_id: "sr-301-1700000000000-9f2c11ab".into(),
            chunk_index: 2,
            total_chunks: 5,
            meta: series_meta(),
        };
        let names: Vec<&str> = fields.form_fields().iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            [
                "sessionId",
                "chunkIndex",
                "totalChunks",
                "targetId",
                "kind",
                "title",
                "languageId",
                "quality",
                "seasonId",
                "episodeId",
            ]
        );
    }

    #[test]
    fn chunk_indices_are_sent_as_decimal_strings() {
        let fields = ChunkFields {
            session_id: "mov-42-1700000000000-9f2c11ab".into(),
            chunk_index: 0,
            total_chunks: 12,
            meta: movie_meta(),
        };
        let form = fields.form_fields();
        let get = |name: &str| {
            form.iter()
                .find(|(n, _)| *n == name)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(get("chunkIndex"), "0");
        assert_eq!(get("totalChunks"), "12");
        assert_eq!(get("kind"), "movie");
    }

    #[test]
    fn movie_chunk_omits_episode_fields() {
        let fields = ChunkFields {
            session_id: "mov-42-1700000000000-9f2c11ab".into(),
            chunk_index: 0,
            total_chunks: 3,
            meta: movie_meta(),
        };
        let names: Vec<&str> = fields.form_fields().iter().map(|(n, _)| *n).collect();
        assert!(!names.contains(&"seasonId"));
        assert!(!names.contains(&"episodeId"));
    }

    // --- Outbound: finish call ---

    #[test]
    fn finish_body_is_flat_camel_case() {
        let request = FinishRequest {
            session_id: "sr-301-1700000000000-9f2c11ab".into(),
            meta: series_meta(),
        };
        let value = serde_json::to_value(&request).unwrap();
        let mut keys = object_keys(&value);
        keys.sort();
        assert_eq!(
            keys,
            [
                "episodeId",
                "kind",
                "languageId",
                "quality",
                "seasonId",
                "sessionId",
                "targetId",
                "title",
            ]
        );
        // Episode ids flatten to the top level, no nested objects.
        assert_eq!(value["seasonId"], "season-2");
        assert_eq!(value["episodeId"], "ep-14");
    }

    #[test]
    fn finish_body_has_no_chunk_coordinates() {
        let request = FinishRequest {
            session_id: "mov-42-1700000000000-9f2c11ab".into(),
            meta: movie_meta(),
        };
        let value = serde_json::to_value(&request).unwrap();
        let keys = object_keys(&value);
        assert!(!keys.contains(&"chunkIndex".to_string()));
        assert!(!keys.contains(&"totalChunks".to_string()));
        assert!(!keys.contains(&"seasonId".to_string()));
        assert!(!keys.contains(&"episodeId".to_string()));
    }

    #[test]
    fn empty_quality_is_omitted_everywhere() {
        let mut meta = movie_meta();
        meta.quality = String::new();
        let request = FinishRequest {
            session_id: "mov-42-1700000000000-9f2c11ab".into(),
            meta: meta.clone(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(!object_keys(&value).contains(&"quality".to_string()));

        let fields = ChunkFields {
            session_id: "mov-42-1700000000000-9f2c11ab".into(),
            chunk_index: 0,
            total_chunks: 1,
            meta,
        };
        let names: Vec<&str> = fields.form_fields().iter().map(|(n, _)| *n).collect();
        assert!(!names.contains(&"quality"));
    }

    #[test]
    fn finish_request_sample_roundtrips() {
        let request: FinishRequest = roundtrip(
            r#"{
                "sessionId": "sr-301-1700000000000-9f2c11ab",
                "targetId": "sr-301",
                "kind": "series",
                "title": "Harbor Lights",
                "languageId": "lang-es",
                "quality": "720p",
                "seasonId": "season-2",
                "episodeId": "ep-14"
            }"#,
        );
        assert_eq!(request.meta, series_meta());
    }

    #[test]
    fn chunk_fields_sample_without_quality_defaults_empty() {
        let fields: ChunkFields = roundtrip(
            r#"{
                "sessionId": "mov-42-1700000000000-9f2c11ab",
                "chunkIndex": 1,
                "totalChunks": 3,
                "targetId": "mov-42",
                "kind": "movie",
                "title": "Night Train",
                "languageId": "lang-en"
            }"#,
        );
        assert_eq!(fields.chunk_index, 1);
        assert!(fields.meta.quality.is_empty());
        assert!(fields.meta.episode.is_none());
    }

    // --- Status and progress ---

    #[test]
    fn status_strings_match_dashboard_contract() {
        let cases = [
            (UploadStatus::NotStarted, "\"not_started\""),
            (UploadStatus::InProgress, "\"in_progress\""),
            (UploadStatus::AwaitingFinish, "\"awaiting_finish\""),
            (UploadStatus::Finished, "\"finished\""),
            (UploadStatus::Failed, "\"failed\""),
            (UploadStatus::Cancelled, "\"cancelled\""),
        ];
        for (status, wire) in cases {
            assert_eq!(serde_json::to_string(&status).unwrap(), wire);
            let parsed: UploadStatus = serde_json::from_str(wire).unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn progress_snapshot_field_names() {
        let progress = UploadProgress {
            session_id: "mov-42-1700000000000-9f2c11ab".into(),
            status: UploadStatus::InProgress,
            sent_chunks: 2,
            total_chunks: 3,
            error: String::new(),
        };
        let value = serde_json::to_value(&progress).unwrap();
        let mut keys = object_keys(&value);
        keys.sort();
        assert_eq!(keys, ["sentChunks", "sessionId", "status", "totalChunks"]);
    }

    #[test]
    fn failed_progress_carries_error_text() {
        let progress: UploadProgress = roundtrip(
            r#"{
                "sessionId": "mov-42-1700000000000-9f2c11ab",
                "status": "failed",
                "sentChunks": 1,
                "totalChunks": 3,
                "error": "could not deliver chunk 2 of 3: network error: timed out"
            }"#,
        );
        assert_eq!(progress.status, UploadStatus::Failed);
        assert!(progress.error.contains("chunk 2 of 3"));
    }

    // --- Server replies and error bodies ---

    #[test]
    fn error_body_with_code_and_message() {
        let body = ApiErrorBody::from_slice(br#"{"code":422,"message":"unknown language id"}"#)
            .expect("structured body should parse");
        assert_eq!(body.code, Some(422));
        assert_eq!(body.message, "unknown language id");
    }

    #[test]
    fn error_body_tolerates_missing_code() {
        let body = ApiErrorBody::from_slice(br#"{"message":"session expired"}"#)
            .expect("message-only body should parse");
        assert_eq!(body.code, None);
        assert_eq!(body.message, "session expired");
    }

    #[test]
    fn blank_or_unstructured_error_bodies_are_rejected() {
        assert!(ApiErrorBody::from_slice(br#"{"message":"  "}"#).is_none());
        assert!(ApiErrorBody::from_slice(br#"{"code":500}"#).is_none());
        assert!(ApiErrorBody::from_slice(b"<html>502 Bad Gateway</html>").is_none());
        assert!(ApiErrorBody::from_slice(b"").is_none());
    }

    #[test]
    fn server_reply_preserves_unknown_payload() {
        let reply = ServerReply::from_body(r#"{"transcodeJobId":"tj-81","etaSeconds":120}"#);
        let payload: serde_json::Value = reply.parse_payload().unwrap().unwrap();
        assert_eq!(payload["transcodeJobId"], "tj-81");
        assert_eq!(payload["etaSeconds"], 120);
    }

    #[test]
    fn non_json_success_body_degrades_to_empty_reply() {
        let reply = ServerReply::from_body("OK");
        assert!(reply.payload.is_none());
        let reply = ServerReply::from_body("   ");
        assert!(reply.payload.is_none());
    }
}
