use axum::{
    extract::{Extension, Path},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::common::{ApiResult, DataResponse};
use crate::kernel::ServerDeps;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptRecord {
    pub recording_id: String,
    pub data: Value,
}

#[derive(Debug, Serialize)]
pub struct TranscriptListResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<TranscriptRecord>,
}

/// GET /api/transcripts
pub async fn list_transcripts_handler(
    Extension(deps): Extension<ServerDeps>,
) -> ApiResult<Json<TranscriptListResponse>> {
    let transcripts: Vec<TranscriptRecord> = deps
        .transcripts
        .list()
        .await?
        .into_iter()
        .map(|t| TranscriptRecord {
            recording_id: t.recording_id,
            data: t.data,
        })
        .collect();

    Ok(Json(TranscriptListResponse {
        success: true,
        count: transcripts.len(),
        data: transcripts,
    }))
}

/// GET /api/transcript/:recording_id
pub async fn get_transcript_handler(
    Extension(deps): Extension<ServerDeps>,
    Path(recording_id): Path<String>,
) -> ApiResult<Json<DataResponse<Value>>> {
    let transcript = deps.transcripts.get(&recording_id).await?;
    Ok(DataResponse::new(transcript))
}
