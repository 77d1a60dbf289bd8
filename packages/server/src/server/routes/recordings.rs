use axum::{
    extract::{Extension, Path},
    Json,
};
use serde::Serialize;
use twilio::{Recording, TwilioError};

use crate::common::{ApiError, ApiResult, DataResponse};
use crate::kernel::ServerDeps;

const RECORDING_LIST_LIMIT: u32 = 50;
const CALL_RECORDING_LIMIT: u32 = 20;

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecordingRecord {
    pub sid: String,
    pub call_sid: Option<String>,
    pub duration: Option<String>,
    pub url: String,
}

impl From<Recording> for RecordingRecord {
    fn from(recording: Recording) -> Self {
        let url = recording.media_url();
        Self {
            sid: recording.sid,
            call_sid: recording.call_sid,
            duration: recording.duration,
            url,
        }
    }
}

fn to_records(recordings: Vec<Recording>) -> Vec<RecordingRecord> {
    recordings.into_iter().map(RecordingRecord::from).collect()
}

/// GET /api/recordings
pub async fn list_recordings_handler(
    Extension(deps): Extension<ServerDeps>,
) -> ApiResult<Json<DataResponse<Vec<RecordingRecord>>>> {
    let recordings = deps
        .twilio
        .list_recordings(None, RECORDING_LIST_LIMIT)
        .await?;
    Ok(DataResponse::new(to_records(recordings)))
}

/// GET /api/call/:sid/recordings
pub async fn call_recordings_handler(
    Extension(deps): Extension<ServerDeps>,
    Path(call_sid): Path<String>,
) -> ApiResult<Json<DataResponse<Vec<RecordingRecord>>>> {
    let recordings = deps
        .twilio
        .list_recordings(Some(&call_sid), CALL_RECORDING_LIMIT)
        .await?;
    Ok(DataResponse::new(to_records(recordings)))
}

/// GET /api/recording/:id
pub async fn get_recording_handler(
    Extension(deps): Extension<ServerDeps>,
    Path(recording_sid): Path<String>,
) -> ApiResult<Json<DataResponse<RecordingRecord>>> {
    let recording = deps
        .twilio
        .fetch_recording(&recording_sid)
        .await
        .map_err(|e| match e {
            TwilioError::NotFound => ApiError::NotFound("Recording not found".to_string()),
            other => other.into(),
        })?;

    Ok(DataResponse::new(recording.into()))
}
