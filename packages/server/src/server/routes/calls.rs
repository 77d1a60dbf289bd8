use axum::{extract::Extension, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use twilio::Call;

use crate::common::{ApiResult, DataResponse};
use crate::kernel::ServerDeps;

const CALL_LIST_LIMIT: u32 = 50;
const CALL_COUNT_LIMIT: u32 = 500;

const SUCCESS_STATUS: &str = "completed";
const FAIL_STATUSES: [&str; 4] = ["failed", "busy", "no-answer", "canceled"];

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CallRecord {
    pub sid: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub status: String,
    pub duration: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl From<Call> for CallRecord {
    fn from(call: Call) -> Self {
        Self {
            sid: call.sid,
            from: call.from,
            to: call.to,
            status: call.status,
            duration: call.duration,
            start_time: call.start_time,
            end_time: call.end_time,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CallCounts {
    pub total: usize,
    pub success_count: usize,
    pub fail_count: usize,
}

/// Bucket calls by status. Statuses outside both buckets only count toward `total`.
pub fn tally_calls(calls: &[Call]) -> CallCounts {
    let success_count = calls.iter().filter(|c| c.status == SUCCESS_STATUS).count();
    let fail_count = calls
        .iter()
        .filter(|c| FAIL_STATUSES.contains(&c.status.as_str()))
        .count();

    CallCounts {
        total: calls.len(),
        success_count,
        fail_count,
    }
}

#[derive(Debug, Serialize)]
pub struct CallCountsResponse {
    pub success: bool,
    #[serde(flatten)]
    pub counts: CallCounts,
}

/// GET /api/calls
pub async fn list_calls_handler(
    Extension(deps): Extension<ServerDeps>,
) -> ApiResult<Json<DataResponse<Vec<CallRecord>>>> {
    let calls = deps.twilio.list_calls(CALL_LIST_LIMIT).await?;
    Ok(DataResponse::new(
        calls.into_iter().map(CallRecord::from).collect(),
    ))
}

/// GET /api/calls/counts
pub async fn call_counts_handler(
    Extension(deps): Extension<ServerDeps>,
) -> ApiResult<Json<CallCountsResponse>> {
    let calls = deps.twilio.list_calls(CALL_COUNT_LIMIT).await?;
    Ok(Json(CallCountsResponse {
        success: true,
        counts: tally_calls(&calls),
    }))
}
