use axum::{extract::Extension, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use twilio::Message;

use crate::common::ApiResult;
use crate::kernel::ServerDeps;

const MESSAGE_LIST_LIMIT: u32 = 100;
const FAILED_STATUS: &str = "failed";

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    pub sid: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub status: String,
    pub error_code: Option<i64>,
    pub body: Option<String>,
    pub date_sent: Option<DateTime<Utc>>,
}

impl From<Message> for MessageRecord {
    fn from(message: Message) -> Self {
        Self {
            sid: message.sid,
            from: message.from,
            to: message.to,
            status: message.status,
            error_code: message.error_code,
            body: message.body,
            date_sent: message.date_sent,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagesResponse {
    pub success: bool,
    /// All recent messages, not only failed ones
    pub data: Vec<MessageRecord>,
    pub failed_count: usize,
}

/// GET /api/errors/messages
///
/// Despite the path, `data` holds every one of the latest messages. Clients
/// that only want failures filter on `status`; `failedCount` says how many
/// there are.
pub async fn error_messages_handler(
    Extension(deps): Extension<ServerDeps>,
) -> ApiResult<Json<MessagesResponse>> {
    let messages = deps.twilio.list_messages(MESSAGE_LIST_LIMIT).await?;

    let failed_count = messages
        .iter()
        .filter(|m| m.status == FAILED_STATUS)
        .count();

    Ok(Json(MessagesResponse {
        success: true,
        data: messages.into_iter().map(MessageRecord::from).collect(),
        failed_count,
    }))
}
