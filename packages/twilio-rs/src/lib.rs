// Minimal client for the Twilio REST API (2010-04-01): calls, recordings, messages.

pub mod models;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::models::{ApiErrorBody, CallPage, MessagePage, RecordingPage};
pub use crate::models::{Call, Message, Recording, API_HOST};

/// Largest page Twilio serves; list limits above this would need paging.
pub const MAX_PAGE_SIZE: u32 = 1000;

#[derive(Debug, thiserror::Error)]
pub enum TwilioError {
    #[error("The requested resource was not found")]
    NotFound,

    #[error("{message}")]
    Api {
        status: u16,
        code: Option<i64>,
        message: String,
    },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse Twilio response: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, TwilioError>;

#[derive(Debug, Clone)]
pub struct TwilioOptions {
    pub account_sid: String,
    pub auth_token: String,
}

#[derive(Debug, Clone)]
pub struct TwilioService {
    options: TwilioOptions,
    base_url: String,
    client: Client,
}

impl TwilioService {
    pub fn new(options: TwilioOptions) -> Self {
        Self::with_base_url(options, API_HOST)
    }

    /// Point the client at another host (a local mock in tests).
    pub fn with_base_url(options: TwilioOptions, base_url: impl Into<String>) -> Self {
        Self {
            options,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    fn account_url(&self, resource: &str) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/{}",
            self.base_url, self.options.account_sid, resource
        )
    }

    /// Most recent calls first, at most `limit`.
    pub async fn list_calls(&self, limit: u32) -> Result<Vec<Call>> {
        let page: CallPage = self
            .get_json(&self.account_url("Calls.json"), &[("PageSize", page_size(limit))])
            .await?;
        Ok(truncate(page.calls, limit))
    }

    /// Recordings, optionally only those belonging to `call_sid`.
    pub async fn list_recordings(
        &self,
        call_sid: Option<&str>,
        limit: u32,
    ) -> Result<Vec<Recording>> {
        let mut query = vec![("PageSize", page_size(limit))];
        if let Some(call_sid) = call_sid {
            query.push(("CallSid", call_sid.to_string()));
        }

        let page: RecordingPage = self
            .get_json(&self.account_url("Recordings.json"), &query)
            .await?;
        Ok(truncate(page.recordings, limit))
    }

    /// Sids that are not plain alphanumerics cannot name a recording and are
    /// reported as not found without a request.
    pub async fn fetch_recording(&self, recording_sid: &str) -> Result<Recording> {
        if !is_valid_sid(recording_sid) {
            return Err(TwilioError::NotFound);
        }
        let url = self.account_url(&format!("Recordings/{}.json", recording_sid));
        self.get_json(&url, &[]).await
    }

    pub async fn list_messages(&self, limit: u32) -> Result<Vec<Message>> {
        let page: MessagePage = self
            .get_json(&self.account_url("Messages.json"), &[("PageSize", page_size(limit))])
            .await?;
        Ok(truncate(page.messages, limit))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self
            .client
            .get(url)
            .basic_auth(&self.options.account_sid, Some(&self.options.auth_token))
            .query(query)
            .send()
            .await?;

        let response = check_status(response).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| TwilioError::Decode(e.to_string()))
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(TwilioError::NotFound);
    }

    let body = response.text().await.unwrap_or_default();
    let (code, message) = match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(parsed) => (parsed.code, parsed.message),
        Err(_) => (None, format!("Twilio returned an error ({})", status)),
    };

    Err(TwilioError::Api {
        status: status.as_u16(),
        code,
        message,
    })
}

// Sids become a path segment of the request URL
fn is_valid_sid(sid: &str) -> bool {
    !sid.is_empty() && sid.chars().all(|c| c.is_ascii_alphanumeric())
}

fn page_size(limit: u32) -> String {
    limit.clamp(1, MAX_PAGE_SIZE).to_string()
}

fn truncate<T>(mut items: Vec<T>, limit: u32) -> Vec<T> {
    items.truncate(limit as usize);
    items
}
