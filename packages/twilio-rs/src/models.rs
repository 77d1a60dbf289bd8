use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Host that recording media is served from.
pub const API_HOST: &str = "https://api.twilio.com";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Call {
    pub sid: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub status: String,
    /// Seconds, as the string Twilio returns. Null while the call is live.
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "rfc2822_opt")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "rfc2822_opt")]
    pub end_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recording {
    pub sid: String,
    pub call_sid: Option<String>,
    pub duration: Option<String>,
    /// Resource path, e.g. `/2010-04-01/Accounts/AC../Recordings/RE...json`
    pub uri: String,
}

impl Recording {
    /// Public media URL: the resource uri on the API host, minus its `.json` suffix.
    pub fn media_url(&self) -> String {
        format!("{}{}", API_HOST, self.uri.replacen(".json", "", 1))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub sid: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub status: String,
    pub error_code: Option<i64>,
    pub body: Option<String>,
    #[serde(default, deserialize_with = "rfc2822_opt")]
    pub date_sent: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CallPage {
    pub calls: Vec<Call>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecordingPage {
    pub recordings: Vec<Recording>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessagePage {
    pub messages: Vec<Message>,
}

/// Error payload Twilio attaches to non-2xx responses
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub code: Option<i64>,
    pub message: String,
}

// Twilio timestamps look like "Tue, 31 Aug 2010 20:36:28 +0000".
fn rfc2822_opt<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => DateTime::parse_from_rfc2822(&s)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(serde::de::Error::custom),
    }
}
