// Service traits for external collaborators (mocked in tests)

use async_trait::async_trait;
use serde_json::Value;
use twilio::{Call, Message, Recording};

use super::transcripts::TranscriptError;

// =============================================================================
// Twilio Service Trait (Infrastructure - calls, recordings, messages)
// =============================================================================

#[async_trait]
pub trait BaseTwilioService: Send + Sync {
    /// Most recent calls, at most `limit`
    async fn list_calls(&self, limit: u32) -> twilio::Result<Vec<Call>>;

    /// Recordings, optionally restricted to one call
    async fn list_recordings(
        &self,
        call_sid: Option<&str>,
        limit: u32,
    ) -> twilio::Result<Vec<Recording>>;

    /// Single recording; `TwilioError::NotFound` when it does not exist
    async fn fetch_recording(&self, recording_sid: &str) -> twilio::Result<Recording>;

    async fn list_messages(&self, limit: u32) -> twilio::Result<Vec<Message>>;
}

// =============================================================================
// Transcript Store Trait (Infrastructure - pre-generated JSON files)
// =============================================================================

/// One transcript file, keyed by the recording it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct StoredTranscript {
    pub recording_id: String,
    pub data: Value,
}

#[async_trait]
pub trait BaseTranscriptStore: Send + Sync {
    /// Every transcript in the store, ordered by recording id
    async fn list(&self) -> Result<Vec<StoredTranscript>, TranscriptError>;

    /// Parsed contents of one transcript
    async fn get(&self, recording_id: &str) -> Result<Value, TranscriptError>;
}
