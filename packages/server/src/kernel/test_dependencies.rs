// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use twilio::{Call, Message, Recording, TwilioError};

use super::BaseTwilioService;

// =============================================================================
// Mock Twilio Service
// =============================================================================

/// Upstream operation captured by the mock
#[derive(Debug, Clone, PartialEq)]
pub enum TwilioCall {
    ListCalls { limit: u32 },
    ListRecordings { call_sid: Option<String>, limit: u32 },
    FetchRecording { sid: String },
    ListMessages { limit: u32 },
}

/// In-memory stand-in for Twilio that records every request it receives
pub struct MockTwilioService {
    calls: Arc<Mutex<Vec<Call>>>,
    recordings: Arc<Mutex<Vec<Recording>>>,
    messages: Arc<Mutex<Vec<Message>>>,
    failure: Arc<Mutex<Option<String>>>,
    requests: Arc<Mutex<Vec<TwilioCall>>>,
}

impl Default for MockTwilioService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTwilioService {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            recordings: Arc::new(Mutex::new(Vec::new())),
            messages: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_call(self, sid: &str, status: &str) -> Self {
        self.calls.lock().unwrap().push(Call {
            sid: sid.to_string(),
            from: Some("+15550001111".to_string()),
            to: Some("+15550002222".to_string()),
            status: status.to_string(),
            duration: Some("10".to_string()),
            start_time: None,
            end_time: None,
        });
        self
    }

    pub fn with_recording(self, sid: &str, call_sid: &str) -> Self {
        self.recordings.lock().unwrap().push(Recording {
            sid: sid.to_string(),
            call_sid: Some(call_sid.to_string()),
            duration: Some("30".to_string()),
            uri: format!("/2010-04-01/Accounts/ACtest/Recordings/{}.json", sid),
        });
        self
    }

    pub fn with_message(self, sid: &str, status: &str, error_code: Option<i64>) -> Self {
        self.messages.lock().unwrap().push(Message {
            sid: sid.to_string(),
            from: Some("+15550001111".to_string()),
            to: Some("+15550002222".to_string()),
            status: status.to_string(),
            error_code,
            body: Some(format!("body of {}", sid)),
            date_sent: None,
        });
        self
    }

    /// Every operation fails with an API error carrying `message`
    pub fn failing_with(self, message: &str) -> Self {
        *self.failure.lock().unwrap() = Some(message.to_string());
        self
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<TwilioCall> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, request: TwilioCall) -> twilio::Result<()> {
        self.requests.lock().unwrap().push(request);
        match self.failure.lock().unwrap().as_ref() {
            Some(message) => Err(TwilioError::Api {
                status: 500,
                code: None,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

fn take<T: Clone>(items: &Mutex<Vec<T>>, limit: u32) -> Vec<T> {
    items
        .lock()
        .unwrap()
        .iter()
        .take(limit as usize)
        .cloned()
        .collect()
}

#[async_trait]
impl BaseTwilioService for MockTwilioService {
    async fn list_calls(&self, limit: u32) -> twilio::Result<Vec<Call>> {
        self.record(TwilioCall::ListCalls { limit })?;
        Ok(take(&self.calls, limit))
    }

    async fn list_recordings(
        &self,
        call_sid: Option<&str>,
        limit: u32,
    ) -> twilio::Result<Vec<Recording>> {
        self.record(TwilioCall::ListRecordings {
            call_sid: call_sid.map(String::from),
            limit,
        })?;

        let recordings = self.recordings.lock().unwrap();
        Ok(recordings
            .iter()
            .filter(|r| call_sid.is_none() || r.call_sid.as_deref() == call_sid)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn fetch_recording(&self, recording_sid: &str) -> twilio::Result<Recording> {
        self.record(TwilioCall::FetchRecording {
            sid: recording_sid.to_string(),
        })?;

        self.recordings
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.sid == recording_sid)
            .cloned()
            .ok_or(TwilioError::NotFound)
    }

    async fn list_messages(&self, limit: u32) -> twilio::Result<Vec<Message>> {
        self.record(TwilioCall::ListMessages { limit })?;
        Ok(take(&self.messages, limit))
    }
}
