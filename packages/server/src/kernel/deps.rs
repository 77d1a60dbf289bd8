//! Server dependencies for route handlers (using traits for testability)
//!
//! This module provides the dependency container shared by every request.
//! External services sit behind trait abstractions so tests can swap them out.

use async_trait::async_trait;
use std::sync::Arc;
use twilio::{Call, Message, Recording, TwilioService};

use crate::domains::auth::{AdminCredentials, JwtService};
use crate::kernel::{BaseTranscriptStore, BaseTwilioService};

// =============================================================================
// TwilioService Adapter (implements BaseTwilioService trait)
// =============================================================================

/// Wrapper around TwilioService that implements BaseTwilioService trait
pub struct TwilioAdapter(pub Arc<TwilioService>);

impl TwilioAdapter {
    pub fn new(service: Arc<TwilioService>) -> Self {
        Self(service)
    }
}

#[async_trait]
impl BaseTwilioService for TwilioAdapter {
    async fn list_calls(&self, limit: u32) -> twilio::Result<Vec<Call>> {
        self.0.list_calls(limit).await
    }

    async fn list_recordings(
        &self,
        call_sid: Option<&str>,
        limit: u32,
    ) -> twilio::Result<Vec<Recording>> {
        self.0.list_recordings(call_sid, limit).await
    }

    async fn fetch_recording(&self, recording_sid: &str) -> twilio::Result<Recording> {
        self.0.fetch_recording(recording_sid).await
    }

    async fn list_messages(&self, limit: u32) -> twilio::Result<Vec<Message>> {
        self.0.list_messages(limit).await
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Read-only dependencies, built once at startup and shared by all requests
#[derive(Clone)]
pub struct ServerDeps {
    pub twilio: Arc<dyn BaseTwilioService>,
    pub transcripts: Arc<dyn BaseTranscriptStore>,
    /// JWT service for token creation and verification
    pub jwt_service: Arc<JwtService>,
    pub admin: Arc<AdminCredentials>,
}

impl ServerDeps {
    pub fn new(
        twilio: Arc<dyn BaseTwilioService>,
        transcripts: Arc<dyn BaseTranscriptStore>,
        jwt_service: Arc<JwtService>,
        admin: Arc<AdminCredentials>,
    ) -> Self {
        Self {
            twilio,
            transcripts,
            jwt_service,
            admin,
        }
    }
}
