// Callboard - API Core
//
// Admin-only REST API over a Twilio account: calls, recordings, messages,
// and locally stored call transcripts. A single configured administrator
// logs in for a JWT that every other /api route requires.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
