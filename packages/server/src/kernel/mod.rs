//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod test_dependencies;
pub mod traits;
pub mod transcripts;

pub use deps::{ServerDeps, TwilioAdapter};
pub use test_dependencies::{MockTwilioService, TwilioCall};
pub use traits::*;
pub use transcripts::{FsTranscriptStore, TranscriptError};
