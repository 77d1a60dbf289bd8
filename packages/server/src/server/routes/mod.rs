// HTTP routes
pub mod auth;
pub mod calls;
pub mod health;
pub mod messages;
pub mod recordings;
pub mod transcripts;

pub use auth::*;
pub use calls::*;
pub use health::*;
pub use messages::*;
pub use recordings::*;
pub use transcripts::*;
