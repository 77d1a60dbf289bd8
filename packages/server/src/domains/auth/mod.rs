// Admin login: credential check and session tokens
pub mod credentials;
pub mod jwt;

pub use credentials::AdminCredentials;
pub use jwt::{Claims, JwtService, TOKEN_TTL_HOURS};
