pub mod extractors;
pub mod middleware;
pub mod password;
pub mod session;

use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use extractors::Principal;
pub use middleware::AuthMiddleware;
pub use password::CredentialVerifier;
pub use session::SessionManager;

/// Status reported in the body of a successful login.
pub const LOGIN_SUCCESS: &str = "Login success";

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Must be a valid email format.
    #[validate(email)]
    pub email: String,
    /// Checked against the stored hash; no strength rules apply at login.
    #[validate(length(min = 1))]
    pub password: String,
}

/// Response body of a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub status: String,
    /// Session token to send back in the token header.
    pub token: String,
}
