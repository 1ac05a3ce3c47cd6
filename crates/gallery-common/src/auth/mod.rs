//! Admin authentication utilities

mod session;

pub use session::{hash_password, AdminSessionService, SessionClaims, SessionToken, SESSION_COOKIE_NAME};
