//! Admin session extractor
//!
//! Reads the `admin_session` cookie and rejects the request with 401 unless
//! it carries a valid, unexpired session token.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;
use gallery_common::{SessionClaims, SESSION_COOKIE_NAME};
use gallery_service::AdminService;

use crate::response::ApiError;
use crate::state::AppState;

/// Proof of a valid admin session
#[derive(Debug, Clone)]
pub struct AdminSession(pub SessionClaims);

/// Session token carried by the cookie jar, if any
pub fn session_token(jar: &CookieJar) -> Option<&str> {
    jar.get(SESSION_COOKIE_NAME).map(|cookie| cookie.value())
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let app_state = AppState::from_ref(state);

        let claims = AdminService::new(app_state.service_context())
            .authorize(session_token(&jar))
            .map_err(|e| {
                tracing::debug!(error = %e, "Admin session rejected");
                ApiError::Service(e)
            })?;

        Ok(AdminSession(claims))
    }
}
