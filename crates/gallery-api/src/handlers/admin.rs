//! Admin session handlers
//!
//! Login sets an HttpOnly session cookie, logout clears it, verify reports
//! whether the current cookie is valid.

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use gallery_common::SESSION_COOKIE_NAME;
use gallery_service::{
    AdminLoginRequest, AdminLoginResponse, AdminService, AdminVerifyResponse, LoginOutcome,
    LOGIN_FAILED_MESSAGE, LOGIN_SUCCESS_MESSAGE, LOGOUT_MESSAGE,
};

use crate::extractors::{session_token, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

fn session_cookie(token: String, max_age_secs: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(max_age_secs))
        .build()
}

/// Log in with the shared admin password
///
/// POST /admin/login
///
/// A wrong password is `200 {success: false}`; only a malformed body is an
/// error.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<AdminLoginRequest>,
) -> ApiResult<(CookieJar, Json<AdminLoginResponse>)> {
    let outcome = AdminService::new(state.service_context()).login(&request)?;

    match outcome {
        LoginOutcome::Granted { token, max_age_secs } => {
            let jar = jar.add(session_cookie(token, max_age_secs, state.secure_cookies()));
            Ok((
                jar,
                Json(AdminLoginResponse {
                    success: true,
                    message: LOGIN_SUCCESS_MESSAGE.to_string(),
                }),
            ))
        }
        LoginOutcome::Denied => Ok((
            jar,
            Json(AdminLoginResponse {
                success: false,
                message: LOGIN_FAILED_MESSAGE.to_string(),
            }),
        )),
    }
}

/// POST /admin/logout
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<AdminLoginResponse>) {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE_NAME).path("/"));
    (
        jar,
        Json(AdminLoginResponse {
            success: true,
            message: LOGOUT_MESSAGE.to_string(),
        }),
    )
}

/// GET /admin/verify
pub async fn verify(State(state): State<AppState>, jar: CookieJar) -> Json<AdminVerifyResponse> {
    Json(AdminService::new(state.service_context()).verify(session_token(&jar)))
}
