//! Admin service
//!
//! Password login issuing a signed session token, session verification and
//! the guard used by admin-only routes.

use tracing::{info, instrument, warn};
use validator::Validate;

use gallery_common::{AppError, SessionClaims};

use crate::dto::{AdminLoginRequest, AdminVerifyResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub const LOGIN_SUCCESS_MESSAGE: &str = "관리자 로그인 성공";
pub const LOGIN_FAILED_MESSAGE: &str = "잘못된 비밀번호입니다.";
pub const LOGOUT_MESSAGE: &str = "로그아웃 성공";

/// Result of a login attempt. A wrong password is an outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Granted { token: String, max_age_secs: i64 },
    Denied,
}

/// Admin service
pub struct AdminService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AdminService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, request))]
    pub fn login(&self, request: &AdminLoginRequest) -> ServiceResult<LoginOutcome> {
        request.validate()?;

        let sessions = self.ctx.admin_session();
        if !sessions.verify_password(&request.password) {
            warn!("Admin login rejected");
            return Ok(LoginOutcome::Denied);
        }

        let session = sessions.issue()?;
        info!("Admin logged in");

        Ok(LoginOutcome::Granted {
            token: session.token,
            max_age_secs: session.expires_in,
        })
    }

    /// Report whether the presented session token is valid
    pub fn verify(&self, token: Option<&str>) -> AdminVerifyResponse {
        let is_admin = self.ctx.admin_session().is_valid(token);
        AdminVerifyResponse {
            success: true,
            is_admin,
        }
    }

    /// Require a valid session token
    ///
    /// # Errors
    /// `MissingSession` without a token, `InvalidSession` or
    /// `SessionExpired` for a bad one
    pub fn authorize(&self, token: Option<&str>) -> ServiceResult<SessionClaims> {
        let token = token.ok_or(AppError::MissingSession)?;
        Ok(self.ctx.admin_session().validate(token)?)
    }
}
