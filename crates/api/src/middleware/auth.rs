//! JWT-based admin extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use gamehub_core::error::CoreError;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Allowlisted admin extracted from a JWT Bearer token in the
/// `Authorization` header.
///
/// Use this as an extractor parameter in any handler that requires admin
/// access:
///
/// ```ignore
/// async fn my_handler(admin: AdminUser) -> AppResult<Json<()>> {
///     tracing::info!(admin = %admin.email, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AdminUser {
    /// The admin's email address (from `claims.sub`).
    pub email: String,
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        if !state.config.jwt.is_admin(&claims.sub) {
            return Err(AppError::Core(CoreError::Forbidden(
                "This account does not have admin access".into(),
            )));
        }

        Ok(AdminUser { email: claims.sub })
    }
}
