use crate::auth::{AuthError, AuthUser, TokenService};
use crate::error::error_response;
use crate::state::AppState;
use audiogate_core::AppError;
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Pull the bearer token out of the `Authorization` header.
///
/// The scheme is matched case-insensitively; the token itself must be a
/// single non-empty word.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::MalformedHeader)?;

    if value.trim().is_empty() {
        return Err(AuthError::MissingHeader);
    }

    let (scheme, token) = value
        .split_once(' ')
        .ok_or(AuthError::MalformedHeader)?;
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() || token.contains(' ') {
        return Err(AuthError::MalformedHeader);
    }

    Ok(token)
}

pub fn authenticate(headers: &HeaderMap, tokens: &TokenService) -> Result<AuthUser, AuthError> {
    let token = bearer_token(headers)?;
    let claims = tokens.validate(token)?;
    Ok(AuthUser::from(claims))
}

/// Session guard for protected routes.
///
/// Emits exactly one log event per request: the subject on success or the
/// rejection cause on failure.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(request.headers(), &state.tokens) {
        Ok(user) => {
            tracing::debug!(
                user_id = %user.user_id,
                path = %request.uri().path(),
                "Request authenticated"
            );
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(err) => {
            tracing::info!(
                cause = err.cause(),
                error = %err,
                path = %request.uri().path(),
                "Request rejected: authentication failed"
            );
            error_response(&AppError::from(err))
        }
    }
}
