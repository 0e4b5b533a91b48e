use audiogate_core::AppError;

/// Why a request failed authentication.
///
/// Every variant answers 401. The variant is only logged; clients get one of
/// three fixed messages from [`AuthError::client_message`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("authorization header missing")]
    MissingHeader,

    #[error("authorization header is not a bearer token")]
    MalformedHeader,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("token is not valid yet")]
    NotYetValid,

    #[error("token is malformed: {0}")]
    Malformed(String),

    #[error("token issuer does not match")]
    InvalidIssuer,
}

impl AuthError {
    /// Short machine-readable cause for log fields.
    pub fn cause(&self) -> &'static str {
        match self {
            AuthError::MissingHeader => "missing_header",
            AuthError::MalformedHeader => "malformed_header",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::Expired => "expired",
            AuthError::NotYetValid => "not_yet_valid",
            AuthError::Malformed(_) => "malformed_token",
            AuthError::InvalidIssuer => "invalid_issuer",
        }
    }

    pub fn client_message(&self) -> &'static str {
        match self {
            AuthError::MissingHeader => "Authorization header required",
            AuthError::MalformedHeader => "Invalid authorization header format. Use Bearer token.",
            _ => "Invalid or expired token",
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Unauthorized(err.client_message().to_string())
    }
}
