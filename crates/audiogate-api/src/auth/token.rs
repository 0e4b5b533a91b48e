//! HS256 session tokens.
//!
//! Tokens are stateless: nothing is stored server-side and there is no
//! revocation. A token is accepted while `nbf <= now < exp`.

use super::AuthError;
use audiogate_core::{AppError, Config};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Identity claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub iss: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
}

/// Issues and validates session tokens with a shared secret.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    lifetime: Duration,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str, lifetime_hours: i64, issuer: impl Into<String>) -> Self {
        let issuer = issuer.into();

        // exp/nbf are checked by hand in `validate_at` against the caller's clock.
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "sub"]);
        validation.set_issuer(&[issuer.as_str()]);

        // An unrepresentable lifetime yields tokens that are never valid.
        let lifetime = Duration::try_hours(lifetime_hours).unwrap_or_else(|| {
            tracing::warn!(lifetime_hours, "Token lifetime out of range, issuing expired tokens");
            Duration::zero()
        });

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            lifetime,
            validation,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.jwt_secret(),
            config.jwt_expiry_hours(),
            config.jwt_issuer(),
        )
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    pub fn issue(&self, user_id: Uuid, email: &str) -> Result<String, AppError> {
        self.issue_at(user_id, email, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(
        &self,
        user_id: Uuid,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let issued_at = now.timestamp();
        let expires_at = now
            .checked_add_signed(self.lifetime)
            .ok_or_else(|| AppError::Internal("Token expiry is out of range".to_string()))?;
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            iss: self.issuer.clone(),
            iat: issued_at,
            nbf: issued_at,
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        self.validate_at(token, Utc::now())
    }

    /// Validate a token against the clock value `now`.
    ///
    /// The MAC over `header.payload` is checked before anything is decoded,
    /// so any altered byte yields [`AuthError::InvalidSignature`]. A header
    /// naming another algorithm fails the same way.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        let (message, signature) = token
            .rsplit_once('.')
            .ok_or_else(|| AuthError::Malformed("token is not in compact form".to_string()))?;
        if message.split('.').count() != 2 {
            return Err(AuthError::Malformed(
                "token is not in compact form".to_string(),
            ));
        }

        let signature_ok =
            jsonwebtoken::crypto::verify(signature, message.as_bytes(), &self.decoding_key, ALGORITHM)
                .map_err(|e| AuthError::Malformed(e.to_string()))?;
        if !signature_ok {
            return Err(AuthError::InvalidSignature);
        }

        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    AuthError::InvalidSignature
                }
                ErrorKind::InvalidIssuer => AuthError::InvalidIssuer,
                ErrorKind::ExpiredSignature => AuthError::Expired,
                ErrorKind::ImmatureSignature => AuthError::NotYetValid,
                _ => AuthError::Malformed(e.to_string()),
            }
        })?;

        let claims = data.claims;
        let now = now.timestamp();
        if now < claims.nbf {
            return Err(AuthError::NotYetValid);
        }
        if now >= claims.exp {
            return Err(AuthError::Expired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn service() -> TokenService {
        TokenService::new(SECRET, 24, "auth_service")
    }

    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_issue_and_validate() {
        let svc = service();
        let user_id = Uuid::new_v4();
        let token = svc.issue_at(user_id, "ada@example.com", issued_at()).unwrap();

        let claims = svc.validate_at(&token, issued_at()).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.iss, "auth_service");
        assert_eq!(claims.iat, claims.nbf);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_window_boundaries() {
        let svc = service();
        let token = svc.issue_at(Uuid::new_v4(), "a@b.co", issued_at()).unwrap();
        let lifetime = svc.lifetime();

        assert!(svc
            .validate_at(&token, issued_at() + lifetime - Duration::seconds(1))
            .is_ok());
        assert_eq!(
            svc.validate_at(&token, issued_at() + lifetime),
            Err(AuthError::Expired)
        );
        assert_eq!(
            svc.validate_at(&token, issued_at() - Duration::seconds(1)),
            Err(AuthError::NotYetValid)
        );
    }

    #[test]
    fn test_any_tampered_byte_breaks_signature() {
        let svc = service();
        let token = svc.issue_at(Uuid::new_v4(), "a@b.co", issued_at()).unwrap();

        for (idx, ch) in token.char_indices() {
            if ch == '.' {
                continue;
            }
            let replacement = if ch == 'A' { 'B' } else { 'A' };
            let mut tampered = token.clone();
            tampered.replace_range(idx..idx + 1, &replacement.to_string());

            assert_eq!(
                svc.validate_at(&tampered, issued_at()),
                Err(AuthError::InvalidSignature),
                "byte {} was altered",
                idx
            );
        }
    }

    #[test]
    fn test_wrong_secret_is_invalid_signature() {
        let token = service()
            .issue_at(Uuid::new_v4(), "a@b.co", issued_at())
            .unwrap();
        let other = TokenService::new("ffffffffffffffffffffffffffffffff", 24, "auth_service");

        assert_eq!(
            other.validate_at(&token, issued_at()),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn test_other_algorithm_is_rejected() {
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "a@b.co".to_string(),
            iss: "auth_service".to_string(),
            iat: issued_at().timestamp(),
            nbf: issued_at().timestamp(),
            exp: issued_at().timestamp() + 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(
            service().validate_at(&token, issued_at()),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn test_issuer_must_match() {
        let foreign = TokenService::new(SECRET, 24, "someone_else");
        let token = foreign
            .issue_at(Uuid::new_v4(), "a@b.co", issued_at())
            .unwrap();

        assert_eq!(
            service().validate_at(&token, issued_at()),
            Err(AuthError::InvalidIssuer)
        );
    }

    #[test]
    fn test_garbage_is_malformed() {
        let svc = service();
        assert!(matches!(
            svc.validate_at("not-a-token", issued_at()),
            Err(AuthError::Malformed(_))
        ));
        assert!(matches!(
            svc.validate_at("a.b.c.d", issued_at()),
            Err(AuthError::Malformed(_))
        ));
    }

    #[test]
    fn test_out_of_range_lifetime_does_not_panic() {
        let svc = TokenService::new(SECRET, i64::MAX, "auth_service");
        assert_eq!(svc.lifetime(), Duration::zero());

        let token = svc.issue_at(Uuid::new_v4(), "a@b.co", issued_at()).unwrap();
        assert_eq!(
            svc.validate_at(&token, issued_at()),
            Err(AuthError::Expired)
        );
    }

    #[test]
    fn test_expiry_past_the_calendar_is_an_error() {
        let result = service().issue_at(Uuid::new_v4(), "a@b.co", DateTime::<Utc>::MAX_UTC);
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[test]
    fn test_validate_uses_current_time() {
        let svc = service();
        let token = svc.issue(Uuid::new_v4(), "now@example.com").unwrap();
        assert!(svc.validate(&token).is_ok());
    }
}
