use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use labelbase_core::DocumentId;

use crate::Role;

/// Session claims carried by a bearer token.
///
/// This is the minimal set Labelbase expects once a token has been decoded
/// and signature-verified. The principal's permissions are deliberately NOT
/// in the token: they are loaded fresh from storage on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the admin user's document id.
    pub sub: DocumentId,

    /// Role at issuance time (informational; authorization re-reads storage).
    pub role: Role,

    /// Issued-at, seconds since epoch.
    pub iat: i64,

    /// Expiration, seconds since epoch.
    pub exp: i64,
}

impl SessionClaims {
    pub fn new(sub: DocumentId, role: Role, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub,
            role,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (iat is in the future)")]
    NotYetValid,

    #[error("invalid token time window (exp <= iat)")]
    InvalidTimeWindow,

    #[error("token is malformed or has a bad signature")]
    Invalid,
}

/// Deterministically validate session claims.
///
/// Note: this validates the *claims* only; signature verification happens in
/// [`TokenCodec::decode`].
pub fn validate_claims(claims: &SessionClaims, now: DateTime<Utc>) -> Result<(), TokenError> {
    if claims.exp <= claims.iat {
        return Err(TokenError::InvalidTimeWindow);
    }
    if now.timestamp() < claims.iat {
        return Err(TokenError::NotYetValid);
    }
    if now.timestamp() >= claims.exp {
        return Err(TokenError::Expired);
    }
    Ok(())
}

/// HS256 token codec.
///
/// Issuance is intentionally thin: it exists so authentication is exercisable
/// end to end; session lifecycle policy lives outside this crate.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    pub fn encode(&self, claims: &SessionClaims) -> Result<String, TokenError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|_| TokenError::Invalid)
    }

    /// Decode and verify a token, then validate its claims against `now`.
    pub fn decode(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Claim-window validation is done explicitly below so the error taxonomy
        // stays deterministic.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = jsonwebtoken::decode::<SessionClaims>(token, &self.decoding, &validation)
            .map_err(|_| TokenError::Invalid)?;
        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(iat_offset: i64, exp_offset: i64) -> SessionClaims {
        let now = Utc::now().timestamp();
        SessionClaims {
            sub: DocumentId::new(),
            role: Role::Manager,
            iat: now + iat_offset,
            exp: now + exp_offset,
        }
    }

    #[test]
    fn accepts_claims_inside_window() {
        assert_eq!(validate_claims(&claims(-60, 60), Utc::now()), Ok(()));
    }

    #[test]
    fn rejects_expired_claims() {
        assert_eq!(
            validate_claims(&claims(-120, -60), Utc::now()),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn rejects_inverted_window() {
        assert_eq!(
            validate_claims(&claims(60, -60), Utc::now()),
            Err(TokenError::InvalidTimeWindow)
        );
    }

    #[test]
    fn round_trips_through_hs256() {
        let codec = TokenCodec::new(b"test-secret");
        let claims = SessionClaims::new(
            DocumentId::new(),
            Role::Admin,
            Utc::now(),
            Duration::hours(8),
        );
        let token = codec.encode(&claims).unwrap();
        let back = codec.decode(&token, Utc::now()).unwrap();
        assert_eq!(claims, back);
    }

    #[test]
    fn rejects_wrong_secret() {
        let codec = TokenCodec::new(b"test-secret");
        let other = TokenCodec::new(b"other-secret");
        let claims = SessionClaims::new(
            DocumentId::new(),
            Role::Admin,
            Utc::now(),
            Duration::hours(8),
        );
        let token = codec.encode(&claims).unwrap();
        assert_eq!(other.decode(&token, Utc::now()), Err(TokenError::Invalid));
    }
}
