//! Token-based authorization core: JWT issuance and verification, password
//! hashing, scope algebra, and e-mail validation.

pub mod email;
pub mod password;
pub mod scope;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;
use scope::{Scope, ScopeSet};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    /// Subject: the user's e-mail address.
    pub sub: String,
    pub aud: String,
    /// Expiry, unix seconds.
    pub exp: i64,
    /// Space-separated scope string.
    pub scope: String,
}

/// Access/refresh token pair returned by login and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to encode token: {0}")]
    Encode(jsonwebtoken::errors::Error),
    #[error("invalid token: {0}")]
    Invalid(jsonwebtoken::errors::Error),
}

fn issue(sub: &str, scopes: &ScopeSet, ttl_secs: i64) -> Result<String, TokenError> {
    let security = &config::config().security;
    let claims = Claims {
        iss: security.jwt_issuer.clone(),
        sub: sub.to_string(),
        aud: security.jwt_audience.clone(),
        exp: Utc::now().timestamp() + ttl_secs,
        scope: scopes.to_string(),
    };
    encode(
        &Header::new(Algorithm::HS512),
        &claims,
        &EncodingKey::from_secret(security.jwt_secret.as_bytes()),
    )
    .map_err(TokenError::Encode)
}

/// Issue an access/refresh pair for a subject holding the given permission
/// scopes. The access token carries the scopes as-is; the refresh token adds
/// the `refresh` marker and the longer TTL.
pub fn issue_pair(sub: &str, scopes: &ScopeSet) -> Result<TokenPair, TokenError> {
    let security = &config::config().security;
    let access = issue(sub, scopes, security.access_token_ttl_secs)?;
    let refresh = issue(
        sub,
        &scopes.with(Scope::Refresh),
        security.refresh_token_ttl_secs,
    )?;
    Ok(TokenPair { access, refresh })
}

/// Verify signature, expiry, issuer, and audience, and decode the claims.
pub fn decode_token(token: &str) -> Result<Claims, TokenError> {
    let security = &config::config().security;
    let mut validation = Validation::new(Algorithm::HS512);
    validation.set_audience(&[&security.jwt_audience]);
    validation.set_issuer(&[&security.jwt_issuer]);
    validation.set_required_spec_claims(&["exp", "sub", "aud"]);
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(security.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(TokenError::Invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AuthGroup;

    #[test]
    fn issued_access_token_decodes_with_permission_scopes() {
        let scopes = AuthGroup::Common.scopes();
        let pair = issue_pair("user@example.com", &scopes).unwrap();

        let claims = decode_token(&pair.access).unwrap();
        assert_eq!(claims.sub, "user@example.com");
        assert_eq!(ScopeSet::parse(&claims.scope), scopes);
        assert!(!ScopeSet::parse(&claims.scope).contains(Scope::Refresh));
    }

    #[test]
    fn refresh_token_carries_the_marker() {
        let scopes = AuthGroup::Admin.scopes();
        let pair = issue_pair("admin@example.com", &scopes).unwrap();

        let claims = decode_token(&pair.refresh).unwrap();
        let decoded = ScopeSet::parse(&claims.scope);
        assert!(decoded.contains(Scope::Refresh));
        assert_eq!(decoded.without(Scope::Refresh), scopes);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let pair = issue_pair("user@example.com", &ScopeSet::new()).unwrap();
        let mut forged = pair.access;
        forged.pop();
        assert!(matches!(decode_token(&forged), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            decode_token("not-a-jwt"),
            Err(TokenError::Invalid(_))
        ));
    }
}
