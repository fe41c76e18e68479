use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::scope::{Scope, ScopeSet};
use crate::auth::{self, Claims};
use crate::error::ApiError;

/// Authenticated caller context extracted from the JWT. Scopes are decoded
/// once here; everything downstream works on the set.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub email: String,
    pub scopes: ScopeSet,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            email: claims.sub,
            scopes: ScopeSet::parse(&claims.scope),
        }
    }
}

impl AuthUser {
    /// Set-containment scope check: every required scope must be present.
    pub fn require(&self, required: &[Scope]) -> Result<(), ApiError> {
        if self.scopes.contains_all(required) {
            Ok(())
        } else {
            Err(ApiError::forbidden("Insufficient permissions."))
        }
    }
}

/// JWT authentication middleware that validates tokens and extracts the
/// caller context for protected routes.
pub async fn jwt_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt_from_headers(&headers).map_err(ApiError::unauthorized)?;

    let claims = auth::decode_token(&token)
        .map_err(|_| ApiError::unauthorized("Could not validate credentials."))?;

    let auth_user = AuthUser::from(claims);
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Extract the bearer token from the Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}
