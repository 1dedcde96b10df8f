use auth::TokenClaims;
use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::models::User;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type holding the user resolved from the bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    pub claims: TokenClaims,
}

/// Middleware state: the application state plus the scopes a route requires.
#[derive(Clone)]
pub struct BearerGuard {
    state: AppState,
    scopes: &'static [&'static str],
}

impl BearerGuard {
    /// Guard that accepts any valid token.
    pub fn new(state: AppState) -> Self {
        Self { state, scopes: &[] }
    }

    /// Guard that additionally requires every scope in `scopes`.
    pub fn with_scopes(state: AppState, scopes: &'static [&'static str]) -> Self {
        Self { state, scopes }
    }

    fn challenge_scope(&self) -> Option<String> {
        (!self.scopes.is_empty()).then(|| self.scopes.join(" "))
    }

    fn unauthorized(&self, message: impl Into<String>) -> ApiError {
        ApiError::Unauthorized {
            message: message.into(),
            scope: self.challenge_scope(),
        }
    }
}

/// Middleware that validates bearer tokens and adds the user to request extensions
pub async fn authenticate(
    State(guard): State<BearerGuard>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)
        .map_err(|message| guard.unauthorized(message))?
        .to_string();

    let current = guard
        .state
        .authenticator
        .current_user(&token, guard.scopes)
        .await
        .map_err(|e| match ApiError::from(e) {
            ApiError::Unauthorized { message, .. } => guard.unauthorized(message),
            other => other,
        })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user: current.user,
        claims: current.claims,
    });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, &'static str> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or("Not authenticated")?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header")?;

    let (scheme, token) = auth_str
        .split_once(' ')
        .ok_or("Invalid Authorization header format. Expected: Bearer <token>")?;

    if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
        return Err("Invalid Authorization header format. Expected: Bearer <token>");
    }

    Ok(token.trim())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;

    use super::*;

    fn request_with(header: Option<&str>) -> Request {
        let mut builder = http::Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(http::header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_extract_token() {
        assert_eq!(
            extract_token_from_header(&request_with(Some("Bearer abc.def.ghi"))),
            Ok("abc.def.ghi")
        );
        assert_eq!(
            extract_token_from_header(&request_with(Some("bearer abc.def.ghi"))),
            Ok("abc.def.ghi")
        );
    }

    #[test]
    fn test_extract_token_rejections() {
        assert!(extract_token_from_header(&request_with(None)).is_err());
        assert!(extract_token_from_header(&request_with(Some("Basic dXNlcjpwdw=="))).is_err());
        assert!(extract_token_from_header(&request_with(Some("Bearer "))).is_err());
        assert!(extract_token_from_header(&request_with(Some("Bearer"))).is_err());
    }
}
