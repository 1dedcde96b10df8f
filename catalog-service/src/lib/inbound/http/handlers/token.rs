use auth::ScopeSet;
use axum::extract::State;
use axum::Form;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use crate::inbound::http::router::AppState;

/// OAuth2 password grant: exchange a username and password for a bearer token.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<TokenRequestForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    let scopes = ScopeSet::from_space_delimited(&form.scope);

    let access = state
        .authenticator
        .login(&form.username, &form.password, scopes)
        .await?;

    Ok(Json(TokenResponse {
        access_token: access.access_token,
        token_type: access.token_type,
    }))
}

/// `application/x-www-form-urlencoded` login body
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenRequestForm {
    username: String,
    password: String,
    /// Space-delimited requested scopes
    #[serde(default)]
    scope: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}
