use std::collections::HashMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::{header::AUTHORIZATION, HeaderMap};
use axum::Json;
use serde_json::{json, Value};
use tracing::debug;

use crate::dispatcher::Dispatch;
use crate::error::SsoError;
use crate::resolver::RequestParams;
use crate::server::server::AppState;

/// `GET <login_path>?...`
pub async fn login_query(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Dispatch, SsoError> {
    state.sso.login(&RequestParams::from_query(query)).await
}

/// `POST <login_path>` with a JSON object body.
pub async fn login_json(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Dispatch, SsoError> {
    let Json(body) = body.map_err(|e| {
        debug!("login body rejected: {}", e);
        SsoError::InvalidParameter("request body must be a JSON object".to_owned())
    })?;
    state.sso.login(&RequestParams::from_json(&body)).await
}

/// Checks `Authorization: Bearer <token>` against the configured secret.
pub async fn protected(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, SsoError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(SsoError::Unauthorized("No token provided"))?;

    let claims = state.sso.issuer().verify(token).map_err(|e| {
        debug!("bearer token rejected: {}", e);
        SsoError::Unauthorized("Invalid token")
    })?;

    Ok(Json(json!({ "message": format!("Welcome, {}!", claims.sub) })))
}

/// Tokens are not tracked server side; the client drops its copy.
pub async fn logout() -> Json<Value> {
    Json(json!({ "message": "Logged out successfully" }))
}
