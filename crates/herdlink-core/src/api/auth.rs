//! Login exchange against the backend's auth endpoints.
//!
//! The refresh exchange itself lives inside the client (it is part of
//! the recovery path); this module covers the explicit login flow that
//! populates the session store.

use serde::Deserialize;

use herdlink_types::{Credentials, Identity};

use super::client::ApiClient;
use super::error::{ApiError, ApiResult};
use super::types::ApiRequest;
use crate::session::Session;

/// `data` field of a successful login envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginPayload {
    access_token: String,
    refresh_token: String,
    user_id: i64,
    full_name: String,
    role_name: String,
}

/// Exchanges credentials for a session and writes it into the client's
/// store. Returns the resulting session for the caller to persist or
/// display.
pub async fn login(client: &ApiClient, username: &str, password: &str) -> ApiResult<Session> {
    let credentials = Credentials {
        username: username.to_string(),
        password: password.to_string(),
    };
    let body = serde_json::to_value(&credentials)
        .map_err(|e| ApiError::decode(format!("serialize credentials: {e}")))?;
    let request = ApiRequest::post("/auth/login").with_body(body);

    let payload: LoginPayload = client.send_as(&request).await?;
    let session = Session::authenticated(
        payload.access_token,
        payload.refresh_token,
        Identity {
            user_id: payload.user_id,
            full_name: payload.full_name,
            role_name: payload.role_name,
        },
    );
    client.store().login(session.clone());
    Ok(session)
}
