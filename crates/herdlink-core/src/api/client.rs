//! Authenticated API client with single-shot refresh-and-retry.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::error::{ApiError, ApiResult};
use super::types::{ApiRequest, Envelope, Method};
use crate::config::Config;
use crate::session::SessionStore;

/// Path of the token-exchange endpoint, relative to the base address.
const REFRESH_PATH: &str = "/auth/refresh";

/// Shape of the refresh-exchange payload (`data` field of the envelope).
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshedTokens {
    access_token: String,
}

/// Client for the farm-management backend.
///
/// Attaches the session's bearer token to every call, unwraps the
/// response envelope, and recovers from access-token expiry exactly once
/// per logical request. On unrecoverable expiry it resets the injected
/// [`SessionStore`] and surfaces [`ApiError::session_expired`], which the
/// UI boundary turns into its login redirect.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    store: SessionStore,
    /// Serializes refresh exchanges so concurrent expiries coalesce into
    /// one token rotation.
    refresh_gate: tokio::sync::Mutex<()>,
}

impl ApiClient {
    /// Creates a client against the given base address.
    ///
    /// # Panics
    /// - In test builds (`#[cfg(test)]`), panics if `base_url` is the production API.
    /// - At runtime, panics if `HERDLINK_BLOCK_REAL_API=1` and `base_url` is the
    ///   production API.
    ///
    /// This prevents tests from accidentally making real network requests.
    /// Point `HERDLINK_BASE_URL` at a mock server instead.
    pub fn new(base_url: impl Into<String>, store: SessionStore) -> Self {
        Self::with_http(base_url, store, reqwest::Client::new())
    }

    /// Creates a client from loaded configuration, honoring the configured
    /// request timeout.
    pub fn from_config(config: &Config, store: SessionStore) -> anyhow::Result<Self> {
        let base_url = config.resolve_base_url()?;
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self::with_http(base_url, store, http))
    }

    fn with_http(base_url: impl Into<String>, store: SessionStore, http: reqwest::Client) -> Self {
        let base_url = base_url.into();

        // Compile-time guard for unit tests
        #[cfg(test)]
        assert!(
            base_url != Config::DEFAULT_BASE_URL,
            "Tests must not use the production herdlink API!\n\
             Point the client at a mock server (e.g., wiremock).\n\
             Found base_url: {base_url}",
        );

        // Runtime guard for integration tests (set HERDLINK_BLOCK_REAL_API=1 in test harness)
        #[cfg(not(test))]
        if std::env::var("HERDLINK_BLOCK_REAL_API").is_ok_and(|v| v == "1")
            && base_url == Config::DEFAULT_BASE_URL
        {
            panic!(
                "HERDLINK_BLOCK_REAL_API=1 but trying to use the production herdlink API!\n\
                 Point the client at a mock server.\n\
                 Found base_url: {base_url}",
            );
        }

        Self {
            base_url,
            http,
            store,
            refresh_gate: tokio::sync::Mutex::new(()),
        }
    }

    /// Returns the session store this client mutates.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Sends a request and returns the unwrapped JSON payload.
    ///
    /// The first 401 on a logical request triggers one refresh exchange
    /// and one resend; any further 401 is surfaced as an ordinary HTTP
    /// error. Non-401 failures are propagated unchanged.
    pub async fn send(&self, request: &ApiRequest) -> ApiResult<Value> {
        let (status, body) = self.send_raw(request).await?;
        decode_envelope(&body)?.into_payload(status)
    }

    /// Sends a request and decodes the payload into `T`.
    pub async fn send_as<T: DeserializeOwned>(&self, request: &ApiRequest) -> ApiResult<T> {
        let payload = self.send(request).await?;
        serde_json::from_value(payload)
            .map_err(|e| ApiError::decode(format!("unexpected payload shape: {e}")))
    }

    /// Sends a request whose envelope carries no payload (e.g. deletes).
    pub async fn send_unit(&self, request: &ApiRequest) -> ApiResult<()> {
        let (status, body) = self.send_raw(request).await?;
        let envelope = decode_envelope::<Value>(&body)?;
        if envelope.code != 0 {
            return envelope.into_payload(status).map(|_| ());
        }
        Ok(())
    }

    /// Request phase plus the retry-once state machine.
    ///
    /// Returns the final `(status, body)` of a 2xx response; every other
    /// outcome is an error.
    async fn send_raw(&self, request: &ApiRequest) -> ApiResult<(u16, String)> {
        let mut attempt: u8 = 0;
        loop {
            let token = self.store.access_token();
            let (status, body) = self.dispatch(request, &token).await?;

            if status == 401 && attempt == 0 {
                attempt += 1;
                self.recover_unauthorized(&token).await?;
                continue;
            }

            if !(200..300).contains(&status) {
                return Err(ApiError::http_status(status, &body));
            }

            return Ok((status, body));
        }
    }

    /// Performs one HTTP round-trip. Attaches the bearer header iff the
    /// token is non-empty; the token value is whatever was current at
    /// send time.
    async fn dispatch(&self, request: &ApiRequest, token: &str) -> ApiResult<(u16, String)> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
            Method::Put => self.http.put(&url),
            Method::Delete => self.http.delete(&url),
        };

        if !token.is_empty() {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Ok((status, body))
    }

    /// Refresh path for a 401 observed with `stale_token`.
    ///
    /// Exchanges the stored refresh token for a new access token and
    /// rotates the store. Concurrent callers wait on the gate; a waiter
    /// that finds the token already rotated skips its own exchange. Any
    /// refresh failure resets the store and yields the session-expired
    /// signal.
    async fn recover_unauthorized(&self, stale_token: &str) -> ApiResult<()> {
        let _gate = self.refresh_gate.lock().await;

        // Another in-flight request may have rotated the token while we
        // waited on the gate.
        let current = self.store.access_token();
        if !current.is_empty() && current != stale_token {
            return Ok(());
        }

        let refresh_token = self.store.refresh_token();
        if refresh_token.is_empty() {
            warn!("401 with no refresh token; clearing session");
            self.store.logout();
            return Err(ApiError::session_expired());
        }

        debug!("access token rejected; attempting refresh exchange");
        match self.exchange_refresh_token(&refresh_token).await {
            Ok(access_token) => {
                self.store.set_access_token(access_token);
                debug!("access token rotated");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "refresh exchange failed; clearing session");
                self.store.logout();
                Err(ApiError::session_expired())
            }
        }
    }

    /// The dedicated token exchange. Never carries an `Authorization`
    /// header, so an expired access token cannot recurse into another
    /// refresh.
    async fn exchange_refresh_token(&self, refresh_token: &str) -> ApiResult<String> {
        let url = format!("{}{}", self.base_url, REFRESH_PATH);
        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "refreshToken": refresh_token }))
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        if !(200..300).contains(&status) {
            return Err(ApiError::http_status(status, &body));
        }

        let tokens: RefreshedTokens = decode_envelope(&body)?.into_payload(status)?;
        if tokens.access_token.is_empty() {
            return Err(ApiError::decode("refresh exchange returned an empty access token"));
        }
        Ok(tokens.access_token)
    }
}

fn decode_envelope<T: DeserializeOwned>(body: &str) -> ApiResult<Envelope<T>> {
    serde_json::from_str(body)
        .map_err(|e| ApiError::decode(format!("unexpected response body: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "production herdlink API")]
    fn test_constructor_rejects_production_base_url() {
        let _ = ApiClient::new(Config::DEFAULT_BASE_URL, SessionStore::new());
    }

    #[test]
    fn test_mock_base_url_is_accepted() {
        let client = ApiClient::new("http://127.0.0.1:9", SessionStore::new());
        assert_eq!(client.store().access_token(), "");
    }
}
