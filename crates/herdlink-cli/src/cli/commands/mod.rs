//! Command handlers.

pub mod auth;
pub mod config;
pub mod cows;
pub mod tasks;

use anyhow::Result;
use herdlink_core::api::ApiResult;
use herdlink_core::session::session_cache;

/// Lifts a client result into the CLI, persisting the forced logout when
/// the session has expired (the in-memory store is already clean at that
/// point).
pub fn surface<T>(result: ApiResult<T>) -> Result<T> {
    match result {
        Err(err) if err.is_session_expired() => {
            let _ = session_cache::clear();
            Err(err.into())
        }
        other => other.map_err(Into::into),
    }
}
