//! Authenticated API client for the farm-management backend.

pub mod auth;
mod client;
mod error;
mod types;

pub use client::ApiClient;
pub use error::{ApiError, ApiErrorKind, ApiResult};
pub use types::{ApiRequest, Envelope, Method};
