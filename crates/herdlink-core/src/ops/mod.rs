//! Typed wrappers over the backend's resource endpoints.
//!
//! Each module is thin by design: build a request, hand it to the
//! client, decode the payload. All recovery behavior lives in the
//! client.

pub mod feeding;
pub mod health;
pub mod herd;
pub mod milk;
pub mod notify;
pub mod tasks;
