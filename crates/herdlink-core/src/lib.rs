//! Core herdlink library (session state, authenticated API client,
//! typed endpoint wrappers, config).

pub mod api;
pub mod config;
pub mod ops;
pub mod session;
