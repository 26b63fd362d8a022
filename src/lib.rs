//! # SSO Agent Library
//!
//! Issues signed single-sign-on tokens for a BI platform:
//! resolves who the caller is, signs a JWT carrying their identity
//! claims, and returns it as JSON or by redirecting with `?jwt=<token>`.
//!
//! Modules:
//! - `config` — service configuration, loading and validation
//! - `resolver` — static credential, delegated auth and trusted parameter strategies
//! - `issuer` — claims construction, signing and verification
//! - `dispatcher` — JSON and redirect responses
//! - `service` — one login request end to end
//! - `server` — HTTP routes

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod helpers;
pub mod issuer;
pub mod observability;
pub mod resolver;
pub mod server;
pub mod service;
pub mod utils;

#[cfg(test)]
mod tests;

pub use crate::config::types::ServiceConfig;
pub use crate::error::{SsoError, VerifyError};
