//! Institution resource API guarded by an OIDC identity provider.
//!
//! Incoming requests to `/api/v1/*` pass through a bearer-token
//! authentication layer that resolves provider claims into a
//! request-scoped session (identity + permission list). Handlers only
//! consume the session; they never touch tokens.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
