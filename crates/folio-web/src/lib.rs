//! folio-web — development admin server for a static site.
//!
//! Serves the built site publicly and puts the admin namespace behind a
//! per-client rate limiter and HTTP Basic authentication from `folio-core`.

pub mod api;
pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod server;
pub mod state;
pub mod static_files;
