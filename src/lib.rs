//! seorank: search-engine rank checking service.
//!
//! Wraps the `seorank-search` core in an HTTP service:
//!
//! - **Config**: TOML file with server, search and engine-table sections
//! - **Server**: axum router exposing the rank check and engine list
//! - **Host binary**: `seorank-host` wires config, logging and the server
//!
//! One [`RankChecker`](seorank_search::RankChecker), and with it one result
//! cache, is created at startup and shared by every request.

pub mod config;
pub mod error;
pub mod server;

pub use config::{AppConfig, ServerConfig};
pub use error::{AppError, Result};
pub use server::RankServer;
