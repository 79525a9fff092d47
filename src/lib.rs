//! waf-fixture - a reference HTTP application for validating a web application firewall.
//!
//! The fixture exposes a catalogue of endpoints under `/api/waftest`. Each one either
//! simulates an attack class (SQL injection, XSS, path traversal, command injection,
//! malicious JSON payloads, oversized requests) or accepts legitimate business data that
//! merely resembles an attack (names like "Mr. Test", brands like "LAND ROVER", comments
//! containing `---`). Pointing a WAF at the fixture shows whether it blocks the former and
//! lets the latter through.
//!
//! # Features
//! - Hard-block endpoints that reject matching input with `400` as a fallback when no WAF
//!   is in front
//! - Soft-annotate business endpoints that always succeed and report suspicious patterns
//! - Informational bot and protocol endpoints that describe the request they received
//! - A uniform JSON response envelope with an `outcome` discriminator
//! - Static landing page, health check, permissive CORS and per-request ids
//! - Layered configuration (file plus `WAF_FIXTURE__*` environment overrides)
//! - Structured tracing via `tracing` and graceful shutdown on SIGINT / SIGTERM
//!
//! # Quick Example
//! ```no_run
//! use std::sync::Arc;
//!
//! use waf_fixture::{FileSystemAdapter, HttpHandler, config::ServerConfig};
//!
//! # #[tokio::main] async fn main() -> eyre::Result<()> {
//! let cfg: ServerConfig = waf_fixture::config::loader::load_config("config.toml").await?;
//! let router = HttpHandler::new(Arc::new(cfg), Arc::new(FileSystemAdapter::new())).router();
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! axum::serve(listener, router).await?;
//! # Ok(()) }
//! ```
//!
//! # Architecture
//! The crate separates **ports** (traits) from **adapters** (implementations) while keeping
//! the classification rules and endpoint semantics inside `core`. `core` never touches the
//! network: the dispatcher turns plain inputs into a status code and an envelope, and the
//! HTTP adapter only extracts inputs and serializes results.
//!
//! # Error Handling
//! Process-level APIs return `eyre::Result<T>`; request handling uses the domain error types
//! in [`ports`]. Malformed client input is never an error: it degrades to empty values.
// Re-export public modules with explicit visibility controls
pub mod config;
pub mod ports;
pub mod tracing_setup;
pub mod utils;

// These modules are implementation details and should not be directly used by users
pub mod adapters;
pub mod core;

// Re-export the specific types needed by the binary crate
pub use crate::{
    adapters::{AppState, FileSystemAdapter, HttpHandler},
    core::{AttackCategory, Dispatched, Outcome, ResponseEnvelope, Verdict},
    utils::{GracefulShutdown, ShutdownReason},
};
