//! shelf-rs: a minimal personal e-book library server.
//!
//! Serves a directory of book files over HTTP, keeps per-file reading
//! progress in a flat JSON store and accepts uploads of EPUB, MOBI, AZW3,
//! FB2 and CBZ files.
//!
//! # API
//!
//! - `GET /api/list`: every library file with its progress
//! - `GET /api/progress?file=...`: progress of one file
//! - `POST /api/progress`: save `{file, progress}`
//! - `POST /api/upload`: multipart upload into the library root
//! - any other `GET`: static file from the library root

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Configuration and CLI.
pub mod config;
/// Error types.
pub mod error;
/// Library directory and listing.
pub mod library;
/// Reading progress store.
pub mod progress;
/// HTTP server.
pub mod server;
/// Upload validation.
pub mod upload;


pub use config::{Cli, Command, Config};
pub use error::{AppError, Result};
pub use progress::ProgressStore;
pub use server::AppState;
