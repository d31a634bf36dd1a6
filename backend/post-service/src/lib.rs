/// Post Service Library
///
/// Handles posts, opinions, and opinion votes for the Parley platform.
/// Users create posts, attach short opinions to other users' posts, and
/// vote on opinions; each post surfaces its most-voted opinion together
/// with opinion and impression counts.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `models`: Data structures for posts, opinions, votes
/// - `services`: Business logic layer
/// - `db`: Database access layer and repositories
/// - `middleware`: Bearer-token authentication plumbing
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
