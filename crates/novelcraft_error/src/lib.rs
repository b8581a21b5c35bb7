//! Error types for the Novelcraft library.
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use novelcraft_error::{HttpError, NovelcraftResult};
//!
//! fn fetch_completion() -> NovelcraftResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! assert!(fetch_completion().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod http;
mod io;
mod json;
mod models;
mod narrative;

pub use config::ConfigError;
pub use error::{NovelcraftError, NovelcraftErrorKind, NovelcraftResult};
pub use http::HttpError;
pub use io::IoError;
pub use json::JsonError;
pub use models::{ModelsError, ModelsErrorKind, ModelsResult};
pub use narrative::{NarrativeError, NarrativeErrorKind};
