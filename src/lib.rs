//! WHATWG-style MIME media type parsing with a blob locator registry.
//!
//! This crate provides:
//! - Media type parsing: a total, single-pass scanner over raw bytes
//!   producing a [`MediaType`] whose [`Validity`] field carries all failure
//!   reporting (parsing never errors and never panics)
//! - Canonical serialization of parsed media types via `Display`
//! - A [`BlobRegistry`]: an in-memory store handing out collision-free
//!   `blob:<uuid>` locators for `(media type, body)` pairs
//!
//! The parser is pure and synchronous; it is safe to call from any number
//! of threads without synchronization.

pub mod error;
pub mod grammar;
pub mod media_type;
pub mod params;
pub mod registry;

// Re-export commonly used types
pub use error::{Error, Result};
pub use media_type::{DuplicateParams, MediaType, ParseOptions, Validity};
pub use params::MimeParams;
pub use registry::BlobRegistry;
