//! Toolbelt - General-Purpose Utility Library
//!
//! A collection of small, independent helpers written in Rust.
//!
//! ## Features
//!
//! - Proxy pool rotation with optional reuse and randomized order
//! - Canonical JSON encoding with deterministic coercion rules,
//!   JSON-Lines streaming, and canonical SHA-256 hashing
//! - Data-wrangling helpers (chunking, file line counting, nested/renamed
//!   JSON keys)
//! - CLI argument validators
//! - Cloud glue: object URI parsing, query state mapping, and an explicit
//!   region-keyed client cache

pub mod args;
pub mod cloud;
pub mod codec;
pub mod error;
pub mod general;
pub mod proxy;
pub mod value;

pub use error::{Result, ToolbeltError};
pub use proxy::ProxyManager;
pub use value::Value;
