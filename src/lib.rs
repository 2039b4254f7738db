//! Artvault - a two-tier image cache and async loader.
//!
//! This crate provides a memory + disk cache in front of an HTTP
//! fetch, orchestrated by an async loader and assembled by a factory,
//! plus the thin auth/database boundary the surrounding application
//! consumes.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;

/// Current version of the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "artvault";
