//! Domain error definitions.

mod auth_error;
mod cache_error;

pub use auth_error::AuthError;
pub use cache_error::{CacheError, CacheResult};
