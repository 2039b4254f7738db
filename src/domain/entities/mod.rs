//! Domain entity definitions.

mod account;
mod cache_key;
mod image;

pub use account::{Account, UserProfile};
pub use cache_key::CacheKey;
pub use image::{ImageSource, ImageStatus, LoadedImage};
