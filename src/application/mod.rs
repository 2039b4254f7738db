//! Application layer containing use cases and DTOs.

pub mod dto;
pub mod use_cases;

pub use dto::{Password, SignInRequest, SignInResponse, SignUpRequest, SignUpResponse};
pub use use_cases::{SignInUseCase, SignUpUseCase};
