//! Application use cases.

mod sign_in_use_case;
mod sign_up_use_case;
pub mod validation;

pub use sign_in_use_case::SignInUseCase;
pub use sign_up_use_case::SignUpUseCase;
