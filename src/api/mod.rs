//! Portal gateway client module
//!
//! The auth pages submit through the [`AuthApi`] seam. Production code uses
//! [`HttpAuthApi`]; tests substitute `MockAuthApi`.

mod client;
mod error;
mod traits;

pub use client::{HttpAuthApi, DEFAULT_API_BASE_URL};
pub use error::ApiError;
pub use traits::{AuthApi, SignInTokens};

#[cfg(test)]
pub use traits::MockAuthApi;
