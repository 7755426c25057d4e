//! Authentication infrastructure
//!
//! JWT signing and validation of the admin identity carried in the request cookie.

mod jwt;

#[cfg(test)]
pub use jwt::MockTokenValidator;
pub use jwt::{JwtClaims, JwtConfig, JwtService, TokenValidator};
