//! Bearer token authentication

mod jwt;

pub use jwt::{JwtClaims, JwtConfig, JwtGenerator, JwtService, TOKEN_ISSUER};
