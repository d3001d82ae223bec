//! Credential hashing and identity token adapters.

mod bcrypt_hasher;
mod jwt_token_issuer;

pub use bcrypt_hasher::BcryptHasher;
pub use jwt_token_issuer::{DEFAULT_TOKEN_TTL_SECONDS, JwtTokenIssuer, TokenSettings};
