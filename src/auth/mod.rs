//! Authentication boundary: JWT tokens, password hashing and the
//! `CurrentUser` extractor. Deliberately thin - token issuance and role
//! gating, nothing more.

pub mod extractor;
pub mod jwt;
pub mod password;

pub use extractor::CurrentUser;
pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use password::{hash_password, verify_password};
