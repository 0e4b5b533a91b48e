//! Authentication: password hashing, session tokens and the bearer guard.

pub mod error;
pub mod middleware;
pub mod models;
pub mod password;
pub mod token;

pub use error::AuthError;
pub use middleware::auth_middleware;
pub use models::AuthUser;
pub use token::{Claims, TokenService};
