pub mod jwt;
pub mod middleware;
pub mod models;

pub use jwt::{issue_token, validate_token};
pub use middleware::auth_middleware;
pub use models::{JwtClaims, UserContext};
