//! Staff authentication
//!
//! - [`JwtService`] - token issue / validation
//! - [`CurrentUser`] - acting staff member
//! - [`require_staff`] / [`require_admin`] - route-group middleware

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_staff};
pub use password::{hash_password, verify_password};
