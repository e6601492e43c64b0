pub mod claims;
pub mod factory;
pub mod jwt;
pub mod public_paths;
pub mod session;
pub mod verifier;

pub use factory::build_auth_service;
pub use session::{AuthService, AuthSession};
