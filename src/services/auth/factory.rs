/// Factory: build `AuthService` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::error::AppError;
use crate::services::auth::AuthService;
use crate::services::auth::jwt::JwtVerifier;
use crate::services::auth::public_paths::PublicPaths;

pub fn build_auth_service(config: &Config) -> Result<Arc<AuthService>, AppError> {
    let verifier = JwtVerifier::new(
        &config.access_jwt_public_key_pem,
        &config.auth_issuer,
        &config.auth_audience,
        config.access_token_leeway_seconds,
    )?;

    let public_paths = PublicPaths::new(config.auth_public_path_suffixes.clone());

    Ok(Arc::new(AuthService::new(Arc::new(verifier), public_paths)))
}
