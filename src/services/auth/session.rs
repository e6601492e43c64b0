//! Bearer-token authentication service.
//!
//! One entry point, `AuthService::authenticate`, implementing the
//! per-request contract:
//! - public path (suffix match) => `None`, no credential is attached at all
//! - verified claims            => derived permissions + identity
//! - anything else              => anonymous fallback, never an error
//!
//! Verification failures are logged here and stop here. Handlers decide
//! what an anonymous session is allowed to do; this layer never rejects
//! a request by itself.

use std::sync::Arc;

use axum::http::{HeaderMap, header};

use crate::services::auth::claims::{AuthUser, Identity, Permissions};
use crate::services::auth::public_paths::PublicPaths;
use crate::services::auth::verifier::{ClaimMap, TokenVerifier, VerifyError};

/// What the middleware stores in request extensions: the permission list
/// and the principal, always consistent as a pair.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub permissions: Permissions,
    pub user: AuthUser,
}

impl AuthSession {
    pub fn from_claims(claims: &ClaimMap) -> Self {
        Self {
            permissions: Permissions::from_claims(claims),
            user: AuthUser::Authenticated(Identity::from_claims(claims)),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            permissions: Permissions::unauthenticated(),
            user: AuthUser::Anonymous,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_authenticated()
    }

    pub fn has_permission(&self, scope: &str) -> bool {
        self.permissions.contains(scope)
    }
}

pub struct AuthService {
    verifier: Arc<dyn TokenVerifier>,
    public_paths: PublicPaths,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("public_paths", &self.public_paths)
            .finish()
    }
}

impl AuthService {
    pub fn new(verifier: Arc<dyn TokenVerifier>, public_paths: PublicPaths) -> Self {
        Self {
            verifier,
            public_paths,
        }
    }

    /// Authenticate one request.
    ///
    /// `None` means "no authentication performed" (public path); the caller
    /// must not attach any session. `Some` always carries a complete pair.
    pub async fn authenticate(&self, headers: &HeaderMap, path: &str) -> Option<AuthSession> {
        if self.public_paths.matches(path) {
            return None;
        }

        let session = match self.resolve_claims(headers).await {
            Ok(claims) => AuthSession::from_claims(&claims),
            Err(err) => {
                tracing::error!(
                    error = ?err,
                    path = %path,
                    "failed to resolve bearer token claims"
                );
                AuthSession::anonymous()
            }
        };

        Some(session)
    }

    async fn resolve_claims(&self, headers: &HeaderMap) -> Result<ClaimMap, VerifyError> {
        let auth = headers
            .get(header::AUTHORIZATION)
            .ok_or(VerifyError::MissingCredential)?
            .to_str()
            .map_err(|_| VerifyError::MalformedHeader)?;

        let token = auth
            .strip_prefix("Bearer ")
            .ok_or(VerifyError::MalformedHeader)?;

        self.verifier.resolve(token).await
    }
}
