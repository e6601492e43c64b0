//! Token verification seam used by the bearer middleware.
//!
//! The mapper only needs one operation: turn a raw bearer token into a
//! verified claim map, or fail. Keeping this behind a trait means the
//! session logic can be tested with a stub verifier and the JWT backend
//! can be swapped (e.g. for an introspection-endpoint client) without
//! touching callers.

use async_trait::async_trait;
use thiserror::Error;

/// Verified claims as returned by the identity provider.
///
/// Kept as a raw JSON object on purpose: the permission mapping reads
/// provider-specific nested structures (`resource_access`), and a typed
/// struct would silently drop them.
pub type ClaimMap = serde_json::Map<String, serde_json::Value>;

/// All verification failures collapse to this taxonomy; callers treat
/// every variant the same (anonymous fallback), the variants exist for
/// diagnostics only.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("missing bearer credential")]
    MissingCredential,

    #[error("malformed authorization header")]
    MalformedHeader,

    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("token claims are not a JSON object")]
    MalformedClaims,
}

/// Resolve a bearer token into verified claims.
///
/// Implementations may perform I/O (key fetch, introspection); the caller
/// imposes no retry policy, a single failure is final for the request.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn resolve(&self, token: &str) -> Result<ClaimMap, VerifyError>;
}
