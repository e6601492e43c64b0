//! Local JWT verification backend (RS256).
//!
//! Verifies provider-issued access tokens against a statically configured
//! realm public key. Signature, `exp`, `iss` and `aud` checks are done by
//! `jsonwebtoken::Validation`; the decoded payload is handed back as the
//! raw claim map so the session layer can read the provider-specific
//! nested role structures.
//!
//! Key rotation via JWKS is out of scope here; the key is plain config.

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use tracing::warn;

use crate::error::AppError;
use crate::services::auth::verifier::{ClaimMap, TokenVerifier, VerifyError};

pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("JwtVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtVerifier {
    /// `public_key_pem` must be an RSA public key in PEM format
    /// (the realm signing key exported from the identity provider).
    pub fn new(
        public_key_pem: &str,
        issuer: &str,
        audience: &str,
        leeway_seconds: u64,
    ) -> Result<Self, AppError> {
        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes()).map_err(|e| {
            warn!(error = %e, "failed to parse access JWT public key PEM (expected RSA PEM)");
            AppError::Internal
        })?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.leeway = leeway_seconds;

        Ok(Self {
            decoding_key,
            validation,
        })
    }
}

#[async_trait]
impl TokenVerifier for JwtVerifier {
    async fn resolve(&self, token: &str) -> Result<ClaimMap, VerifyError> {
        let data =
            jsonwebtoken::decode::<serde_json::Value>(token, &self.decoding_key, &self.validation)?;

        // Fail closed: a token whose payload is not an object grants nothing.
        data.claims
            .as_object()
            .cloned()
            .ok_or(VerifyError::MalformedClaims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_public_key_pem_at_construction() {
        let result = JwtVerifier::new("not a pem", "https://idp.example.com/realms/x", "api", 60);
        assert!(result.is_err());
    }
}
