//! Claim-to-identity mapping - core logic.
//!
//! This module is intentionally "core-only": it does not know about Axum,
//! tokens, or the verifier. It takes an already-verified claim map and
//! derives the request identity and its permission list. Everything here
//! is total: malformed claim shapes degrade to "absent" / "empty",
//! never to an error.

use serde::Serialize;
use serde_json::Value;

use crate::services::auth::verifier::ClaimMap;

/// Marker permission appended for every caller with verified claims.
pub const AUTHENTICATED: &str = "authenticated";

/// Sentinel permission carried by anonymous sessions. Downstream checks
/// treat it as "no scopes granted".
pub const UNAUTHENTICATED: &str = "unauthenticated";

/// Identity attributes looked up from the fixed OIDC claim keys
/// (`name`, `preferred_username`, `email`, `sub`). Missing keys stay `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub subject_id: Option<String>,
}

impl Identity {
    pub fn from_claims(claims: &ClaimMap) -> Self {
        Self {
            name: claim_string(claims, "name"),
            username: claim_string(claims, "preferred_username"),
            email: claim_string(claims, "email"),
            subject_id: claim_string(claims, "sub"),
        }
    }
}

/// The request principal: either an identity derived from verified claims,
/// or the anonymous fallback.
///
/// Two-case sum type on purpose; both cases answer `is_authenticated()`,
/// and `Authenticated` is only ever constructed from a verified claim map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthUser {
    Authenticated(Identity),
    Anonymous,
}

impl AuthUser {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Anonymous => None,
        }
    }
}

/// Ordered permission list attached to a request.
///
/// Order is part of the contract consumed by downstream checks:
/// realm-management roles, then account roles, then the fixed
/// `authenticated` marker last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Permissions(Vec<String>);

impl Permissions {
    pub fn from_claims(claims: &ClaimMap) -> Self {
        let mut scopes = extract_nested(claims, &["resource_access", "realm-management", "roles"]);
        scopes.extend(extract_nested(claims, &["resource_access", "account", "roles"]));
        scopes.push(AUTHENTICATED.to_owned());
        Self(scopes)
    }

    pub fn unauthenticated() -> Self {
        Self(vec![UNAUTHENTICATED.to_owned()])
    }

    pub fn contains(&self, scope: &str) -> bool {
        self.0.iter().any(|s| s == scope)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// Walk `claims` one key at a time and collect the string entries of the
/// array found at the end of the path.
///
/// Any missing key, non-object intermediate, non-array leaf, or
/// non-string element yields an empty result instead of an error.
pub fn extract_nested(claims: &ClaimMap, path: &[&str]) -> Vec<String> {
    let Some((first, rest)) = path.split_first() else {
        return Vec::new();
    };

    let mut current: &Value = match claims.get(*first) {
        Some(v) => v,
        None => return Vec::new(),
    };

    for key in rest {
        current = match current.as_object().and_then(|m| m.get(*key)) {
            Some(v) => v,
            None => return Vec::new(),
        };
    }

    match current.as_array() {
        Some(entries) => entries
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect(),
        None => Vec::new(),
    }
}

fn claim_string(claims: &ClaimMap, key: &str) -> Option<String> {
    claims.get(key).and_then(Value::as_str).map(str::to_owned)
}
