//! Bypass configuration: paths served without authentication.
//!
//! Matching is by path suffix, the way the upstream listing endpoint has
//! always been exposed; the set comes from `Config`, not from a literal
//! in the middleware.

#[derive(Debug, Clone)]
pub struct PublicPaths {
    suffixes: Vec<String>,
}

impl PublicPaths {
    pub fn new(suffixes: Vec<String>) -> Self {
        Self {
            suffixes: suffixes.into_iter().filter(|s| !s.is_empty()).collect(),
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        self.suffixes.iter().any(|suffix| path.ends_with(suffix))
    }
}
