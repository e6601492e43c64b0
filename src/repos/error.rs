/**
 * Responsibility
 * - repo が上位に伝える意味の定義
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    // In-memory store の lock poisoning 等。上位では 500 扱い。
    #[error("store error: {0}")]
    Store(&'static str),
}
