/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - auth: AuthService (token verifier + 公開パス設定)
 *   - institutions: InstitutionRepo
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::repos::institution_repo::InstitutionRepo;
use crate::services::auth::AuthService;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub institutions: Arc<InstitutionRepo>,
}

impl AppState {
    pub fn new(auth: Arc<AuthService>, institutions: Arc<InstitutionRepo>) -> Self {
        Self { auth, institutions }
    }
}
