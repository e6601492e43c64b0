/*
 * Responsibility
 * - GET /me の response DTO
 */
use serde::Serialize;

use crate::services::auth::claims::Permissions;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub authenticated: bool,
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub subject_id: Option<String>,
    pub permissions: Permissions,
}
