/*
 * Responsibility
 * - Institutions の request/response DTO
 * - validation (形式チェック) 用の validate() を持たせる
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct InstitutionResponse {
    pub id: Uuid,
    pub name: String,
    pub country: String,
    pub connected_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateInstitutionRequest {
    pub name: String,
}

impl UpdateInstitutionRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("name is required");
        }
        if self.name.len() > 120 {
            return Err("name must be <= 120 chars");
        }

        Ok(())
    }
}
