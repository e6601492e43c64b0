/*
 * Responsibility
 * - institutions の読み出し/更新
 * - 今はシード済み in-memory store (この slice に永続化は含めない)
 * - エラーは RepoError/AppError に変換しやすい形で返す
 */
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Debug, Clone)]
pub struct Institution {
    pub id: Uuid,
    pub name: String,
    pub country: String,
    pub connected_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct InstitutionRepo {
    inner: RwLock<Vec<Institution>>,
}

impl InstitutionRepo {
    pub fn new(rows: Vec<Institution>) -> Self {
        Self {
            inner: RwLock::new(rows),
        }
    }

    /// 開発/デモ用のシードデータ
    pub fn seeded() -> Self {
        let rows = ["First Meridian Bank|US", "Hanseatic Sparbank|DE", "Credit Lyra|FR"]
            .iter()
            .map(|&entry| {
                let (name, country) = entry.split_once('|').unwrap_or((entry, "US"));
                Institution {
                    id: Uuid::new_v4(),
                    name: name.to_string(),
                    country: country.to_string(),
                    connected_at: Utc::now(),
                }
            })
            .collect();

        Self::new(rows)
    }

    pub fn list(&self) -> Result<Vec<Institution>, RepoError> {
        let rows = self
            .inner
            .read()
            .map_err(|_| RepoError::Store("institutions lock poisoned"))?;

        Ok(rows.clone())
    }

    pub fn get(&self, id: Uuid) -> Result<Option<Institution>, RepoError> {
        let rows = self
            .inner
            .read()
            .map_err(|_| RepoError::Store("institutions lock poisoned"))?;

        Ok(rows.iter().find(|i| i.id == id).cloned())
    }

    pub fn rename(&self, id: Uuid, name: &str) -> Result<Option<Institution>, RepoError> {
        let mut rows = self
            .inner
            .write()
            .map_err(|_| RepoError::Store("institutions lock poisoned"))?;

        let row = rows.iter_mut().find(|i| i.id == id);
        Ok(row.map(|i| {
            i.name = name.to_string();
            i.clone()
        }))
    }

    pub fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        let mut rows = self
            .inner
            .write()
            .map_err(|_| RepoError::Store("institutions lock poisoned"))?;

        let before = rows.len();
        rows.retain(|i| i.id != id);
        Ok(rows.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rename_and_delete_round_trip() {
        let repo = InstitutionRepo::seeded();
        let first = repo.list().expect("list")[0].clone();

        let renamed = repo
            .rename(first.id, "Renamed Bank")
            .expect("rename")
            .expect("row exists");
        assert_eq!(renamed.name, "Renamed Bank");

        assert!(repo.delete(first.id).expect("delete"));
        assert!(!repo.delete(first.id).expect("second delete is a no-op"));
        assert!(repo.get(first.id).expect("get").is_none());
    }
}
