/*
 * Responsibility
 * - /institutions 系 handler
 * - 一覧は公開（認証 bypass パス）。個別取得は要認証、更新/削除は
 *   realm-management の manage-institutions role が必要
 * - 認可チェックは handler 側で行う（middleware は reject しない）
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    api::v1::dto::institutions::{InstitutionResponse, UpdateInstitutionRequest},
    api::v1::extractors::AuthSessionExtractor,
    error::AppError,
    repos::institution_repo::Institution,
    state::AppState,
};

// Provider 側 (realm-management client) で割り当てられる管理 role
const MANAGE_INSTITUTIONS: &str = "manage-institutions";

pub async fn list_institutions(
    State(state): State<AppState>,
) -> Result<Json<Vec<InstitutionResponse>>, AppError> {
    let rows = state.institutions.list()?;
    let res = rows.into_iter().map(to_response).collect();

    Ok(Json(res))
}

pub async fn get_institution(
    State(state): State<AppState>,
    AuthSessionExtractor(session): AuthSessionExtractor,
    Path(institution_id): Path<Uuid>,
) -> Result<Json<InstitutionResponse>, AppError> {
    if !session.is_authenticated() {
        return Err(AppError::Unauthorized);
    }

    let row = state
        .institutions
        .get(institution_id)?
        .ok_or(AppError::not_found("institution"))?;

    Ok(Json(to_response(row)))
}

pub async fn rename_institution(
    State(state): State<AppState>,
    AuthSessionExtractor(session): AuthSessionExtractor,
    Path(institution_id): Path<Uuid>,
    Json(req): Json<UpdateInstitutionRequest>,
) -> Result<Json<InstitutionResponse>, AppError> {
    if !session.is_authenticated() {
        return Err(AppError::Unauthorized);
    }
    if !session.has_permission(MANAGE_INSTITUTIONS) {
        return Err(AppError::Forbidden);
    }

    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_INSTITUTION", msg))?;

    let row = state
        .institutions
        .rename(institution_id, req.name.trim())?
        .ok_or(AppError::not_found("institution"))?;

    Ok(Json(to_response(row)))
}

pub async fn delete_institution(
    State(state): State<AppState>,
    AuthSessionExtractor(session): AuthSessionExtractor,
    Path(institution_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !session.is_authenticated() {
        return Err(AppError::Unauthorized);
    }
    if !session.has_permission(MANAGE_INSTITUTIONS) {
        return Err(AppError::Forbidden);
    }

    let deleted = state.institutions.delete(institution_id)?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("institution"))
    }
}

fn to_response(row: Institution) -> InstitutionResponse {
    InstitutionResponse {
        id: row.id,
        name: row.name,
        country: row.country,
        connected_at: row.connected_at,
    }
}
