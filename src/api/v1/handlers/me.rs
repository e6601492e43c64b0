/*
 * Responsibility
 * - GET /me: 呼び出し元の identity / permissions をそのまま返す
 * - anonymous は 401（insufficient permissions として扱う）
 */
use axum::Json;

use crate::{
    api::v1::dto::me::MeResponse,
    api::v1::extractors::AuthSessionExtractor,
    error::AppError,
    services::auth::claims::AuthUser,
};

pub async fn me(
    AuthSessionExtractor(session): AuthSessionExtractor,
) -> Result<Json<MeResponse>, AppError> {
    let identity = match &session.user {
        AuthUser::Authenticated(identity) => identity.clone(),
        AuthUser::Anonymous => return Err(AppError::Unauthorized),
    };

    Ok(Json(MeResponse {
        authenticated: true,
        name: identity.name,
        username: identity.username,
        email: identity.email,
        subject_id: identity.subject_id,
        permissions: session.permissions,
    }))
}
