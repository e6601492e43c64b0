use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};

use crate::services::auth::AuthSession;
use crate::state::AppState;

/// Handler で AuthSession を受け取るための extractor
/// middleware が AuthSession を request.extensions() に insert 済みである前提
/// 見つからない場合は 401 を返す（認証 layer 未適用のルートに使われた等）
///
/// bypass された公開パスには AuthSession が存在しないので、公開 handler は
/// この extractor を使わないこと。
pub struct AuthSessionExtractor(pub AuthSession);

impl FromRequestParts<AppState> for AuthSessionExtractor
where
    AppState: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthSession>()
            .cloned()
            .map(AuthSessionExtractor)
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
