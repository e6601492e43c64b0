//! Bearer token 解決 → AuthSession を extensions に入れる
//!
//! この layer は絶対に reject しない：
//! - 公開パス（suffix 一致）なら何も付けずに素通し
//! - 検証成功なら claims 由来の AuthSession
//! - 検証失敗なら anonymous AuthSession
//!
//! 認可（permission チェック）は handler 側の責務。middleware が 401 を
//! 返し始めると、公開エンドポイントと保護エンドポイントで失敗の形が
//! 二通りになってしまう。

use axum::{
    Router,
    body::Body,
    extract::{OriginalUri, State},
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::state::AppState;

/// `/api/v1/*` に認証を掛けるための middleware を適用する。
///
/// 例：
/// ```ignore
/// let v1 = api::v1::routes();
/// let v1 = middleware::auth::bearer::apply(v1, state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, bearer_middleware))
}

async fn bearer_middleware(
    State(state): State<AppState>,
    OriginalUri(original_uri): OriginalUri,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    // nest された Router では req.uri() から prefix が落ちるので、
    // 公開パス判定は OriginalUri のフルパスで行う。
    if let Some(session) = state
        .auth
        .authenticate(req.headers(), original_uri.path())
        .await
    {
        // middleware → extractor への受け渡し
        req.extensions_mut().insert(session);
    }

    next.run(req).await
}
