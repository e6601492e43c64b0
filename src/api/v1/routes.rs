/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /institutions は一覧だけ公開（bypass 設定参照）、個別/更新系は要認証
 * - 認証 layer の適用は app.rs 側（nest 時）で行う
 */
use axum::{
    Router,
    routing::get,
};

use crate::state::AppState;

use crate::api::v1::handlers::{
    institutions::{delete_institution, get_institution, list_institutions, rename_institution},
    me::me,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/institutions", get(list_institutions))
        .route(
            "/institutions/{institution_id}",
            get(get_institution)
                .put(rename_institution)
                .delete(delete_institution),
        )
        .route("/me", get(me))
}
