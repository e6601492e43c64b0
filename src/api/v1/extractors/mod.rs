/*!
 * Authentication session extractor
 *
 * Responsibility:
 * - 認証済み/匿名リクエストのコンテキスト（AuthSession）を handler に提供する
 * - 型本体は services::auth 側（HTTP 非依存）、ここは axum との接続だけ
 *
 * Public API:
 * - AuthSessionExtractor
 */

mod auth_session;

pub use auth_session::AuthSessionExtractor;
