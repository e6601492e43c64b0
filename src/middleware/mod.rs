/*
 * Responsibility
 * - middleware の公開インターフェース (re-export)
 * - 各モジュールは Router を受け取り、layer を適用して返す
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
