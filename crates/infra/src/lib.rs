//! # Flowmail インフラ層
//!
//! テンプレートの読み込み元とメール送信の境界を提供する。
//!
//! ## モジュール構成
//!
//! - [`template_source`] - テンプレート本文の読み込み（埋め込み / ディレクトリ）
//! - [`notification`] - 通知メッセージの送信を抽象化する `NotificationSender`
//! - `mock` - テスト用モック（`test-utils` feature）

pub mod notification;
pub mod template_source;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
