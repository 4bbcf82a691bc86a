//! # Flowmail 共有ユーティリティ
//!
//! 各クレートで共通に使用するロギング関連のユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - `tracing-subscriber` への依存は `observability` feature の内側に閉じる

pub mod event_log;
pub mod observability;
