//! # Flowmail ドメイン層
//!
//! ワークフロー実行完了通知のドメインモデルを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! notifier → infra → domain
//! ```
//!
//! ドメイン層はテンプレートエンジンやメール送信手段に依存しない。
//!
//! ## モジュール構成
//!
//! - [`execution`] - ワークフローエンジンから受け取る実行結果
//! - [`notification`] - 通知イベント種別、通知メッセージ、通知エラー
//!
//! ## 使用例
//!
//! ```rust
//! use flowmail_domain::{
//!     execution::{ExecutionResult, ExecutionStatus},
//!     notification::NotificationEventType,
//! };
//!
//! let result = ExecutionResult::new("nightly_etl", 42, ExecutionStatus::Failed)
//!     .with_failure_emails(["oncall@example.com"]);
//!
//! let recipients = NotificationEventType::Error.recipients(&result);
//! assert_eq!(recipients, ["oncall@example.com"]);
//! ```

pub mod execution;
pub mod notification;

pub use notification::NotificationError;
