//! # 通知送信
//!
//! 組み立て済みの通知メッセージを送信手段に引き渡す境界。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationSender` trait で送信手段を抽象化
//! - **実際の配送は範囲外**: SMTP 接続・再送・キューイングは送信側の実装が担う
//! - **同梱する実装**: Noop（ログ出力のみ）

mod noop;

use async_trait::async_trait;
use flowmail_domain::notification::{NotificationError, NotificationMessage};
pub use noop::NoopNotificationSender;

/// メール送信トレイト
///
/// 通知メッセージの配送方法を抽象化する。
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// メッセージを送信する
    async fn send(&self, message: &NotificationMessage) -> Result<(), NotificationError>;
}
