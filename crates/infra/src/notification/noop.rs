//! Noop 通知送信実装
//!
//! メッセージを実際に送信せず、ログ出力のみ行う。
//! 送信手段が未設定の環境や動作確認で使用する。

use async_trait::async_trait;
use flowmail_domain::notification::{NotificationError, NotificationMessage};

use super::NotificationSender;

/// Noop 通知送信（ログ出力のみ）
#[derive(Debug, Clone, Default)]
pub struct NoopNotificationSender;

#[async_trait]
impl NotificationSender for NoopNotificationSender {
    async fn send(&self, message: &NotificationMessage) -> Result<(), NotificationError> {
        tracing::info!(
            to = ?message.recipients(),
            subject = %message.subject(),
            mime_type = %message.mime_type(),
            "Noop: メール送信をスキップ"
        );
        Ok(())
    }
}
