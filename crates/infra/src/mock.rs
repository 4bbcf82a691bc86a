//! # テスト用モック
//!
//! ユースケーステストで使用するインメモリモック。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! flowmail-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use flowmail_domain::notification::{NotificationError, NotificationMessage};

use crate::notification::NotificationSender;

// ===== MockNotificationSender =====

/// 送信したメッセージを記録するモック
///
/// `clone()` したインスタンス同士で記録を共有する。
#[derive(Clone, Default)]
pub struct MockNotificationSender {
    sent:        Arc<Mutex<Vec<NotificationMessage>>>,
    should_fail: bool,
}

impl MockNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// 常に `SendFailed` を返すモック
    pub fn failing() -> Self {
        Self {
            sent:        Arc::default(),
            should_fail: true,
        }
    }

    /// 送信されたメッセージの一覧を返す
    pub fn sent_messages(&self) -> Vec<NotificationMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send(&self, message: &NotificationMessage) -> Result<(), NotificationError> {
        if self.should_fail {
            return Err(NotificationError::SendFailed(
                "テスト用エラー".to_string(),
            ));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}
