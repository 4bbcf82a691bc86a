//! # 通知サービス
//!
//! Composer の選択 → メッセージ組み立て → 送信を統合するサービス。
//!
//! ## 設計方針
//!
//! - **エラーは呼び出し元へ**: 設定ミス（Composer・テンプレート未登録）と送信失敗は
//!   `Err` で返す。再試行はしない
//! - **通知先なしは正常系**: [`NotifyOutcome::Skipped`] を返す
//! - **依存性注入**: `NotificationSender` は trait で抽象化

use std::sync::Arc;

use flowmail_domain::{
    execution::ExecutionResult,
    notification::{NotificationError, NotificationEventType, NotificationMessage},
};
use flowmail_infra::notification::NotificationSender;
use flowmail_shared::{event_log::event, log_business_event};

use crate::{composer::SenderInfo, registry::ComposerRegistry};

/// 通知処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// メッセージを送信した
    Sent(NotificationMessage),
    /// 通知先が空のため何もしなかった
    Skipped,
}

/// 通知サービス
pub struct NotificationService {
    registry:      Arc<ComposerRegistry>,
    sender:        Arc<dyn NotificationSender>,
    sender_info:   SenderInfo,
    composer_name: String,
}

impl NotificationService {
    pub fn new(
        registry: Arc<ComposerRegistry>,
        sender: Arc<dyn NotificationSender>,
        sender_info: SenderInfo,
        composer_name: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            sender,
            sender_info,
            composer_name: composer_name.into(),
        }
    }

    pub fn registry(&self) -> &Arc<ComposerRegistry> {
        &self.registry
    }

    pub fn sender_info(&self) -> &SenderInfo {
        &self.sender_info
    }

    /// 設定された Composer で通知する
    pub async fn notify(
        &self,
        event_type: NotificationEventType,
        result: &ExecutionResult,
    ) -> Result<NotifyOutcome, NotificationError> {
        self.notify_with(&self.composer_name, event_type, result)
            .await
    }

    /// 指定した名前の Composer で通知する
    pub async fn notify_with(
        &self,
        composer_name: &str,
        event_type: NotificationEventType,
        result: &ExecutionResult,
    ) -> Result<NotifyOutcome, NotificationError> {
        let event_type_str: &str = event_type.into();

        let composer = self.registry.get(composer_name)?;
        let message = match composer.compose(event_type, result, &self.sender_info) {
            Ok(Some(message)) => message,
            Ok(None) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_SKIPPED,
                    event.result = event::result::SKIPPED,
                    notification.event_type = event_type_str,
                    notification.flow_id = %result.flow_id(),
                    notification.execution_id = %result.execution_id(),
                    "通知先が空のため通知をスキップ"
                );
                return Ok(NotifyOutcome::Skipped);
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    composer = composer_name,
                    event_type = event_type_str,
                    flow_id = %result.flow_id(),
                    "通知メッセージの組み立てに失敗"
                );
                return Err(e);
            }
        };

        match self.sender.send(&message).await {
            Ok(()) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_SENT,
                    event.result = event::result::SUCCESS,
                    notification.event_type = event_type_str,
                    notification.flow_id = %result.flow_id(),
                    notification.execution_id = %result.execution_id(),
                    notification.recipients = message.recipients().len(),
                    "通知メール送信成功"
                );
                Ok(NotifyOutcome::Sent(message))
            }
            Err(e) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_FAILED,
                    event.result = event::result::FAILURE,
                    notification.event_type = event_type_str,
                    notification.flow_id = %result.flow_id(),
                    notification.execution_id = %result.execution_id(),
                    error = %e,
                    "通知メール送信失敗"
                );
                Err(e)
            }
        }
    }
}
