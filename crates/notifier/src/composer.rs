//! # 通知 Composer
//!
//! 通知イベントと実行結果から [`NotificationMessage`] を組み立てる。
//!
//! ## 共通ポリシー
//!
//! 全 Composer は次の手順に従い、本文の作り方だけが異なる:
//!
//! 1. 通知先: 成功時は `success_emails`、失敗・初回失敗時は `failure_emails`
//! 2. 通知先が空なら `None`（メッセージを作らない。エラーではない）
//! 3. 件名: `Flow '<flow_id>' has <結果> on <送信元名>`
//! 4. 本文を生成してメッセージに詰める
//!
//! ## 実装
//!
//! - [`TemplateComposer`] - イベントごとのテンプレートで HTML 本文を生成
//! - [`PlainTextComposer`] - テンプレートを使わずプレーンテキスト本文を生成

mod plain;
mod template;

use flowmail_domain::{
    execution::{ExecutionId, ExecutionResult},
    notification::{NotificationError, NotificationEventType, NotificationMessage},
};
pub use plain::PlainTextComposer;
pub use template::TemplateComposer;

/// 送信元の情報
///
/// `name` は件名に、`scheme` / `host` / `port` は本文内の実行詳細リンクに使う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderInfo {
    pub name:   String,
    pub scheme: String,
    pub host:   String,
    pub port:   u16,
}

impl SenderInfo {
    pub fn new(
        name: impl Into<String>,
        scheme: impl Into<String>,
        host: impl Into<String>,
        port: u16,
    ) -> Self {
        Self {
            name: name.into(),
            scheme: scheme.into(),
            host: host.into(),
            port,
        }
    }

    /// 実行詳細ページの URL
    pub fn execution_url(&self, execution_id: ExecutionId) -> String {
        format!(
            "{}://{}:{}/executor?execid={execution_id}",
            self.scheme, self.host, self.port
        )
    }
}

/// 通知メッセージ組み立てトレイト
///
/// 実装はステートレスで、複数スレッドから同時に呼ばれる。
pub trait Composer: Send + Sync {
    /// ログ出力用の実装名
    fn kind(&self) -> &'static str;

    /// 通知メッセージを組み立てる
    ///
    /// 通知先が空の場合は `Ok(None)` を返す。
    fn compose(
        &self,
        event: NotificationEventType,
        result: &ExecutionResult,
        sender: &SenderInfo,
    ) -> Result<Option<NotificationMessage>, NotificationError>;
}

/// 件名を組み立てる
pub fn build_subject(event: NotificationEventType, flow_id: &str, sender_name: &str) -> String {
    format!(
        "Flow '{flow_id}' has {} on {sender_name}",
        event.outcome_phrase()
    )
}

/// イベントの通知先を返す。有効な宛先が 1 件もなければ `None`
fn recipients_for(event: NotificationEventType, result: &ExecutionResult) -> Option<&[String]> {
    let recipients = event.recipients(result);
    if recipients.iter().all(|r| r.trim().is_empty()) {
        tracing::debug!(
            flow_id = %result.flow_id(),
            execution_id = %result.execution_id(),
            event_type = %event,
            "通知先が空のため通知を作成しない"
        );
        return None;
    }
    Some(recipients)
}
