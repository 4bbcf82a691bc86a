//! # 通知
//!
//! ワークフロー実行完了時のメール通知に関するドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 備考 |
//! |---|------------|------|
//! | [`NotificationEventType`] | 通知イベント種別 | 3 種類: 成功、失敗、初回失敗 |
//! | [`NotificationMessage`] | 通知メッセージ | 宛先・件名・MIME タイプ・本文 |
//! | [`MimeType`] | 本文の MIME タイプ | `text/plain` / `text/html` |
//!
//! ## 設計方針
//!
//! - **宛先なしのメッセージは存在しない**: [`NotificationMessage::new`] は
//!   宛先が空なら `None` を返す
//! - **イベントごとに独立したテンプレート**: 成功・失敗・初回失敗は別テンプレート
//! - **エラー分類**: 設定ミス（テンプレート・Composer 未登録）と送信失敗を区別する

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;
use thiserror::Error;

use crate::execution::ExecutionResult;

/// テンプレート名の定数
///
/// イベント種別ごとに 1 つずつ。テンプレートソースはこの名前で本文を引く。
pub mod template_name {
    pub const SUCCESS: &str = "success";
    pub const ERROR: &str = "error";
    pub const FIRST_ERROR: &str = "first-error";

    /// 全テンプレート名（読み込み順）
    pub const ALL: [&str; 3] = [SUCCESS, ERROR, FIRST_ERROR];
}

/// 通知エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// テンプレートが登録されていない
    #[error("テンプレートが見つかりません: {0}")]
    TemplateNotFound(String),

    /// 指定名の Composer が登録されていない
    #[error("Composer が見つかりません: {0}")]
    ComposerNotFound(String),

    /// テンプレートの読み込み・解析・レンダリングに失敗
    #[error("テンプレート処理に失敗: {0}")]
    TemplateFailed(String),

    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),
}

impl NotificationError {
    /// 設定ミスに起因するエラーかどうか
    ///
    /// 設定ミスは再試行しても解消しないため、呼び出し元は即座に失敗させる。
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::TemplateNotFound(_) | Self::ComposerNotFound(_) | Self::TemplateFailed(_)
        )
    }
}

/// 通知イベント種別
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NotificationEventType {
    /// 成功: 成功時通知先に送信
    Success,
    /// 失敗: 失敗時通知先に送信
    Error,
    /// 初回失敗: 最初のジョブ失敗を検知した時点で失敗時通知先に送信
    FirstError,
}

impl NotificationEventType {
    /// 件名に埋め込む結果の表現
    pub fn outcome_phrase(self) -> &'static str {
        match self {
            Self::Success => "succeeded",
            Self::Error => "failed",
            Self::FirstError => "encountered a failure",
        }
    }

    /// 本文のテンプレート名
    pub fn template_name(self) -> &'static str {
        match self {
            Self::Success => template_name::SUCCESS,
            Self::Error => template_name::ERROR,
            Self::FirstError => template_name::FIRST_ERROR,
        }
    }

    /// 実行結果からこのイベントの通知先リストを取り出す
    pub fn recipients(self, result: &ExecutionResult) -> &[String] {
        match self {
            Self::Success => result.success_emails(),
            Self::Error | Self::FirstError => result.failure_emails(),
        }
    }
}

/// 本文の MIME タイプ
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr, strum::Display,
)]
pub enum MimeType {
    #[serde(rename = "text/plain")]
    #[strum(serialize = "text/plain")]
    Plain,
    #[serde(rename = "text/html")]
    #[strum(serialize = "text/html")]
    Html,
}

/// 通知メッセージ
///
/// Composer の出力。`NotificationSender` に渡される。
///
/// # 不変条件
///
/// - 宛先は 1 件以上
/// - 宛先は重複しない（最初に現れた順序を保持）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    recipients: Vec<String>,
    subject:    String,
    mime_type:  MimeType,
    body:       String,
}

impl NotificationMessage {
    /// 通知メッセージを作成する
    ///
    /// 宛先は前後の空白を除去し、空文字と重複を取り除く。
    /// 残った宛先が空の場合は `None` を返す。
    pub fn new<I, S>(
        recipients: I,
        subject: String,
        mime_type: MimeType,
        body: String,
    ) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let recipients: Vec<String> = recipients
            .into_iter()
            .map(|r| r.as_ref().trim().to_string())
            .filter(|r| !r.is_empty())
            .unique()
            .collect();

        if recipients.is_empty() {
            return None;
        }

        Some(Self {
            recipients,
            subject,
            mime_type,
            body,
        })
    }

    pub fn recipients(&self) -> &[String] {
        &self.recipients
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn mime_type(&self) -> MimeType {
        self.mime_type
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}
