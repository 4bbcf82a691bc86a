//! # ワークフロー実行結果
//!
//! ワークフローエンジンが完了時に渡す実行結果（executable flow）を表現する。
//! このクレートでは読み取り専用の入力として扱い、状態遷移は持たない。
//!
//! ## 含まれる型
//!
//! | 型 | 用途 |
//! |---|------|
//! | [`ExecutionId`] | 実行 ID（エンジンが採番する整数） |
//! | [`ExecutionStatus`] | 実行ステータス（`SUCCEEDED`、`FAILED` など） |
//! | [`ExecutionResult`] | 実行結果と通知先リスト |
//!
//! ## 時刻の表現
//!
//! 開始・終了時刻はエポックミリ秒で保持する。エンジンは未確定の時刻を `-1` で
//! 渡すことがあるため、負値は「未取得」と同じ扱いになる
//! （[`ExecutionResult::start_time`] 参照）。

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

/// 実行 ID
///
/// ワークフローエンジンが実行ごとに採番する整数。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
#[display("{_0}")]
pub struct ExecutionId(i64);

impl ExecutionId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

/// 実行ステータス
///
/// エンジン側の表記（`SCREAMING_SNAKE_CASE`）でシリアライズされる。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionStatus {
    Ready,
    Preparing,
    Running,
    Paused,
    Succeeded,
    Killed,
    Failed,
    /// 一部ジョブが失敗し、残りのジョブの終了を待っている
    FailedFinishing,
    Skipped,
    Disabled,
    Queued,
    /// 失敗したが、失敗時の設定により成功扱いで終了した
    FailedSucceeded,
    Cancelled,
}

/// ワークフロー実行結果
///
/// 通知の組み立てに必要な情報のみを保持する。通知先リストは
/// 実行オプション（execution options）から取り出したもので、空の場合がある。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    flow_id:        String,
    execution_id:   ExecutionId,
    status:         ExecutionStatus,
    project_name:   Option<String>,
    submit_user:    Option<String>,
    start_time:     Option<i64>,
    end_time:       Option<i64>,
    failure_emails: Vec<String>,
    success_emails: Vec<String>,
}

impl ExecutionResult {
    /// 必須項目のみで実行結果を作成する
    ///
    /// 時刻・通知先などの任意項目は `with_*` で追加する。
    pub fn new(flow_id: impl Into<String>, execution_id: i64, status: ExecutionStatus) -> Self {
        Self {
            flow_id: flow_id.into(),
            execution_id: ExecutionId::new(execution_id),
            status,
            project_name: None,
            submit_user: None,
            start_time: None,
            end_time: None,
            failure_emails: Vec::new(),
            success_emails: Vec::new(),
        }
    }

    pub fn with_project_name(mut self, project_name: impl Into<String>) -> Self {
        self.project_name = Some(project_name.into());
        self
    }

    pub fn with_submit_user(mut self, submit_user: impl Into<String>) -> Self {
        self.submit_user = Some(submit_user.into());
        self
    }

    /// 開始時刻（エポックミリ秒）を設定する
    pub fn with_start_time(mut self, millis: i64) -> Self {
        self.start_time = Some(millis);
        self
    }

    /// 終了時刻（エポックミリ秒）を設定する
    pub fn with_end_time(mut self, millis: i64) -> Self {
        self.end_time = Some(millis);
        self
    }

    pub fn with_failure_emails<I, S>(mut self, emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.failure_emails = emails.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_success_emails<I, S>(mut self, emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.success_emails = emails.into_iter().map(Into::into).collect();
        self
    }

    // Getter メソッド

    pub fn flow_id(&self) -> &str {
        &self.flow_id
    }

    pub fn execution_id(&self) -> ExecutionId {
        self.execution_id
    }

    pub fn status(&self) -> ExecutionStatus {
        self.status
    }

    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }

    pub fn submit_user(&self) -> Option<&str> {
        self.submit_user.as_deref()
    }

    /// 開始時刻（エポックミリ秒）
    ///
    /// 未設定または負値（エンジンの `-1` センチネル）の場合は `None`。
    pub fn start_time(&self) -> Option<i64> {
        self.start_time.filter(|millis| *millis >= 0)
    }

    /// 終了時刻（エポックミリ秒）
    ///
    /// 未設定または負値の場合は `None`。
    pub fn end_time(&self) -> Option<i64> {
        self.end_time.filter(|millis| *millis >= 0)
    }

    pub fn failure_emails(&self) -> &[String] {
        &self.failure_emails
    }

    pub fn success_emails(&self) -> &[String] {
        &self.success_emails
    }
}
