//! # 実行コンテキストアダプタ
//!
//! [`ExecutionResult`] からテンプレートに渡すフィールドを取り出す。
//!
//! ## 設計方針
//!
//! - **失敗しない**: 任意項目が欠けていても `"N/A"` を入れて続行する
//! - **時刻は固定書式**: `%Y/%m/%d %H:%M:%S %Z`（UTC）。ロケールに依存しない
//! - **呼び出しごとに新規作成**: [`RenderContext`] は共有されない
//!
//! ## バインドされるフィールド
//!
//! | フィールド | 値 |
//! |-----------|-----|
//! | `flow` | 実行結果全体（ネストしたオブジェクト） |
//! | `flow_id` | フロー ID |
//! | `execution_id` | 実行 ID（数値） |
//! | `status` | ステータス（例: `SUCCEEDED`） |
//! | `project_name` | プロジェクト名 または `N/A` |
//! | `submit_user` | 実行ユーザー または `N/A` |
//! | `start_time` / `end_time` | 整形済み時刻 または `N/A` |
//! | `duration` | 所要時間（例: `1h 2m 3s`）または `N/A` |
//! | `failure_emails` / `success_emails` | 通知先リスト |

use chrono::{DateTime, Utc};
use flowmail_domain::execution::ExecutionResult;
use serde::Serialize;
use serde_json::{Map, Value};

/// 値を取得できない場合の表示
pub const NOT_AVAILABLE: &str = "N/A";

/// 時刻の表示書式
const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S %Z";

/// テンプレートに渡すコンテキスト
///
/// フィールド名から値（文字列・数値・リスト・ネストしたオブジェクト）への写像。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RenderContext(Map<String, Value>);

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// フィールドを追加する（同名のフィールドは上書き）
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// 実行結果からテンプレート用コンテキストを作成する
pub fn extract_context(result: &ExecutionResult) -> RenderContext {
    let mut context = RenderContext::new();

    match serde_json::to_value(result) {
        Ok(flow) => context.insert("flow", flow),
        Err(e) => tracing::warn!(
            error = %e,
            flow_id = %result.flow_id(),
            "実行結果のシリアライズに失敗したため flow を省略"
        ),
    }

    context.insert("flow_id", result.flow_id());
    context.insert("execution_id", result.execution_id().as_i64());
    context.insert("status", result.status().to_string());
    context.insert(
        "project_name",
        result.project_name().unwrap_or(NOT_AVAILABLE),
    );
    context.insert("submit_user", result.submit_user().unwrap_or(NOT_AVAILABLE));
    context.insert("start_time", format_timestamp(result.start_time()));
    context.insert("end_time", format_timestamp(result.end_time()));
    context.insert(
        "duration",
        format_duration(result.start_time(), result.end_time()),
    );
    context.insert("failure_emails", result.failure_emails());
    context.insert("success_emails", result.success_emails());

    context
}

/// エポックミリ秒を表示用の時刻文字列に変換する
///
/// 未取得・負値・表現できない値は `"N/A"`。
pub fn format_timestamp(millis: Option<i64>) -> String {
    millis
        .filter(|millis| *millis >= 0)
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|time| time.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// 開始・終了時刻から所要時間を表示用に整形する
///
/// どちらかが未取得、または終了が開始より前の場合は `"N/A"`。
/// 秒未満は切り捨てる。
pub fn format_duration(start_millis: Option<i64>, end_millis: Option<i64>) -> String {
    let (Some(start), Some(end)) = (
        start_millis.filter(|millis| *millis >= 0),
        end_millis.filter(|millis| *millis >= 0),
    ) else {
        return NOT_AVAILABLE.to_string();
    };
    if end < start {
        return NOT_AVAILABLE.to_string();
    }

    let total_seconds = (end - start) / 1000;
    let hours = total_seconds / 3600;
    let minutes = total_seconds % 3600 / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}
