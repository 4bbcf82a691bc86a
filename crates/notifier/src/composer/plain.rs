//! プレーンテキスト Composer
//!
//! テンプレートを使わず、固定の書式で `text/plain` 本文を生成する。
//! テンプレートを用意していない環境向け。

use flowmail_domain::{
    execution::ExecutionResult,
    notification::{MimeType, NotificationError, NotificationEventType, NotificationMessage},
};

use super::{Composer, SenderInfo, build_subject, recipients_for};
use crate::context::{NOT_AVAILABLE, format_duration, format_timestamp};

/// プレーンテキスト Composer
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextComposer;

impl PlainTextComposer {
    fn build_body(
        event: NotificationEventType,
        result: &ExecutionResult,
        sender: &SenderInfo,
    ) -> String {
        let headline = format!(
            "Execution '{}' of flow '{}' has {} on {}",
            result.execution_id(),
            result.flow_id(),
            event.outcome_phrase(),
            sender.name
        );

        let mut lines = vec![
            headline,
            String::new(),
            format!(
                "Project: {}",
                result.project_name().unwrap_or(NOT_AVAILABLE)
            ),
            format!("Flow: {}", result.flow_id()),
            format!("Execution Id: {}", result.execution_id()),
            format!("Start Time: {}", format_timestamp(result.start_time())),
        ];

        // 初回失敗時点ではフローは実行中のため終了時刻を持たない
        if event != NotificationEventType::FirstError {
            lines.push(format!("End Time: {}", format_timestamp(result.end_time())));
            lines.push(format!(
                "Duration: {}",
                format_duration(result.start_time(), result.end_time())
            ));
        }

        lines.push(format!("Status: {}", result.status()));
        lines.push(String::new());
        lines.push(format!(
            "Execution Link: {}",
            sender.execution_url(result.execution_id())
        ));

        lines.join("\n")
    }
}

impl Composer for PlainTextComposer {
    fn kind(&self) -> &'static str {
        "plain"
    }

    fn compose(
        &self,
        event: NotificationEventType,
        result: &ExecutionResult,
        sender: &SenderInfo,
    ) -> Result<Option<NotificationMessage>, NotificationError> {
        let Some(recipients) = recipients_for(event, result) else {
            return Ok(None);
        };

        let subject = build_subject(event, result.flow_id(), &sender.name);
        let body = Self::build_body(event, result, sender);

        Ok(NotificationMessage::new(
            recipients,
            subject,
            MimeType::Plain,
            body,
        ))
    }
}
