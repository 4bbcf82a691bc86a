//! テンプレート Composer
//!
//! イベント種別ごとのテンプレート（`success` / `error` / `first-error`）で
//! HTML 本文を生成する。

use std::sync::Arc;

use flowmail_domain::{
    execution::ExecutionResult,
    notification::{MimeType, NotificationError, NotificationEventType, NotificationMessage},
};

use super::{Composer, SenderInfo, build_subject, recipients_for};
use crate::{context::extract_context, renderer::TemplateRenderer};

/// テンプレート Composer
pub struct TemplateComposer {
    renderer: Arc<TemplateRenderer>,
}

impl TemplateComposer {
    pub fn new(renderer: Arc<TemplateRenderer>) -> Self {
        Self { renderer }
    }
}

impl Composer for TemplateComposer {
    fn kind(&self) -> &'static str {
        "template"
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

        let mut context = extract_context(result);
        context.insert("sender_name", sender.name.as_str());
        context.insert("execution_url", sender.execution_url(result.execution_id()));

        let body = self.renderer.render(event.template_name(), &context)?;

        Ok(NotificationMessage::new(
            recipients,
            subject,
            MimeType::Html,
            body,
        ))
    }
}

#[cfg(test)]
mod tests {
    use flowmail_domain::execution::ExecutionStatus;
    use flowmail_infra::template_source::EmbeddedTemplateSource;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn composer() -> TemplateComposer {
        let renderer = TemplateRenderer::new(&EmbeddedTemplateSource).unwrap();
        TemplateComposer::new(Arc::new(renderer))
    }

    #[fixture]
    fn sender() -> SenderInfo {
        SenderInfo::new("prod-cluster", "http", "localhost", 8081)
    }

    fn make_result() -> ExecutionResult {
        ExecutionResult::new("nightly_etl", 42, ExecutionStatus::Failed)
            .with_project_name("warehouse")
            .with_start_time(1_700_000_000_000)
            .with_end_time(1_700_000_065_000)
    }

    #[rstest]
    fn 成功時通知先が空ならメッセージを作成しない(
        composer: TemplateComposer,
        sender: SenderInfo,
    ) {
        let result = make_result().with_failure_emails(["a@x.com"]);

        let message = composer
            .compose(NotificationEventType::Success, &result, &sender)
            .unwrap();

        assert!(message.is_none());
    }

    #[rstest]
    fn 成功通知の件名と本文(composer: TemplateComposer, sender: SenderInfo) {
        let result = make_result().with_success_emails(["ok@x.com"]);

        let message = composer
            .compose(NotificationEventType::Success, &result, &sender)
            .unwrap()
            .unwrap();

        assert_eq!(
            message.subject(),
            "Flow 'nightly_etl' has succeeded on prod-cluster"
        );
        assert_eq!(message.recipients(), ["ok@x.com"]);
        assert_eq!(message.mime_type(), MimeType::Html);
        assert!(message.body().contains("has succeeded on prod-cluster"));
        assert!(message.body().contains("warehouse"));
        assert!(message.body().contains("2023/11/14 22:13:20 UTC"));
        assert!(message.body().contains("1m 5s"));
    }

    #[rstest]
    fn 失敗通知は失敗時通知先に送られる(composer: TemplateComposer, sender: SenderInfo) {
        let result = make_result()
            .with_success_emails(["ok@x.com"])
            .with_failure_emails(["b@x.com", "a@x.com"]);

        let message = composer
            .compose(NotificationEventType::Error, &result, &sender)
            .unwrap()
            .unwrap();

        assert_eq!(message.recipients(), ["b@x.com", "a@x.com"]);
        assert_eq!(
            message.subject(),
            "Flow 'nightly_etl' has failed on prod-cluster"
        );
        assert!(message.body().contains("has failed on prod-cluster"));
    }

    #[rstest]
    fn 初回失敗通知はhtmlで失敗時通知先に送られる(
        composer: TemplateComposer,
        sender: SenderInfo,
    ) {
        let result = make_result().with_failure_emails(["a@x.com", "b@x.com"]);

        let message = composer
            .compose(NotificationEventType::FirstError, &result, &sender)
            .unwrap()
            .unwrap();

        assert_eq!(message.mime_type(), MimeType::Html);
        assert!(message.subject().contains("encountered a failure"));
        assert_eq!(message.recipients(), ["a@x.com", "b@x.com"]);
        assert!(message.body().contains("still running"));
    }

    #[rstest]
    fn イベントごとに別のテンプレートが使われる(
        composer: TemplateComposer,
        sender: SenderInfo,
    ) {
        let result = make_result()
            .with_success_emails(["ok@x.com"])
            .with_failure_emails(["ng@x.com"]);

        let bodies: Vec<String> = [
            NotificationEventType::Success,
            NotificationEventType::Error,
            NotificationEventType::FirstError,
        ]
        .into_iter()
        .map(|event| {
            composer
                .compose(event, &result, &sender)
                .unwrap()
                .unwrap()
                .body()
                .to_string()
        })
        .collect();

        assert_ne!(bodies[0], bodies[1]);
        assert_ne!(bodies[1], bodies[2]);
        assert_ne!(bodies[0], bodies[2]);
    }

    #[rstest]
    fn テンプレートが未登録ならtemplate_not_foundを返す(sender: SenderInfo) {
        let renderer =
            TemplateRenderer::with_templates(&EmbeddedTemplateSource, ["success"]).unwrap();
        let composer = TemplateComposer::new(Arc::new(renderer));
        let result = make_result().with_failure_emails(["a@x.com"]);

        let error = composer
            .compose(NotificationEventType::Error, &result, &sender)
            .unwrap_err();

        assert!(matches!(error, NotificationError::TemplateNotFound(name) if name == "error"));
    }

    #[rstest]
    fn 本文に送信元名と実行番号が埋め込まれる(composer: TemplateComposer, sender: SenderInfo) {
        let result = make_result().with_failure_emails(["a@x.com"]);

        let message = composer
            .compose(NotificationEventType::Error, &result, &sender)
            .unwrap()
            .unwrap();

        assert!(message.body().contains("Execution '42'"));
        assert!(message.body().contains("prod-cluster"));
        assert!(message.body().contains("http://localhost:8081/executor"));
    }
}
