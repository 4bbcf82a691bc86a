//! 埋め込みテンプレートソース
//!
//! `include_str!` でバイナリに埋め込んだテンプレートを返す。

use flowmail_domain::notification::{NotificationError, template_name};

use super::TemplateSource;

const SUCCESS_TEMPLATE: &str = include_str!("../../../../templates/notifications/success.html");
const ERROR_TEMPLATE: &str = include_str!("../../../../templates/notifications/error.html");
const FIRST_ERROR_TEMPLATE: &str =
    include_str!("../../../../templates/notifications/first-error.html");

/// 埋め込みテンプレートソース
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplateSource;

impl TemplateSource for EmbeddedTemplateSource {
    fn load_template(&self, name: &str) -> Result<String, NotificationError> {
        let content = match name {
            template_name::SUCCESS => SUCCESS_TEMPLATE,
            template_name::ERROR => ERROR_TEMPLATE,
            template_name::FIRST_ERROR => FIRST_ERROR_TEMPLATE,
            other => return Err(NotificationError::TemplateNotFound(other.to_string())),
        };
        Ok(content.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn 全テンプレート名を読み込める() {
        let source = EmbeddedTemplateSource;
        for name in template_name::ALL {
            let content = source.load_template(name).unwrap();
            assert!(!content.is_empty(), "{name} が空");
        }
    }

    #[test]
    fn イベントごとに異なる本文が埋め込まれている() {
        let source = EmbeddedTemplateSource;
        let success = source.load_template(template_name::SUCCESS).unwrap();
        let error = source.load_template(template_name::ERROR).unwrap();
        let first_error = source.load_template(template_name::FIRST_ERROR).unwrap();

        assert_ne!(success, error);
        assert_ne!(error, first_error);
        assert_ne!(success, first_error);
    }

    #[test]
    fn 未知のテンプレート名はtemplate_not_foundを返す() {
        let result = EmbeddedTemplateSource.load_template("weekly-digest");
        assert!(matches!(
            result,
            Err(NotificationError::TemplateNotFound(name)) if name == "weekly-digest"
        ));
    }
}
