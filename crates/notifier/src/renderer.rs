//! # テンプレートレンダラー
//!
//! handlebars テンプレートエンジンで通知本文を生成する。
//!
//! ## 設計方針
//!
//! - **起動時に読み込み**: テンプレートは [`TemplateSource`] から一度だけ読み込み、以後は不変
//! - **未定義フィールドは空文字**: strict mode を無効にし、欠けたフィールドで失敗させない
//! - **HTML エスケープ**: `{{field}}` の値はエスケープされる
//! - **I/O なし**: `render()` は文字列を返すだけで副作用を持たない

use flowmail_domain::notification::{NotificationError, template_name};
use flowmail_infra::template_source::TemplateSource;
use handlebars::Handlebars;

use crate::context::RenderContext;

/// テンプレートレンダラー
///
/// handlebars エンジンをラップし、名前付きテンプレートを [`RenderContext`] で描画する。
/// 登録後のテンプレートは変更されないため、`Arc` で共有して並行に描画できる。
pub struct TemplateRenderer {
    engine: Handlebars<'static>,
}

impl TemplateRenderer {
    /// 全イベント種別のテンプレートを読み込んでレンダラーを作成する
    pub fn new(source: &dyn TemplateSource) -> Result<Self, NotificationError> {
        Self::with_templates(source, template_name::ALL)
    }

    /// 指定した名前のテンプレートのみを読み込んでレンダラーを作成する
    ///
    /// 読み込めない、または構文エラーのテンプレートがあれば失敗する。
    pub fn with_templates<'a>(
        source: &dyn TemplateSource,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, NotificationError> {
        let mut engine = Handlebars::new();
        engine.set_strict_mode(false);

        for name in names {
            let content = source.load_template(name)?;
            engine
                .register_template_string(name, content)
                .map_err(|e| NotificationError::TemplateFailed(format!("{name}: {e}")))?;
            tracing::debug!(template = name, "通知テンプレートを登録");
        }

        Ok(Self { engine })
    }

    /// テンプレートが登録済みかどうか
    pub fn has_template(&self, name: &str) -> bool {
        self.engine.has_template(name)
    }

    /// テンプレートを描画する
    ///
    /// 未登録のテンプレート名は `TemplateNotFound`。
    pub fn render(&self, name: &str, context: &RenderContext) -> Result<String, NotificationError> {
        if !self.has_template(name) {
            return Err(NotificationError::TemplateNotFound(name.to_string()));
        }

        self.engine
            .render(name, context)
            .map_err(|e| NotificationError::TemplateFailed(format!("{name}: {e}")))
    }
}
