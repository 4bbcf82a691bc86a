//! # ComposerRegistry
//!
//! 名前から [`Composer`] 実装を引くレジストリ。
//!
//! 起動時に [`ComposerRegistry::with_defaults`] で構築し、`Arc` で呼び出し元に渡す。
//! 登録は書き込みロック、取得は読み込みロックで保護されるため、起動中の登録と
//! 送信時の取得が並行しても安全に動作する。

use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use flowmail_domain::notification::NotificationError;

use crate::{
    composer::{Composer, PlainTextComposer, TemplateComposer},
    renderer::TemplateRenderer,
};

/// 既定の Composer 名
pub const DEFAULT_COMPOSER: &str = "default";
/// テンプレート Composer の名前
pub const TEMPLATE_COMPOSER: &str = "template";
/// プレーンテキスト Composer の名前
pub const PLAIN_COMPOSER: &str = "plain";

/// Composer レジストリ
#[derive(Default)]
pub struct ComposerRegistry {
    composers: RwLock<HashMap<String, Arc<dyn Composer>>>,
}

impl ComposerRegistry {
    /// 空のレジストリを生成する
    pub fn new() -> Self {
        Self::default()
    }

    /// 既定の Composer を登録済みのレジストリを生成する
    ///
    /// | 名前 | 実装 |
    /// |------|------|
    /// | `default` | [`TemplateComposer`] |
    /// | `template` | [`TemplateComposer`]（`default` と同一インスタンス） |
    /// | `plain` | [`PlainTextComposer`] |
    pub fn with_defaults(renderer: Arc<TemplateRenderer>) -> Self {
        let registry = Self::new();
        let template: Arc<dyn Composer> = Arc::new(TemplateComposer::new(renderer));
        registry.register(DEFAULT_COMPOSER, Arc::clone(&template));
        registry.register(TEMPLATE_COMPOSER, template);
        registry.register(PLAIN_COMPOSER, Arc::new(PlainTextComposer));
        registry
    }

    /// Composer を登録する
    ///
    /// 同名の Composer が登録済みの場合は置き換える。
    pub fn register(&self, name: impl Into<String>, composer: Arc<dyn Composer>) {
        let name = name.into();
        tracing::debug!(composer = %name, kind = composer.kind(), "Composer を登録");
        let mut composers = self
            .composers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if composers.insert(name.clone(), composer).is_some() {
            tracing::debug!(composer = %name, "登録済みの Composer を置き換え");
        }
    }

    /// 名前に対応する Composer を返す
    pub fn get(&self, name: &str) -> Result<Arc<dyn Composer>, NotificationError> {
        self.composers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| NotificationError::ComposerNotFound(name.to_string()))
    }

    /// 登録済みの名前一覧を返す（昇順）
    pub fn registered_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .composers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use flowmail_domain::{
        execution::ExecutionResult,
        notification::{NotificationEventType, NotificationMessage},
    };
    use flowmail_infra::template_source::EmbeddedTemplateSource;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::composer::SenderInfo;

    /// テスト用のモック Composer
    struct NamedComposer(&'static str);

    impl Composer for NamedComposer {
        fn kind(&self) -> &'static str {
            self.0
        }

        fn compose(
            &self,
            _event: NotificationEventType,
            _result: &ExecutionResult,
            _sender: &SenderInfo,
        ) -> Result<Option<NotificationMessage>, NotificationError> {
            Ok(None)
        }
    }

    fn make_renderer() -> Arc<TemplateRenderer> {
        Arc::new(TemplateRenderer::new(&EmbeddedTemplateSource).unwrap())
    }

    #[test]
    fn test_空のレジストリのregistered_namesは空vecを返す() {
        let registry = ComposerRegistry::new();
        assert!(registry.registered_names().is_empty());
    }

    #[test]
    fn test_with_defaultsで既定のcomposerが登録される() {
        let registry = ComposerRegistry::with_defaults(make_renderer());

        assert_eq!(
            registry.registered_names(),
            vec!["default", "plain", "template"]
        );
        assert_eq!(registry.get(DEFAULT_COMPOSER).unwrap().kind(), "template");
        assert_eq!(registry.get(TEMPLATE_COMPOSER).unwrap().kind(), "template");
        assert_eq!(registry.get(PLAIN_COMPOSER).unwrap().kind(), "plain");
    }

    #[test]
    fn test_defaultとtemplateは同一インスタンスを共有する() {
        let registry = ComposerRegistry::with_defaults(make_renderer());

        let default = registry.get(DEFAULT_COMPOSER).unwrap();
        let template = registry.get(TEMPLATE_COMPOSER).unwrap();

        assert!(Arc::ptr_eq(&default, &template));
    }

    #[test]
    fn test_同名で登録すると後から登録したcomposerだけが取得できる() {
        let registry = ComposerRegistry::new();
        registry.register("custom", Arc::new(NamedComposer("first")));
        registry.register("custom", Arc::new(NamedComposer("second")));

        assert_eq!(registry.get("custom").unwrap().kind(), "second");
        assert_eq!(registry.registered_names(), vec!["custom"]);
    }

    #[test]
    fn test_未登録の名前はcomposer_not_foundを返す() {
        let registry = ComposerRegistry::new();

        let result = registry.get("missing");

        assert!(matches!(
            result,
            Err(NotificationError::ComposerNotFound(name)) if name == "missing"
        ));
    }

    #[test]
    fn test_登録と取得を並行しても整合性が保たれる() {
        let registry = Arc::new(ComposerRegistry::with_defaults(make_renderer()));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    registry.register(format!("extra-{i}"), Arc::new(PlainTextComposer));
                    registry.get(DEFAULT_COMPOSER).unwrap().kind()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), "template");
        }
        assert_eq!(registry.registered_names().len(), 3 + 8);
    }
}
