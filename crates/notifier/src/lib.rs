//! # Flowmail Notifier
//!
//! ワークフロー実行の完了イベントから通知メールを組み立て、送信手段に引き渡す。
//!
//! ## 処理の流れ
//!
//! ```text
//! ExecutionResult ─→ context（フィールド抽出）─→ renderer（テンプレート描画）
//!                                                   ↓
//! NotificationSender ←── service ←── composer（通知先・件名・本文）
//!                                       ↑
//!                                    registry（名前で選択）
//! ```
//!
//! ## モジュール構成
//!
//! - [`context`] - 実行結果からテンプレート用フィールドを抽出
//! - [`renderer`] - handlebars によるテンプレート描画
//! - [`composer`] - 通知メッセージの組み立て（テンプレート / プレーンテキスト）
//! - [`registry`] - 名前から Composer を引くレジストリ
//! - [`service`] - 組み立て + 送信 + ログ出力の統合
//! - [`config`] - 環境変数からの設定読み込み
//!
//! トレーシングの初期化はホストプロセスが `flowmail_shared::observability::init_tracing`
//! で行う。

pub mod composer;
pub mod config;
pub mod context;
pub mod registry;
pub mod renderer;
pub mod service;

use std::sync::Arc;

use flowmail_domain::notification::NotificationError;
use flowmail_infra::{
    notification::NotificationSender,
    template_source::{EmbeddedTemplateSource, FileTemplateSource, TemplateSource},
};

use crate::{
    config::NotifierConfig,
    registry::ComposerRegistry,
    renderer::TemplateRenderer,
    service::NotificationService,
};

/// 設定から通知サービスを構築する
///
/// テンプレートの読み込みと Composer の登録は起動時にここで一度だけ行う。
/// 設定された Composer 名が登録されていない場合は `ComposerNotFound` を返す。
pub fn bootstrap(
    config: &NotifierConfig,
    sender: Arc<dyn NotificationSender>,
) -> Result<NotificationService, NotificationError> {
    let source: Box<dyn TemplateSource> = match &config.template_dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "テンプレートをディレクトリから読み込み");
            Box::new(FileTemplateSource::new(dir))
        }
        None => Box::new(EmbeddedTemplateSource),
    };

    let renderer = Arc::new(TemplateRenderer::new(source.as_ref())?);
    let registry = Arc::new(ComposerRegistry::with_defaults(renderer));
    registry.get(&config.composer)?;

    tracing::info!(
        composer = %config.composer,
        sender_name = %config.sender_name,
        "通知サービスを初期化"
    );

    Ok(NotificationService::new(
        registry,
        sender,
        config.sender_info(),
        config.composer.clone(),
    ))
}
