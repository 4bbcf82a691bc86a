//! # テンプレートソース
//!
//! 通知テンプレートの本文を名前で読み込む境界。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: レンダラーは本文の置き場所を知らない
//! - **2 つの実装**: バイナリ埋め込み（既定）、ディレクトリ（外部化用）
//! - **起動時に 1 回だけ読み込む**: 送信時には I/O が発生しない

mod embedded;
mod file;

pub use embedded::EmbeddedTemplateSource;
pub use file::FileTemplateSource;
use flowmail_domain::notification::NotificationError;

/// テンプレート読み込みトレイト
pub trait TemplateSource: Send + Sync {
    /// 名前に対応するテンプレート本文を返す
    ///
    /// 該当するテンプレートがない場合は `NotificationError::TemplateNotFound`。
    fn load_template(&self, name: &str) -> Result<String, NotificationError>;
}
