//! ディレクトリテンプレートソース
//!
//! `<dir>/<name>.html` からテンプレートを読み込む。
//! テンプレートをバイナリから外部化する場合に使用する。

use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use flowmail_domain::notification::NotificationError;

use super::TemplateSource;

/// テンプレートファイルの拡張子
const TEMPLATE_EXTENSION: &str = "html";

/// ディレクトリテンプレートソース
#[derive(Debug, Clone)]
pub struct FileTemplateSource {
    dir: PathBuf,
}

impl FileTemplateSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(name).with_extension(TEMPLATE_EXTENSION)
    }
}

impl TemplateSource for FileTemplateSource {
    fn load_template(&self, name: &str) -> Result<String, NotificationError> {
        let path = self.path_for(name);
        fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => NotificationError::TemplateNotFound(name.to_string()),
            _ => NotificationError::TemplateFailed(format!(
                "{} の読み込みに失敗: {e}",
                path.display()
            )),
        })
    }
}
