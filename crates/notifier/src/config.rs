//! # Notifier 設定
//!
//! 環境変数から通知コンポーネントの設定を読み込む。
//!
//! | 変数名 | デフォルト | 説明 |
//! |--------|-----------|------|
//! | `FLOWMAIL_SENDER_NAME` | `flowmail` | 件名に入る送信元名 |
//! | `FLOWMAIL_SCHEME` | `http` | 実行詳細リンクのスキーム |
//! | `FLOWMAIL_HOST` | `localhost` | 実行詳細リンクのホスト |
//! | `FLOWMAIL_PORT` | `8081` | 実行詳細リンクのポート |
//! | `FLOWMAIL_COMPOSER` | `default` | 使用する Composer 名 |
//! | `FLOWMAIL_TEMPLATE_DIR` | なし | 指定時はこのディレクトリからテンプレートを読み込む |

use std::{env, path::PathBuf};

use thiserror::Error;

use crate::{composer::SenderInfo, registry::DEFAULT_COMPOSER};

/// 設定読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    /// ポート番号として解釈できない値
    #[error("{name} は有効なポート番号である必要があります: {value:?}")]
    InvalidPort { name: &'static str, value: String },
}

/// 通知コンポーネントの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierConfig {
    /// 送信元名（件名に使用）
    pub sender_name:  String,
    /// 実行詳細リンクのスキーム
    pub scheme:       String,
    /// 実行詳細リンクのホスト
    pub host:         String,
    /// 実行詳細リンクのポート
    pub port:         u16,
    /// 使用する Composer 名
    pub composer:     String,
    /// テンプレートディレクトリ（未設定なら埋め込みテンプレート）
    pub template_dir: Option<PathBuf>,
}

impl NotifierConfig {
    /// 環境変数から設定を読み込む
    ///
    /// カレントディレクトリに `.env` があれば先に読み込む。
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意のキー検索関数から設定を読み込む
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("FLOWMAIL_PORT") {
            Some(value) => value.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort {
                name: "FLOWMAIL_PORT",
                value,
            })?,
            None => 8081,
        };

        Ok(Self {
            sender_name: lookup("FLOWMAIL_SENDER_NAME").unwrap_or_else(|| "flowmail".to_string()),
            scheme: lookup("FLOWMAIL_SCHEME").unwrap_or_else(|| "http".to_string()),
            host: lookup("FLOWMAIL_HOST").unwrap_or_else(|| "localhost".to_string()),
            port,
            composer: lookup("FLOWMAIL_COMPOSER").unwrap_or_else(|| DEFAULT_COMPOSER.to_string()),
            template_dir: lookup("FLOWMAIL_TEMPLATE_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    /// Composer に渡す送信元情報
    pub fn sender_info(&self) -> SenderInfo {
        SenderInfo::new(
            self.sender_name.clone(),
            self.scheme.clone(),
            self.host.clone(),
            self.port,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn 未設定の項目はデフォルト値になる() {
        let config = NotifierConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(
            config,
            NotifierConfig {
                sender_name:  "flowmail".to_string(),
                scheme:       "http".to_string(),
                host:         "localhost".to_string(),
                port:         8081,
                composer:     "default".to_string(),
                template_dir: None,
            }
        );
    }

    #[test]
    fn 環境変数の値が反映される() {
        let config = NotifierConfig::from_lookup(lookup_from(&[
            ("FLOWMAIL_SENDER_NAME", "prod-cluster"),
            ("FLOWMAIL_SCHEME", "https"),
            ("FLOWMAIL_HOST", "flows.example.com"),
            ("FLOWMAIL_PORT", "8443"),
            ("FLOWMAIL_COMPOSER", "plain"),
            ("FLOWMAIL_TEMPLATE_DIR", "/etc/flowmail/templates"),
        ]))
        .unwrap();

        assert_eq!(config.sender_name, "prod-cluster");
        assert_eq!(config.port, 8443);
        assert_eq!(config.composer, "plain");
        assert_eq!(
            config.template_dir,
            Some(PathBuf::from("/etc/flowmail/templates"))
        );
        assert_eq!(
            config.sender_info(),
            SenderInfo::new("prod-cluster", "https", "flows.example.com", 8443)
        );
    }

    #[test]
    fn 不正なポート番号はエラーになる() {
        let result = NotifierConfig::from_lookup(lookup_from(&[("FLOWMAIL_PORT", "http")]));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidPort { value, .. }) if value == "http"
        ));
    }

    #[test]
    fn 空のテンプレートディレクトリは未設定として扱う() {
        let config =
            NotifierConfig::from_lookup(lookup_from(&[("FLOWMAIL_TEMPLATE_DIR", "  ")])).unwrap();

        assert_eq!(config.template_dir, None);
    }
}
