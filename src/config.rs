use thiserror::Error;

use crate::domain::UserId;

/// 既定のポート番号
pub const DEFAULT_PORT: u16 = 3000;

/// 既定のログフィルタ（`RUST_LOG`が未設定のとき）
pub const DEFAULT_LOG_FILTER: &str = "library_lending=debug,tower_http=debug,axum=trace";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid PORT value: {0}")]
    InvalidPort(String),
}

/// サーバー設定
///
/// 環境変数から読み込む：
/// - `PORT` - 待ち受けポート（既定 3000）
/// - `ACTIVE_USERS` - 有効な利用者IDのカンマ区切り
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub active_users: Vec<UserId>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意のキー参照関数から設定を構築する（テスト用に分離）
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        // 空要素は読み飛ばす（"anna,,jessica" や末尾カンマを許容）
        let active_users = lookup("ACTIVE_USERS")
            .map(|raw| {
                raw.split(',')
                    .filter_map(|id| UserId::new(id.trim()).ok())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self { port, active_users })
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
