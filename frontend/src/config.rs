//! 应用配置
//!
//! 后端地址在编译期通过环境变量 `GOALPAD_API_URL` 注入（Trunk 构建时设置），
//! 未设置时使用本地开发地址。

use goalpad_shared::TOKEN_STORAGE_KEY;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// 后端根地址，不带结尾斜杠
    pub api_url: String,
    /// localStorage 中保存令牌的键
    pub token_key: &'static str,
    /// 通知自动消失的时间
    pub notice_ttl: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let api_url = option_env!("GOALPAD_API_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_API_URL);

        Self {
            api_url: api_url.trim().trim_end_matches('/').to_string(),
            token_key: TOKEN_STORAGE_KEY,
            notice_ttl: Duration::from_secs(3),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
