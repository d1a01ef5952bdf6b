//! 浏览器侧的客户端装配
//!
//! 共享层的 `GoalPadApi` 对传输层和令牌存储是泛型的；
//! 这里提供基于 fetch 与 localStorage 的实现。

use crate::config::AppConfig;
use crate::web::{LocalStorage, fetch};
use async_trait::async_trait;
use goalpad_shared::{
    ApiError, ApiResult, GoalPadApi, HttpClient, HttpRequest, HttpResponse, SessionContext,
    TokenStore,
};

/// fetch 传输层
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FetchClient;

#[async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        fetch(&req).await.map_err(|e| ApiError::Network(e.to_string()))
    }
}

/// 令牌保存在 localStorage 的固定键下
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrowserTokenStore {
    key: &'static str,
}

impl BrowserTokenStore {
    pub fn new(key: &'static str) -> Self {
        Self { key }
    }
}

impl TokenStore for BrowserTokenStore {
    fn load(&self) -> Option<String> {
        LocalStorage::get(self.key).filter(|t| !t.is_empty())
    }

    fn save(&self, token: &str) {
        if let Err(e) = LocalStorage::set(self.key, token) {
            tracing::warn!(error = %e, "failed to persist access token");
        }
    }

    fn clear(&self) {
        if let Err(e) = LocalStorage::delete(self.key) {
            tracing::warn!(error = %e, "failed to remove access token");
        }
    }
}

pub type Api = GoalPadApi<FetchClient, BrowserTokenStore>;
pub type AppSession = SessionContext<FetchClient, BrowserTokenStore>;

pub fn build_session(config: &AppConfig) -> AppSession {
    let api = GoalPadApi::new(
        config.api_url.clone(),
        FetchClient,
        BrowserTokenStore::new(config.token_key),
    );
    SessionContext::new(api)
}
