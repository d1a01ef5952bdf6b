//! 会话模块
//!
//! 会话状态由令牌推导：启动时处于 loading，经过一次恢复检查后
//! 变为已认证（用户 + 令牌）或匿名（两者皆无）。
//! `SessionContext` 是显式构造并注入的上下文，负责初始化（hydrate）与清理（logout / expire）。

use crate::client::{GoalPadApi, HttpClient};
use crate::{ApiError, ApiResult, LoginRequest, RegisterRequest, User};

/// 令牌持久化抽象
///
/// 浏览器中由 localStorage 实现；测试中使用内存实现。
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// 会话状态
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: Option<User>,
    pub token: Option<String>,
    /// 是否仍在进行启动时的恢复检查
    pub loading: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::loading()
    }
}

impl Session {
    pub fn loading() -> Self {
        Self {
            user: None,
            token: None,
            loading: true,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            user: None,
            token: None,
            loading: false,
        }
    }

    pub fn authenticated(user: User, token: String) -> Self {
        Self {
            user: Some(user),
            token: Some(token),
            loading: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }
}

/// 密码最短长度
pub const MIN_PASSWORD_LEN: usize = 6;

/// 修改密码表单
///
/// 后端没有修改密码的接口，这里只做客户端校验，不发送请求。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasswordChange {
    pub current: String,
    pub new: String,
    pub confirm: String,
}

impl PasswordChange {
    pub fn validate(&self) -> ApiResult<()> {
        if self.new != self.confirm {
            return Err(ApiError::validation("New passwords do not match"));
        }
        if self.new.chars().count() < MIN_PASSWORD_LEN {
            return Err(ApiError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        Ok(())
    }
}

/// 会话上下文
///
/// 持有 API 客户端（以及其中的令牌存储），所有会话状态转换都经过这里。
#[derive(Clone, Debug)]
pub struct SessionContext<C, S> {
    api: GoalPadApi<C, S>,
}

impl<C: HttpClient, S: TokenStore> SessionContext<C, S> {
    pub fn new(api: GoalPadApi<C, S>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &GoalPadApi<C, S> {
        &self.api
    }

    /// 启动时恢复会话
    ///
    /// 有令牌则通过获取个人资料验证；验证失败时删除令牌并返回匿名状态。
    pub async fn hydrate(&self) -> Session {
        let Some(token) = self.api.tokens().load() else {
            tracing::debug!("no stored token, starting anonymous");
            return Session::anonymous();
        };

        match self.api.get_profile().await {
            Ok(user) => {
                tracing::info!(user = %user.username, "session restored");
                Session::authenticated(user, token)
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored token rejected, clearing");
                self.api.tokens().clear();
                Session::anonymous()
            }
        }
    }

    /// 登录：换取令牌并保存，再获取个人资料
    pub async fn login(&self, req: &LoginRequest) -> ApiResult<Session> {
        if req.username.trim().is_empty() {
            return Err(ApiError::validation("Username is required"));
        }
        if req.password.is_empty() {
            return Err(ApiError::validation("Password is required"));
        }

        let token = self.api.login(req).await?;
        self.api.tokens().save(&token.access_token);

        match self.api.get_profile().await {
            Ok(user) => {
                tracing::info!(user = %user.username, "logged in");
                Ok(Session::authenticated(user, token.access_token))
            }
            Err(e) => {
                self.api.tokens().clear();
                Err(e)
            }
        }
    }

    /// 注册
    ///
    /// 后端注册接口只返回用户不返回令牌，因此注册成功后立即用同一凭据登录。
    pub async fn register(&self, req: &RegisterRequest) -> ApiResult<Session> {
        if req.username.trim().is_empty() {
            return Err(ApiError::validation("Username is required"));
        }
        if req.email.trim().is_empty() {
            return Err(ApiError::validation("Email is required"));
        }
        if !req.email.contains('@') {
            return Err(ApiError::validation("Enter a valid email address"));
        }
        if req.password.is_empty() {
            return Err(ApiError::validation("Password is required"));
        }

        let user = self.api.register(req).await?;
        tracing::info!(user = %user.username, "account registered");
        self.login(&req.login()).await
    }

    /// 注销：无条件清除令牌
    pub fn logout(&self) -> Session {
        self.api.tokens().clear();
        tracing::info!("logged out");
        Session::anonymous()
    }

    /// 令牌被后端拒绝时的清理
    pub fn expire(&self, err: &ApiError) -> Session {
        tracing::warn!(error = %err, "session expired");
        self.api.tokens().clear();
        Session::anonymous()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryTokenStore, MockHttp, sample_user};
    use crate::protocol::HttpMethod;

    type TestSession = SessionContext<MockHttp, MemoryTokenStore>;

    fn setup(token: Option<&str>) -> (MockHttp, MemoryTokenStore, TestSession) {
        let http = MockHttp::new();
        let tokens = MemoryTokenStore::default();
        if let Some(token) = token {
            tokens.save(token);
        }
        let api = GoalPadApi::new("http://api.test", http.clone(), tokens.clone());
        (http, tokens, SessionContext::new(api))
    }

    fn user_json() -> String {
        serde_json::to_string(&sample_user()).unwrap()
    }

    #[test]
    fn test_password_change_validation() {
        let change = |new: &str, confirm: &str| PasswordChange {
            current: "old".into(),
            new: new.into(),
            confirm: confirm.into(),
        };

        assert!(change("hunter22", "hunter22").validate().is_ok());
        assert_eq!(
            change("hunter22", "hunter23").validate(),
            Err(ApiError::Validation("New passwords do not match".into()))
        );
        assert!(change("abc", "abc").validate().is_err());
        assert!(change("abcdef", "abcdef").validate().is_ok());
    }

    #[test]
    fn test_initial_session_is_loading() {
        let session = Session::default();
        assert!(session.loading);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_hydrate_with_valid_token() {
        let (http, tokens, ctx) = setup(Some("good"));
        http.respond(200, &user_json());

        let session = ctx.hydrate().await;

        assert!(session.is_authenticated());
        assert!(!session.loading);
        assert_eq!(session.user, Some(sample_user()));
        assert_eq!(session.token.as_deref(), Some("good"));
        assert_eq!(tokens.load().as_deref(), Some("good"));
        assert_eq!(http.requests()[0].url, "http://api.test/profile");
    }

    #[tokio::test]
    async fn test_hydrate_with_expired_token_clears_it() {
        let (http, tokens, ctx) = setup(Some("expired"));
        http.respond(401, r#"{"detail":"Could not validate credentials"}"#);

        let session = ctx.hydrate().await;

        assert_eq!(session, Session::anonymous());
        assert!(tokens.load().is_none());
    }

    #[tokio::test]
    async fn test_hydrate_without_token_sends_nothing() {
        let (http, _, ctx) = setup(None);

        let session = ctx.hydrate().await;

        assert_eq!(session, Session::anonymous());
        assert!(http.requests().is_empty());
    }

    #[tokio::test]
    async fn test_login_saves_token_and_fetches_profile() {
        let (http, tokens, ctx) = setup(None);
        http.respond(200, r#"{"access_token":"fresh","token_type":"bearer"}"#);
        http.respond(200, &user_json());

        let session = ctx
            .login(&LoginRequest {
                username: "ada".into(),
                password: "pw".into(),
            })
            .await
            .unwrap();

        assert!(session.is_authenticated());
        assert_eq!(tokens.load().as_deref(), Some("fresh"));
        let sent = http.requests();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].header("Authorization"), Some("Bearer fresh"));
    }

    #[tokio::test]
    async fn test_login_rejected_leaves_no_token() {
        let (http, tokens, ctx) = setup(None);
        http.respond(401, r#"{"detail":"Incorrect username or password"}"#);

        let err = ctx
            .login(&LoginRequest {
                username: "ada".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap_err();

        assert!(err.is_unauthorized());
        assert!(tokens.load().is_none());
    }

    #[tokio::test]
    async fn test_login_validation_blocks_request() {
        let (http, _, ctx) = setup(None);

        let err = ctx
            .login(&LoginRequest {
                username: "  ".into(),
                password: "pw".into(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::Validation("Username is required".into()));
        assert!(http.requests().is_empty());
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let (http, tokens, ctx) = setup(None);
        http.respond(200, &user_json());
        http.respond(200, r#"{"access_token":"new","token_type":"bearer"}"#);
        http.respond(200, &user_json());

        let session = ctx
            .register(&RegisterRequest {
                username: "ada".into(),
                email: "ada@example.com".into(),
                password: "pw".into(),
                name: None,
            })
            .await
            .unwrap();

        assert!(session.is_authenticated());
        assert_eq!(tokens.load().as_deref(), Some("new"));
        let sent = http.requests();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[0].url, "http://api.test/auth/register");
        assert_eq!(sent[0].method, HttpMethod::Post);
        assert_eq!(sent[1].url, "http://api.test/auth/login");
    }

    #[tokio::test]
    async fn test_register_rejects_bad_email() {
        let (http, _, ctx) = setup(None);

        let err = ctx
            .register(&RegisterRequest {
                username: "ada".into(),
                email: "not-an-email".into(),
                password: "pw".into(),
                name: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Validation(_)));
        assert!(http.requests().is_empty());
    }

    #[test]
    fn test_logout_and_expire_clear_token() {
        let (_, tokens, ctx) = setup(Some("t"));
        assert_eq!(ctx.logout(), Session::anonymous());
        assert!(tokens.load().is_none());

        tokens.save("t2");
        let session = ctx.expire(&ApiError::Unauthorized { status: 403 });
        assert!(!session.is_authenticated());
        assert!(tokens.load().is_none());
    }
}
