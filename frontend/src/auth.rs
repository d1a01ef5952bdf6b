//! 认证模块
//!
//! 会话状态保存在响应式信号中，状态转换全部委托给共享层的 `SessionContext`。
//! 路由服务只读取注入的认证信号，不依赖本模块。
//!
//! 这里是唯一处理 `ApiError::Unauthorized` 的地方：任何视图收到该错误都交给
//! [`AuthContext::check`]，会话被清空后由路由服务重定向到登录页。

use crate::api::{Api, AppSession, build_session};
use crate::config::AppConfig;
use crate::web::router::AuthSignals;
use goalpad_shared::{ApiError, ApiResult, LoginRequest, RegisterRequest, Session, User};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 认证上下文
///
/// 只包含 Copy 句柄，可以直接移动进各个闭包。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 当前会话（启动时为 loading）
    pub session: RwSignal<Session>,
    ctx: StoredValue<AppSession>,
}

impl AuthContext {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            session: RwSignal::new(Session::default()),
            ctx: StoredValue::new(build_session(config)),
        }
    }

    /// 当前 API 客户端的副本（令牌在每次请求时从存储读取）
    pub fn api(&self) -> Api {
        self.ctx.with_value(|ctx| ctx.api().clone())
    }

    fn session_ctx(&self) -> AppSession {
        self.ctx.get_value()
    }

    /// 注入路由服务的信号
    pub fn signals(&self) -> AuthSignals {
        let session = self.session;
        AuthSignals {
            is_authenticated: Signal::derive(move || session.with(Session::is_authenticated)),
            is_loading: Signal::derive(move || session.with(|s| s.loading)),
        }
    }

    pub fn user(&self) -> Option<User> {
        self.session.with(|s| s.user.clone())
    }

    /// 个人资料更新后替换内存中的用户
    pub fn set_user(&self, user: User) {
        self.session.update(|s| {
            if s.is_authenticated() {
                s.user = Some(user);
            }
        });
    }

    pub async fn login(self, req: LoginRequest) -> ApiResult<()> {
        let session = self.session_ctx().login(&req).await?;
        self.session.set(session);
        Ok(())
    }

    pub async fn register(self, req: RegisterRequest) -> ApiResult<()> {
        let session = self.session_ctx().register(&req).await?;
        self.session.set(session);
        Ok(())
    }

    /// 注销：清除令牌与内存中的用户，导航交给路由服务
    pub fn logout(&self) {
        let session = self.ctx.with_value(|ctx| ctx.logout());
        self.session.set(session);
    }

    /// 记录失败；令牌被拒绝时强制注销
    pub fn observe(&self, operation: &str, err: &ApiError) {
        if err.is_unauthorized() {
            let session = self.ctx.with_value(|ctx| ctx.expire(err));
            self.session.set(session);
        } else {
            tracing::warn!(operation, error = %err, "request failed");
        }
    }

    /// 视图拿到的每个请求结果都经过这里
    pub fn check<T>(&self, operation: &str, result: ApiResult<T>) -> ApiResult<T> {
        if let Err(e) = &result {
            self.observe(operation, e);
        }
        result
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 启动时恢复会话：有令牌则用个人资料接口验证，结束后 loading 置为 false
pub fn init_auth(ctx: AuthContext) {
    let session_ctx = ctx.session_ctx();
    spawn_local(async move {
        let session = session_ctx.hydrate().await;
        ctx.session.set(session);
    });
}
