//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 导航流程："监听 -> 验证 -> 处理 -> 加载"。
//!
//! 认证状态由外部以信号注入。会话仍在恢复（loading）时不做任何重定向，
//! 恢复结束后由 Effect 统一执行一次守卫。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

/// 用于重定向，不留下历史记录
fn replace_history_state(path: &str) {
    if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

/// 注入路由的认证状态
#[derive(Clone, Copy)]
pub struct AuthSignals {
    pub is_authenticated: Signal<bool>,
    pub is_loading: Signal<bool>,
}

/// 守卫：返回应当重定向到的路由；loading 期间不重定向
fn guard(target: AppRoute, is_auth: bool, is_loading: bool) -> Option<AppRoute> {
    if is_loading {
        return None;
    }
    if target.requires_auth() && !is_auth {
        return Some(AppRoute::auth_failure_redirect());
    }
    if target.should_redirect_when_authenticated() && is_auth {
        return Some(AppRoute::auth_success_redirect());
    }
    None
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    auth: AuthSignals,
}

impl RouterService {
    fn new(auth: AuthSignals) -> Self {
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            auth,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, route: AppRoute) {
        let is_auth = self.auth.is_authenticated.get_untracked();
        let is_loading = self.auth.is_loading.get_untracked();

        let target = match guard(route, is_auth, is_loading) {
            Some(redirect) => {
                tracing::info!(from = %route, to = %redirect, "navigation redirected");
                redirect
            }
            None => route,
        };

        if target != self.current_route.get_untracked() {
            push_history_state(target.to_path());
        }
        self.set_route.set(target);
    }

    /// 浏览器后退/前进按钮
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let auth = self.auth;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target = AppRoute::from_path(&current_path());
            let is_auth = auth.is_authenticated.get_untracked();
            let is_loading = auth.is_loading.get_untracked();

            match guard(target, is_auth, is_loading) {
                Some(redirect) => {
                    replace_history_state(redirect.to_path());
                    set_route.set(redirect);
                }
                None => set_route.set(target),
            }
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 监听器与应用同生命周期
        closure.forget();
    }

    /// 认证状态变化（恢复完成、登录、注销、令牌过期）时的自动重定向
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let auth = self.auth;

        Effect::new(move |_| {
            let is_auth = auth.is_authenticated.get();
            let is_loading = auth.is_loading.get();
            let route = current_route.get_untracked();

            if let Some(redirect) = guard(route, is_auth, is_loading) {
                tracing::info!(from = %route, to = %redirect, "auth state changed, redirecting");
                replace_history_state(redirect.to_path());
                set_route.set(redirect);
            }
        });
    }
}

fn provide_router(auth: AuthSignals) -> RouterService {
    let router = RouterService::new(auth);

    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
#[component]
pub fn Router(auth: AuthSignals, children: Children) -> impl IntoView {
    provide_router(auth);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || matcher(router.current_route().get())
}

/// 站内链接：拦截点击并走路由服务
#[component]
pub fn Link(
    to: AppRoute,
    #[prop(into)] class: Signal<String>,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        router.navigate(to);
    };

    view! {
        <a href=to.to_path() class=class on:click=on_click>
            {children()}
        </a>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_waits_for_hydration() {
        assert_eq!(guard(AppRoute::Notes, false, true), None);
        assert_eq!(guard(AppRoute::Login, true, true), None);
    }

    #[test]
    fn test_guard_redirects() {
        assert_eq!(guard(AppRoute::Notes, false, false), Some(AppRoute::Login));
        assert_eq!(guard(AppRoute::Login, true, false), Some(AppRoute::Dashboard));
        assert_eq!(guard(AppRoute::Notes, true, false), None);
        assert_eq!(guard(AppRoute::Login, false, false), None);
        assert_eq!(guard(AppRoute::NotFound, false, false), None);
    }
}
