//! Goal Pad 前端应用
//!
//! 采用 Context-Driven 架构：
//! - `web::route`: 路由定义
//! - `web::router`: 路由服务与守卫
//! - `auth`: 会话状态，唯一处理 401 的地方
//! - `notify`: 全局提示
//! - `components`: 页面与 UI 组件

mod api;
mod auth;
mod config;
pub mod logging;
mod notify;
mod components {
    pub mod dashboard;
    pub mod edit_plan;
    pub mod icons;
    pub mod loading;
    pub mod login;
    pub mod notes;
    pub mod onboarding;
    pub mod profile;
    pub mod progress;
    pub mod quiz;
    pub mod sidebar;
    pub mod videos;
}

use crate::auth::{AuthContext, init_auth};
use crate::components::dashboard::DashboardPage;
use crate::components::edit_plan::EditPlanPage;
use crate::components::login::LoginPage;
use crate::components::notes::NotesPage;
use crate::components::profile::ProfilePage;
use crate::components::quiz::QuizPage;
use crate::components::sidebar::AppShell;
use crate::components::videos::VideosPage;
use crate::config::AppConfig;
use crate::notify::{NoticeArea, Notifier};

use leptos::prelude::*;

// 浏览器原生 API 的轻量封装
pub(crate) mod web {
    mod dialog;
    mod http;
    pub mod route;
    pub mod router;
    mod storage;

    pub use dialog::confirm;
    pub use http::fetch;
    pub use storage::LocalStorage;
}

use web::route::AppRoute;
use web::router::{Link, Router, RouterOutlet};

fn route_matcher(route: AppRoute) -> AnyView {
    let page = match route {
        AppRoute::Login => return view! { <LoginPage /> }.into_any(),
        AppRoute::NotFound => {
            return view! {
                <div class="flex items-center justify-center min-h-screen bg-base-200">
                    <div class="text-center space-y-4">
                        <h1 class="text-6xl font-bold text-error">"404"</h1>
                        <p class="text-xl">"Page not found"</p>
                        <Link to=AppRoute::Dashboard class=String::from("btn btn-primary")>
                            "Back to Dashboard"
                        </Link>
                    </div>
                </div>
            }
            .into_any();
        }
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Videos => view! { <VideosPage /> }.into_any(),
        AppRoute::Quiz => view! { <QuizPage /> }.into_any(),
        AppRoute::Notes => view! { <NotesPage /> }.into_any(),
        AppRoute::Profile => view! { <ProfilePage /> }.into_any(),
        AppRoute::EditPlan => view! { <EditPlanPage /> }.into_any(),
    };

    view! { <AppShell route=route>{page}</AppShell> }.into_any()
}

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_env();
    tracing::info!(api_url = %config.api_url, "starting goal pad");

    // 1. 上下文：认证与提示
    let auth = AuthContext::new(&config);
    provide_context(auth);
    provide_context(Notifier::new(config.notice_ttl));

    // 2. 用已保存的令牌恢复会话
    init_auth(auth);

    // 3. 路由器只拿到认证信号
    view! {
        <Router auth=auth.signals()>
            <RouterOutlet matcher=route_matcher />
        </Router>
        <NoticeArea />
    }
}
