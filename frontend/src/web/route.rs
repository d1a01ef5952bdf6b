//! 路由定义模块 - 领域模型
//!
//! 纯粹的路由表，不依赖于 DOM 或 web_sys。
//! 除登录页和 404 外，所有页面都在侧边栏布局内且需要认证。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录 / 注册页面 (默认路由)
    #[default]
    Login,
    /// 24 周计划总览
    Dashboard,
    /// 每周视频链接
    Videos,
    Quiz,
    Notes,
    Profile,
    /// 重新生成路线图
    EditPlan,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 侧边栏主菜单中的页面，按显示顺序
    pub const MENU: [AppRoute; 4] = [
        AppRoute::Dashboard,
        AppRoute::Videos,
        AppRoute::Quiz,
        AppRoute::Notes,
    ];

    /// 将 URL path 解析为路由枚举，忽略结尾斜杠
    pub fn from_path(path: &str) -> Self {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        match path {
            "/" | "/login" => Self::Login,
            "/dashboard" => Self::Dashboard,
            "/videos" => Self::Videos,
            "/quiz" => Self::Quiz,
            "/notes" => Self::Notes,
            "/profile" => Self::Profile,
            "/edit-plan" => Self::EditPlan,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::Dashboard => "/dashboard",
            Self::Videos => "/videos",
            Self::Quiz => "/quiz",
            Self::Notes => "/notes",
            Self::Profile => "/profile",
            Self::EditPlan => "/edit-plan",
            Self::NotFound => "/404",
        }
    }

    /// 侧边栏中显示的名称
    pub fn label(&self) -> &'static str {
        match self {
            Self::Login => "Sign In",
            Self::Dashboard => "Dashboard",
            Self::Videos => "YouTube Links",
            Self::Quiz => "Quiz Bomber",
            Self::Notes => "Sticky Notes",
            Self::Profile => "Profile",
            Self::EditPlan => "Edit Plan",
            Self::NotFound => "Not Found",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login | Self::NotFound)
    }

    /// 已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// 认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_round_trip() {
        for route in [
            AppRoute::Login,
            AppRoute::Dashboard,
            AppRoute::Videos,
            AppRoute::Quiz,
            AppRoute::Notes,
            AppRoute::Profile,
            AppRoute::EditPlan,
        ] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
        assert_eq!(AppRoute::from_path("/notes/"), AppRoute::Notes);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
    }

    #[test]
    fn test_guards() {
        assert!(!AppRoute::Login.requires_auth());
        assert!(!AppRoute::NotFound.requires_auth());
        assert!(AppRoute::MENU.iter().all(AppRoute::requires_auth));
        assert!(AppRoute::Profile.requires_auth());
        assert!(AppRoute::Login.should_redirect_when_authenticated());
        assert!(!AppRoute::Dashboard.should_redirect_when_authenticated());
    }
}
