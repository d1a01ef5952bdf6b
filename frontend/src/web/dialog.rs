//! 浏览器原生确认框

/// 用户点击"确定"时返回 `true`；窗口不可用时视为取消
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}
