//! 通知区域
//!
//! 成功 / 失败提示显示在右上角，若干秒后自动消失。

use goalpad_shared::ApiError;
use leptos::prelude::*;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    id: u64,
    kind: NoticeKind,
    message: String,
}

#[derive(Clone, Copy)]
pub struct Notifier {
    notices: RwSignal<Vec<Notice>>,
    next_id: StoredValue<u64>,
    ttl: Duration,
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        Self {
            notices: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
            ttl,
        }
    }

    fn push(&self, kind: NoticeKind, message: String) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.notices.update(|list| list.push(Notice { id, kind, message }));

        let notices = self.notices;
        set_timeout(
            move || {
                notices.try_update(|list| list.retain(|n| n.id != id));
            },
            self.ttl,
        );
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(NoticeKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(NoticeKind::Error, message.into());
    }

    /// 校验错误与会话过期显示具体原因，其它失败显示 `fallback`
    pub fn api_error(&self, fallback: &str, err: &ApiError) {
        match err {
            ApiError::Validation(_) | ApiError::Unauthorized { .. } => {
                self.error(err.user_message())
            }
            _ => self.error(fallback),
        }
    }

    fn dismiss(&self, id: u64) {
        self.notices.update(|list| list.retain(|n| n.id != id));
    }
}

pub fn use_notifier() -> Notifier {
    use_context::<Notifier>().expect("Notifier should be provided")
}

#[component]
pub fn NoticeArea() -> impl IntoView {
    let notifier = use_notifier();

    view! {
        <div class="toast toast-top toast-end z-50">
            <For
                each=move || notifier.notices.get()
                key=|n| n.id
                children=move |notice| {
                    let id = notice.id;
                    let class = match notice.kind {
                        NoticeKind::Success => "alert alert-success shadow-lg",
                        NoticeKind::Error => "alert alert-error shadow-lg",
                    };
                    view! {
                        <div class=class role="status" on:click=move |_| notifier.dismiss(id)>
                            <span>{notice.message}</span>
                        </div>
                    }
                }
            />
        </div>
    }
}
