//! 仪表盘：总进度、24 周网格、每周详情（任务勾选 + 视频链接）
//!
//! 任务集合放在 `TaskBoard` 信号中；勾选走共享层的乐观切换，
//! 成功后不重新拉取，失败时只回滚该任务。

use crate::auth::use_auth;
use crate::components::loading::LoadingSpinner;
use crate::components::onboarding::OnboardingFlow;
use crate::components::progress::ProgressSummary;
use crate::notify::use_notifier;
use goalpad_shared::progress::{WeekSummary, overall_completion, weekly_plan};
use goalpad_shared::tasks::{BoardAccess, TaskBoard, ToggleError, toggle_task};
use goalpad_shared::{DashboardData, Id, TOTAL_WEEKS};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 以响应式信号承载的任务看板
#[derive(Clone, Copy)]
struct BoardSignal(RwSignal<TaskBoard>);

impl BoardAccess for BoardSignal {
    fn with_board<R>(&self, f: impl FnOnce(&mut TaskBoard) -> R) -> R {
        // 页面已卸载时作用在一个空看板上
        if self.0.is_disposed() {
            return f(&mut TaskBoard::default());
        }
        f(&mut self.0.write())
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();

    let data = RwSignal::new(Option::<DashboardData>::None);
    let board = RwSignal::new(TaskBoard::default());
    let (loading, set_loading) = signal(true);

    let load = move || {
        set_loading.set(true);
        let api = auth.api();
        spawn_local(async move {
            match auth.check("load dashboard", api.get_dashboard().await) {
                Ok(dashboard) => {
                    board.update(|b| b.replace(dashboard.recent_tasks.clone()));
                    data.set(Some(dashboard));
                }
                Err(e) => notifier.api_error("Failed to load dashboard", &e),
            }
            set_loading.set(false);
        });
    };

    load();

    let has_goal = move || data.with(|d| d.as_ref().is_some_and(|d| d.learning_goal.is_some()));

    view! {
        {move || {
            if loading.get() && data.with(Option::is_none) {
                view! { <LoadingSpinner /> }.into_any()
            } else if data.with(Option::is_some) && !has_goal() {
                view! { <OnboardingFlow on_complete=Callback::new(move |_| load()) /> }.into_any()
            } else {
                view! { <Overview data=data board=board /> }.into_any()
            }
        }}
    }
}

#[component]
fn Overview(data: RwSignal<Option<DashboardData>>, board: RwSignal<TaskBoard>) -> impl IntoView {
    let auth = use_auth();
    let (selected_week, set_selected_week) = signal(Option::<i32>::None);

    let plan = Memo::new(move |_| {
        let roadmap = data.with(|d| d.as_ref().and_then(|d| d.roadmap().cloned()));
        board.with(|b| weekly_plan(b.tasks(), roadmap.as_ref()))
    });
    let overall = Memo::new(move |_| board.with(|b| overall_completion(b.tasks())));

    let greeting = move || {
        auth.user()
            .map(|u| u.display_name().to_string())
            .unwrap_or_default()
    };
    let topic = move || {
        data.with(|d| {
            d.as_ref()
                .and_then(|d| d.learning_goal.as_ref())
                .map(|g| g.topic.clone())
                .unwrap_or_default()
        })
    };

    let progress = move || {
        data.with(|d| d.as_ref().map(|d| d.progress_data.clone()).unwrap_or_default())
    };
    let schedule = move || {
        data.with(|d| d.as_ref().map(|d| d.upcoming_schedule.clone()).unwrap_or_default())
    };

    view! {
        <div class="space-y-4 max-w-7xl">
            <div class="flex justify-between items-center">
                <div>
                    <h1 class="text-2xl font-bold">"Welcome back, " {greeting} "!"</h1>
                    <p class="text-sm text-base-content/60">{topic}</p>
                </div>
            </div>

            <div class="card bg-base-100 shadow">
                <div class="card-body p-4 gap-2">
                    <div class="flex items-center justify-between">
                        <h2 class="text-sm font-semibold">"Overall Progress"</h2>
                        <span class="text-xs text-base-content/60">
                            {move || {
                                let c = overall.get();
                                format!("{}/{} tasks • {}%", c.done, c.total, c.percent())
                            }}
                        </span>
                    </div>
                    <progress
                        class="progress progress-primary w-full"
                        max="100"
                        value=move || overall.get().percent()
                    ></progress>
                </div>
            </div>

            <div class="card bg-base-100 shadow">
                <div class="card-body p-4">
                    <h2 class="text-sm font-semibold mb-2">
                        {format!("Your {}-Week Plan", TOTAL_WEEKS)}
                    </h2>
                    <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 xl:grid-cols-4 gap-4">
                        <For
                            each=move || plan.get()
                            key=|w| (w.week, w.completion.done, w.completion.total, w.theme.clone())
                            children=move |week| view! { <WeekCard week=week on_open=set_selected_week /> }
                        />
                    </div>
                </div>
            </div>

            <ProgressSummary progress=Signal::derive(progress) schedule=Signal::derive(schedule) />

            {move || {
                selected_week
                    .get()
                    .map(|week| view! { <WeekModal week=week plan=plan board=board on_close=set_selected_week /> })
            }}
        </div>
    }
}

#[component]
fn WeekCard(week: WeekSummary, on_open: WriteSignal<Option<i32>>) -> impl IntoView {
    let number = week.week;
    let pct = week.completion.percent();
    let theme = if week.theme.is_empty() {
        "Theme".to_string()
    } else {
        week.theme.clone()
    };

    view! {
        <div
            class="rounded-xl border border-base-300 p-4 bg-base-100 hover:border-neutral transition cursor-pointer"
            on:click=move |_| on_open.set(Some(number))
        >
            <div class="flex items-start justify-between mb-2 gap-2">
                <div>
                    <p class="text-xs text-base-content/60">{format!("Week {}", number)}</p>
                    <h3 class="text-sm font-semibold line-clamp-2">{theme}</h3>
                </div>
                <div
                    class="radial-progress text-[10px] text-primary"
                    style=format!("--value:{}; --size:2.25rem; --thickness:3px;", pct)
                    role="progressbar"
                >
                    {format!("{}%", pct)}
                </div>
            </div>
            <p class="text-xs text-base-content/60">
                {format!("Completed {}/{}", week.completion.done, week.completion.total)}
            </p>
        </div>
    }
}

#[component]
fn WeekModal(
    week: i32,
    plan: Memo<Vec<WeekSummary>>,
    board: RwSignal<TaskBoard>,
    on_close: WriteSignal<Option<i32>>,
) -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();

    let summary = move || plan.with(|p| p.iter().find(|w| w.week == week).cloned());
    let theme = move || summary().map(|w| w.theme).unwrap_or_default();
    let task_ids = move || {
        summary()
            .map(|w| w.tasks.iter().map(|t| (t.id, t.title.clone())).collect::<Vec<_>>())
            .unwrap_or_default()
    };
    let videos = move || summary().map(|w| w.videos).unwrap_or_default();

    let on_toggle = move |id: Id| {
        let api = auth.api();
        spawn_local(async move {
            match toggle_task(&BoardSignal(board), &api, id).await {
                Ok(ticket) => {
                    tracing::debug!(task = id, completed = ticket.requested, "task toggled");
                }
                // 复选框在请求期间已禁用，重复点击直接忽略
                Err(ToggleError::InFlight(_)) => {}
                Err(ToggleError::Rejected { source, .. }) => {
                    auth.observe("toggle task", &source);
                    notifier.api_error("Failed to update task", &source);
                }
                Err(e) => tracing::warn!(error = %e, "toggle ignored"),
            }
        });
    };

    view! {
        <div class="modal modal-open" role="dialog">
            <div class="modal-box max-w-xl">
                <div class="flex items-center justify-between mb-3">
                    <h3 class="text-base font-semibold">
                        {move || format!("Week {}: {}", week, theme())}
                    </h3>
                    <button class="btn btn-ghost btn-sm" on:click=move |_| on_close.set(None)>
                        "Close"
                    </button>
                </div>

                <div class="space-y-4 max-h-[65vh] overflow-y-auto pr-1">
                    <div>
                        <p class="text-xs font-semibold mb-2">"Checklist"</p>
                        <Show
                            when=move || !task_ids().is_empty()
                            fallback=|| view! { <p class="text-xs text-base-content/60">"No tasks for this week."</p> }
                        >
                            <ul class="space-y-2">
                                <For
                                    each=task_ids
                                    key=|(id, _)| *id
                                    children=move |(id, title)| {
                                        let completed = move || {
                                            board.with(|b| b.get(id).is_some_and(|t| t.completed))
                                        };
                                        let pending = move || board.with(|b| b.is_pending(id));
                                        view! {
                                            <li class="flex items-start gap-2">
                                                <input
                                                    type="checkbox"
                                                    class="checkbox checkbox-sm mt-0.5"
                                                    prop:checked=completed
                                                    disabled=pending
                                                    on:change=move |_| on_toggle(id)
                                                />
                                                <span class=move || {
                                                    if completed() { "text-sm line-through opacity-60" } else { "text-sm" }
                                                }>{title}</span>
                                            </li>
                                        }
                                    }
                                />
                            </ul>
                        </Show>
                    </div>

                    <div>
                        <p class="text-xs font-semibold mb-2">"Curated videos"</p>
                        <Show
                            when=move || !videos().is_empty()
                            fallback=|| view! { <p class="text-xs text-base-content/60">"No videos linked for this week."</p> }
                        >
                            <ul class="list-disc pl-5 space-y-1">
                                {move || {
                                    videos()
                                        .into_iter()
                                        .map(|url| view! {
                                            <li class="text-sm">
                                                <a href=url.clone() target="_blank" rel="noopener noreferrer" class="link break-all">
                                                    {url.clone()}
                                                </a>
                                            </li>
                                        })
                                        .collect_view()
                                }}
                            </ul>
                        </Show>
                    </div>
                </div>
            </div>
            <div class="modal-backdrop" on:click=move |_| on_close.set(None)></div>
        </div>
    }
}
