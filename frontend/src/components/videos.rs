//! 每周视频链接，附带 AI 摘要与问答
//!
//! 链接来自路线图；摘要和问答以"第 N 周主题 + 链接"作为上下文。

use crate::auth::use_auth;
use crate::components::icons::ExternalLink;
use crate::components::loading::LoadingSpinner;
use crate::notify::use_notifier;
use goalpad_shared::progress::{WeekSummary, weekly_plan};
use goalpad_shared::{VideoQuestionRequest, VideoSummaryRequest};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 当前选中的视频
#[derive(Debug, Clone, PartialEq)]
struct VideoRef {
    week: i32,
    theme: String,
    url: String,
}

impl VideoRef {
    fn title(&self) -> String {
        if self.theme.is_empty() {
            format!("Week {}", self.week)
        } else {
            format!("Week {}: {}", self.week, self.theme)
        }
    }

    fn context(&self) -> String {
        format!("{} ({})", self.title(), self.url)
    }
}

#[component]
pub fn VideosPage() -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();

    let (weeks, set_weeks) = signal(Vec::<WeekSummary>::new());
    let (loading, set_loading) = signal(true);
    let selected = RwSignal::new(Option::<VideoRef>::None);

    let api = auth.api();
    spawn_local(async move {
        match auth.check("load videos", api.get_dashboard().await) {
            Ok(dashboard) => {
                // 只列出路线图中出现过的周
                let listed: Vec<WeekSummary> = weekly_plan(&[], dashboard.roadmap())
                    .into_iter()
                    .filter(|w| dashboard.roadmap().is_some_and(|r| r.week(w.week).is_some()))
                    .collect();
                set_weeks.set(listed);
            }
            Err(e) => notifier.api_error("Failed to load videos", &e),
        }
        set_loading.set(false);
    });

    view! {
        <Show when=move || !loading.get() fallback=|| view! { <LoadingSpinner /> }>
            <div class="grid grid-cols-1 xl:grid-cols-3 gap-4">
                <div class="card bg-base-100 shadow xl:col-span-2">
                    <div class="card-body">
                        <h2 class="card-title">"Weekly YouTube Links"</h2>
                        <Show
                            when=move || !weeks.with(Vec::is_empty)
                            fallback=|| view! {
                                <p class="text-sm text-base-content/60">
                                    "No links available yet. Generate a roadmap first."
                                </p>
                            }
                        >
                            <div class="space-y-4">
                                <For
                                    each=move || weeks.get()
                                    key=|w| w.week
                                    children=move |w| view! { <WeekLinks week=w selected=selected /> }
                                />
                            </div>
                        </Show>
                    </div>
                </div>
                <VideoAssistant selected=selected />
            </div>
        </Show>
    }
}

#[component]
fn WeekLinks(week: WeekSummary, selected: RwSignal<Option<VideoRef>>) -> impl IntoView {
    let count = week.videos.len();
    let header = if week.theme.is_empty() {
        format!("Week {}", week.week)
    } else {
        format!("Week {} — {}", week.week, week.theme)
    };

    let links = week
        .videos
        .iter()
        .map(|url| {
            let video = VideoRef {
                week: week.week,
                theme: week.theme.clone(),
                url: url.clone(),
            };
            let is_selected = {
                let video = video.clone();
                move || selected.with(|s| s.as_ref() == Some(&video))
            };
            view! {
                <li class="flex items-center gap-2 text-sm">
                    <a href=url.clone() target="_blank" rel="noreferrer" class="link break-all flex-1">
                        {url.clone()}
                    </a>
                    <ExternalLink attr:class="h-3 w-3 opacity-50" />
                    <button
                        class=move || if is_selected() { "btn btn-xs btn-primary" } else { "btn btn-xs btn-ghost" }
                        on:click=move |_| selected.set(Some(video.clone()))
                    >
                        "Ask AI"
                    </button>
                </li>
            }
        })
        .collect_view();

    view! {
        <div class="border border-base-300 rounded-lg p-3">
            <div class="flex items-center justify-between mb-2">
                <h3 class="font-semibold">{header}</h3>
                <span class="text-xs text-base-content/60">{format!("{} links", count)}</span>
            </div>
            <ul class="space-y-1">
                {(count == 0).then(|| view! { <li class="text-sm text-base-content/40">"No videos suggested"</li> })}
                {links}
            </ul>
        </div>
    }
}

#[component]
fn VideoAssistant(selected: RwSignal<Option<VideoRef>>) -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();

    let (summary, set_summary) = signal(Option::<String>::None);
    let (question, set_question) = signal(String::new());
    let (answer, set_answer) = signal(Option::<String>::None);
    let (busy, set_busy) = signal(false);

    // 切换视频时清空上一段对话
    Effect::new(move |_| {
        selected.track();
        set_summary.set(None);
        set_answer.set(None);
        set_question.set(String::new());
    });

    let summarize = move |_| {
        let Some(video) = selected.get_untracked() else {
            return;
        };
        set_busy.set(true);
        let api = auth.api();
        spawn_local(async move {
            let req = VideoSummaryRequest {
                video_title: video.title(),
                video_description: Some(video.url.clone()),
            };
            match auth.check("summarize video", api.video_summary(&req).await) {
                Ok(resp) => set_summary.set(Some(resp.summary)),
                Err(e) => notifier.api_error("Failed to summarize video", &e),
            }
            set_busy.set(false);
        });
    };

    let ask = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(video) = selected.get_untracked() else {
            return;
        };
        let text = question.get_untracked().trim().to_string();
        if text.is_empty() {
            notifier.error("Type a question first");
            return;
        }
        set_busy.set(true);
        let api = auth.api();
        spawn_local(async move {
            let req = VideoQuestionRequest {
                question: text,
                video_context: video.context(),
            };
            match auth.check("answer question", api.answer_question(&req).await) {
                Ok(resp) => set_answer.set(Some(resp.answer)),
                Err(e) => notifier.api_error("Failed to answer question", &e),
            }
            set_busy.set(false);
        });
    };

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body gap-3">
                <h2 class="card-title">"Video Assistant"</h2>
                <Show
                    when=move || selected.with(Option::is_some)
                    fallback=|| view! {
                        <p class="text-sm text-base-content/60">"Pick a video to get a summary or ask a question."</p>
                    }
                >
                    <p class="text-sm font-medium">
                        {move || selected.get().map(|v| v.title()).unwrap_or_default()}
                    </p>
                    <button class="btn btn-sm btn-outline" disabled=move || busy.get() on:click=summarize>
                        "Summarize"
                    </button>
                    {move || summary.get().map(|text| view! {
                        <div class="bg-base-200 rounded-lg p-3 text-sm whitespace-pre-line">{text}</div>
                    })}
                    <form class="flex gap-2" on:submit=ask>
                        <input
                            type="text"
                            class="input input-bordered input-sm flex-1"
                            placeholder="Ask about this video"
                            on:input=move |ev| set_question.set(event_target_value(&ev))
                            prop:value=question
                        />
                        <button type="submit" class="btn btn-sm btn-primary" disabled=move || busy.get()>
                            "Ask"
                        </button>
                    </form>
                    {move || answer.get().map(|text| view! {
                        <div class="bg-base-200 rounded-lg p-3 text-sm whitespace-pre-line">{text}</div>
                    })}
                </Show>
            </div>
        </div>
    }
}
