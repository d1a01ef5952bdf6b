//! 学习记录汇总：累计数据、最近活跃度和即将到来的日程

use goalpad_shared::date::{display_date, is_upcoming, parse_day};
use goalpad_shared::progress::{activity_level, progress_totals};
use goalpad_shared::{Progress, Schedule};
use leptos::prelude::*;

/// 最近活跃度展示的天数
const RECENT_DAYS: usize = 14;

/// 浏览器本地日期
fn today() -> Option<chrono::NaiveDate> {
    let now = js_sys::Date::new_0();
    chrono::NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
}

fn level_class(level: u8) -> &'static str {
    match level {
        0 => "bg-base-300",
        1 => "bg-success/30",
        2 => "bg-success/50",
        3 => "bg-success/75",
        _ => "bg-success",
    }
}

#[component]
pub fn ProgressSummary(
    progress: Signal<Vec<Progress>>,
    schedule: Signal<Vec<Schedule>>,
) -> impl IntoView {
    let totals = move || progress.with(|p| progress_totals(p));

    // 按日期排序后取最近若干天
    let recent = move || {
        let mut entries = progress.get();
        entries.sort_by_key(|p| parse_day(&p.date));
        let skip = entries.len().saturating_sub(RECENT_DAYS);
        entries.into_iter().skip(skip).collect::<Vec<_>>()
    };

    let upcoming = move || {
        let items = schedule.get();
        match today() {
            Some(day) => items.into_iter().filter(|s| is_upcoming(&s.date, day)).collect(),
            None => items,
        }
    };

    view! {
        <div class="grid grid-cols-1 lg:grid-cols-2 gap-4">
            <div class="card bg-base-100 shadow">
                <div class="card-body p-4">
                    <h2 class="text-sm font-semibold">"Learning Activity"</h2>
                    <div class="stats stats-horizontal">
                        <div class="stat px-2">
                            <div class="stat-title text-xs">"Tasks completed"</div>
                            <div class="stat-value text-lg">{move || totals().tasks_completed}</div>
                        </div>
                        <div class="stat px-2">
                            <div class="stat-title text-xs">"Study hours"</div>
                            <div class="stat-value text-lg">{move || format!("{:.1}", totals().study_hours)}</div>
                        </div>
                        <div class="stat px-2">
                            <div class="stat-title text-xs">"Notes created"</div>
                            <div class="stat-value text-lg">{move || totals().notes_created}</div>
                        </div>
                    </div>
                    <Show
                        when=move || !progress.with(Vec::is_empty)
                        fallback=|| view! { <p class="text-xs text-base-content/60">"No activity recorded yet."</p> }
                    >
                        <div class="flex gap-1 flex-wrap">
                            {move || {
                                recent()
                                    .into_iter()
                                    .map(|entry| {
                                        let class = format!("h-4 w-4 rounded {}", level_class(activity_level(Some(&entry))));
                                        view! { <div class=class title=display_date(&entry.date)></div> }
                                    })
                                    .collect_view()
                            }}
                        </div>
                    </Show>
                </div>
            </div>

            <div class="card bg-base-100 shadow">
                <div class="card-body p-4">
                    <h2 class="text-sm font-semibold">"Upcoming Schedule"</h2>
                    <Show
                        when=move || !upcoming().is_empty()
                        fallback=|| view! { <p class="text-xs text-base-content/60">"Nothing scheduled."</p> }
                    >
                        <ul class="space-y-1">
                            {move || {
                                upcoming()
                                    .into_iter()
                                    .map(|item| view! {
                                        <li class="flex justify-between text-sm">
                                            <span>{item.title}</span>
                                            <span class="text-base-content/60">{display_date(&item.date)}</span>
                                        </li>
                                    })
                                    .collect_view()
                            }}
                        </ul>
                    </Show>
                </div>
            </div>
        </div>
    }
}
