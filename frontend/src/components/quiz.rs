//! 测验：按难度与周范围生成，逐题作答，结束后本地计分

use crate::auth::use_auth;
use crate::components::icons::{Check, XIcon};
use crate::notify::use_notifier;
use goalpad_shared::quiz::{QuizSession, quiz_request};
use goalpad_shared::{Difficulty, QuizQuestion, TOTAL_WEEKS};
use leptos::prelude::*;
use leptos::task::spawn_local;

fn option_letter(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}

#[component]
pub fn QuizPage() -> impl IntoView {
    let auth = use_auth();

    let session = RwSignal::new(Option::<QuizSession>::None);
    let (topic, set_topic) = signal(String::new());

    // 主题取自当前学习目标
    let api = auth.api();
    spawn_local(async move {
        if let Ok(dashboard) = auth.check("load quiz topic", api.get_dashboard().await) {
            if let Some(goal) = dashboard.learning_goal {
                set_topic.set(goal.topic);
            }
        }
    });

    view! {
        {move || {
            if session.with(Option::is_none) {
                view! { <QuizSetup topic=topic session=session /> }.into_any()
            } else if session.with(|s| s.as_ref().is_some_and(QuizSession::is_finished)) {
                view! { <QuizResults session=session /> }.into_any()
            } else {
                view! { <QuizRunner session=session /> }.into_any()
            }
        }}
    }
}

#[component]
fn QuizSetup(topic: ReadSignal<String>, session: RwSignal<Option<QuizSession>>) -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();

    let (week_end, set_week_end) = signal(TOTAL_WEEKS);
    let (difficulty, set_difficulty) = signal(Difficulty::default());
    let (loading, set_loading) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let req = match quiz_request(
            &topic.get_untracked(),
            difficulty.get_untracked(),
            week_end.get_untracked(),
        ) {
            Ok(req) => req,
            Err(e) => {
                notifier.api_error("Invalid quiz settings", &e);
                return;
            }
        };

        set_loading.set(true);
        let api = auth.api();
        spawn_local(async move {
            match auth.check("generate quiz", api.generate_quiz(&req).await) {
                Ok(quiz) if quiz.questions.is_empty() => {
                    notifier.error("The generated quiz has no questions. Please try again.");
                }
                Ok(quiz) => {
                    tracing::info!(questions = quiz.questions.len(), "quiz generated");
                    session.set(Some(QuizSession::new(quiz)));
                    notifier.success("Quiz generated successfully!");
                }
                Err(e) => notifier.api_error("Failed to generate quiz. Please try again.", &e),
            }
            set_loading.set(false);
        });
    };

    view! {
        <div class="max-w-2xl mx-auto">
            <div class="text-center mb-6">
                <h1 class="text-2xl font-bold mb-2">"Quiz Bomber"</h1>
                <p class="text-base-content/60">
                    {move || {
                        let t = topic.get();
                        if t.is_empty() { "Topic from your plan".to_string() } else { format!("Topic: {}", t) }
                    }}
                </p>
            </div>

            <div class="card bg-base-100 shadow">
                <form class="card-body space-y-4" on:submit=on_submit>
                    <div>
                        <label class="label" for="weeks">
                            <span class="label-text">{format!("Weeks to include (1–{})", TOTAL_WEEKS)}</span>
                        </label>
                        <div class="flex items-center gap-3">
                            <input
                                id="weeks"
                                type="range"
                                min="1"
                                max=TOTAL_WEEKS.to_string()
                                class="range range-sm flex-1"
                                prop:value=move || week_end.get().to_string()
                                on:input=move |ev| {
                                    if let Ok(v) = event_target_value(&ev).parse::<i32>() {
                                        set_week_end.set(v);
                                    }
                                }
                            />
                            <span class="text-xs text-base-content/60 w-16 text-right">
                                {move || format!("1–{}", week_end.get())}
                            </span>
                        </div>
                        <p class="text-xs text-base-content/50 mt-1">
                            "Questions will focus on the themes and tasks covered in these weeks."
                        </p>
                    </div>

                    <div>
                        <span class="label-text">"Difficulty"</span>
                        <div class="join w-full mt-1">
                            {Difficulty::ALL
                                .into_iter()
                                .map(|level| view! {
                                    <button
                                        type="button"
                                        class=move || if difficulty.get() == level {
                                            "btn join-item flex-1 btn-neutral capitalize"
                                        } else {
                                            "btn join-item flex-1 capitalize"
                                        }
                                        on:click=move |_| set_difficulty.set(level)
                                    >
                                        {level.as_str()}
                                    </button>
                                })
                                .collect_view()}
                        </div>
                    </div>

                    <button type="submit" class="btn btn-primary w-full" disabled=move || loading.get()>
                        {move || if loading.get() {
                            view! { <span class="loading loading-spinner"></span> "Generating..." }.into_any()
                        } else {
                            "Generate Quiz".into_any()
                        }}
                    </button>
                </form>
            </div>
        </div>
    }
}

#[component]
fn QuizRunner(session: RwSignal<Option<QuizSession>>) -> impl IntoView {
    let current = move || {
        session.with(|s| {
            s.as_ref().and_then(|s| {
                s.current_question()
                    .cloned()
                    .map(|q| (s.current_index(), q, s.answer(s.current_index())))
            })
        })
    };
    let header = move || {
        session.with(|s| {
            s.as_ref()
                .map(|s| {
                    let n = s.current_index() + 1;
                    format!("{} • Q{}/{}", s.quiz().difficulty, n, s.len())
                })
                .unwrap_or_default()
        })
    };
    let position = move || {
        session.with(|s| s.as_ref().map(QuizSession::position_percent).unwrap_or(0))
    };
    let is_first = move || session.with(|s| s.as_ref().is_none_or(|s| s.current_index() == 0));
    let is_last = move || session.with(|s| s.as_ref().is_some_and(QuizSession::is_last));

    let render_question = move |(index, question, answer): (usize, QuizQuestion, Option<usize>)| {
        let options = question
            .options
            .iter()
            .enumerate()
            .map(|(opt, text)| {
                let chosen = answer == Some(opt);
                let class = if chosen {
                    "flex items-center gap-3 p-3 rounded-lg border cursor-pointer \
                     border-neutral bg-neutral text-neutral-content"
                } else {
                    "flex items-center gap-3 p-3 rounded-lg border cursor-pointer \
                     border-base-300 hover:border-neutral"
                };
                view! {
                    <label class=class>
                        <input
                            type="radio"
                            class="hidden"
                            name=format!("question-{}", index)
                            prop:checked=chosen
                            on:change=move |_| session.update(|s| {
                                if let Some(s) = s {
                                    s.select(index, opt);
                                }
                            })
                        />
                        <span class="text-sm">{format!("{}. {}", option_letter(opt), text)}</span>
                    </label>
                }
            })
            .collect_view();

        view! {
            <h2 class="text-lg font-semibold mb-4">{question.question.clone()}</h2>
            <div class="space-y-2">{options}</div>
        }
    };

    view! {
        <div class="max-w-2xl mx-auto space-y-4">
            <div class="flex items-center justify-between">
                <p class="text-sm text-base-content/60 capitalize">{header}</p>
                <button class="btn btn-sm btn-ghost" on:click=move |_| session.set(None)>
                    "New Quiz"
                </button>
            </div>

            <div>
                <progress class="progress progress-primary w-full" max="100" value=move || position().to_string()></progress>
                <p class="text-xs text-base-content/60">{move || format!("{}% Complete", position())}</p>
            </div>

            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    {move || current().map(render_question)}
                </div>
            </div>

            <div class="flex justify-between">
                <button
                    class="btn btn-outline"
                    disabled=is_first
                    on:click=move |_| session.update(|s| {
                        if let Some(s) = s {
                            s.previous();
                        }
                    })
                >
                    "Previous"
                </button>
                <button
                    class="btn btn-primary"
                    on:click=move |_| session.update(|s| {
                        if let Some(s) = s {
                            s.next();
                        }
                    })
                >
                    {move || if is_last() { "Finish" } else { "Next" }}
                </button>
            </div>
        </div>
    }
}

#[component]
fn QuizResults(session: RwSignal<Option<QuizSession>>) -> impl IntoView {
    let Some(snapshot) = session.get_untracked() else {
        return ().into_any();
    };

    let rows = snapshot
        .quiz()
        .questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let user_answer = snapshot.answer(index);
            let correct = snapshot.is_correct(index);
            let options = question
                .options
                .iter()
                .enumerate()
                .map(|(opt, text)| {
                    let is_right = opt == question.correct_answer;
                    let class = if is_right {
                        "px-2 py-1 rounded bg-success/20"
                    } else if user_answer == Some(opt) {
                        "px-2 py-1 rounded bg-error/20"
                    } else {
                        "px-2 py-1 rounded bg-base-200"
                    };
                    view! { <div class=class>{format!("{}. {}", option_letter(opt), text)}</div> }
                })
                .collect_view();

            view! {
                <div class=if correct { "border border-success rounded-lg p-3" } else { "border border-error rounded-lg p-3" }>
                    <div class="flex items-start gap-2 mb-2">
                        {if correct {
                            view! { <Check attr:class="h-4 w-4 text-success shrink-0 mt-0.5" /> }.into_any()
                        } else {
                            view! { <XIcon attr:class="h-4 w-4 text-error shrink-0 mt-0.5" /> }.into_any()
                        }}
                        <p class="font-medium text-sm">{question.question.clone()}</p>
                    </div>
                    <div class="space-y-1 text-sm">{options}</div>
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="max-w-2xl mx-auto card bg-base-100 shadow">
            <div class="card-body">
                <div class="text-center">
                    <div class="text-4xl font-bold">{format!("{}%", snapshot.percent())}</div>
                    <p class="text-base-content/60">
                        {format!("You scored {} out of {}", snapshot.score(), snapshot.len())}
                    </p>
                </div>
                <div class="space-y-3 mt-4">{rows}</div>
                <div class="flex gap-2 justify-center mt-4">
                    <button class="btn btn-primary" on:click=move |_| session.set(None)>
                        "New Quiz"
                    </button>
                    <button
                        class="btn btn-outline"
                        on:click=move |_| session.update(|s| {
                            if let Some(s) = s {
                                s.review();
                            }
                        })
                    >
                        "Review Answers"
                    </button>
                </div>
            </div>
        </div>
    }
    .into_any()
}
