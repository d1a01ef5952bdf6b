use crate::auth::use_auth;
use crate::components::loading::LoadingSpinner;
use crate::notify::use_notifier;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use goalpad_shared::RoadmapRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 修改学习目标并重新生成整个路线图
#[component]
pub fn EditPlanPage() -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();
    let router = use_router();

    let (topic, set_topic) = signal(String::new());
    let (details, set_details) = signal(String::new());
    let (initial_loading, set_initial_loading) = signal(true);
    let (saving, set_saving) = signal(false);

    // 用当前目标预填表单；失败时留空
    let api = auth.api();
    spawn_local(async move {
        if let Ok(dashboard) = auth.check("load current plan", api.get_dashboard().await) {
            if let Some(goal) = dashboard.learning_goal {
                set_topic.set(goal.topic);
                set_details.set(goal.details.unwrap_or_default());
            }
        }
        set_initial_loading.set(false);
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let req = match RoadmapRequest::new(&topic.get_untracked(), &details.get_untracked()) {
            Ok(req) => req,
            Err(e) => {
                notifier.api_error("Please enter a topic", &e);
                return;
            }
        };

        set_saving.set(true);
        let api = auth.api();
        spawn_local(async move {
            match auth.check("regenerate roadmap", api.generate_roadmap(&req).await) {
                Ok(_) => {
                    notifier.success("Plan updated!");
                    router.navigate(AppRoute::Dashboard);
                }
                Err(e) => notifier.api_error("Failed to update plan", &e),
            }
            set_saving.set(false);
        });
    };

    view! {
        <Show
            when=move || !initial_loading.get()
            fallback=|| view! { <LoadingSpinner label="Loading current plan…" /> }
        >
            <div class="max-w-2xl">
                <h2 class="text-xl font-semibold mb-4">"Edit Plan"</h2>
                <form class="space-y-4" on:submit=on_submit>
                    <div class="form-control">
                        <label class="label" for="topic">
                            <span class="label-text">"Topic"</span>
                        </label>
                        <input
                            id="topic"
                            type="text"
                            placeholder="e.g., Full-stack Python with Django"
                            class="input input-bordered w-full"
                            on:input=move |ev| set_topic.set(event_target_value(&ev))
                            prop:value=topic
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="details">
                            <span class="label-text">"Additional details (optional)"</span>
                        </label>
                        <textarea
                            id="details"
                            placeholder="Any constraints, timeline notes, or preferences"
                            class="textarea textarea-bordered w-full h-28"
                            on:input=move |ev| set_details.set(event_target_value(&ev))
                            prop:value=details
                        ></textarea>
                    </div>
                    <p class="text-xs text-base-content/60">
                        "Saving regenerates your roadmap from this topic."
                    </p>
                    <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                        {move || if saving.get() { "Saving…" } else { "Save Changes" }}
                    </button>
                </form>
            </div>
        </Show>
    }
}
