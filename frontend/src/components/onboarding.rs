use crate::auth::use_auth;
use crate::notify::use_notifier;
use goalpad_shared::{RoadmapRequest, TOTAL_WEEKS};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 首次使用：输入主题并生成路线图
#[component]
pub fn OnboardingFlow(on_complete: Callback<()>) -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();

    let (topic, set_topic) = signal(String::new());
    let (loading, set_loading) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let req = match RoadmapRequest::new(&topic.get_untracked(), "") {
            Ok(req) => req,
            Err(e) => {
                notifier.api_error("Enter a topic", &e);
                return;
            }
        };

        set_loading.set(true);
        let api = auth.api();
        spawn_local(async move {
            match auth.check("generate roadmap", api.generate_roadmap(&req).await) {
                Ok(goal) => {
                    tracing::info!(topic = %goal.topic, "roadmap generated");
                    notifier.success("Roadmap generated");
                    on_complete.run(());
                }
                Err(e) => notifier.api_error("Generate roadmap failed", &e),
            }
            set_loading.set(false);
        });
    };

    view! {
        <div class="min-h-[70vh] grid place-items-center">
            <div class="card w-full max-w-xl bg-base-100 shadow-xl">
                <div class="card-body">
                    <h2 class="card-title">"What topic do you want to learn in 6 months?"</h2>
                    <p class="text-sm text-base-content/60">
                        {format!("We'll generate a structured {}-week plan.", TOTAL_WEEKS)}
                    </p>
                    <form class="space-y-3 mt-2" on:submit=on_submit>
                        <input
                            type="text"
                            placeholder="e.g., Production FastAPI and PostgreSQL"
                            class="input input-bordered w-full"
                            on:input=move |ev| set_topic.set(event_target_value(&ev))
                            prop:value=topic
                            required
                        />
                        <div class="flex justify-end">
                            <button type="submit" class="btn btn-primary" disabled=move || loading.get()>
                                {move || if loading.get() { "Generating…" } else { "Generate Roadmap" }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
