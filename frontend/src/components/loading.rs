use leptos::prelude::*;

#[component]
pub fn LoadingSpinner(#[prop(optional, into)] label: Option<String>) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[40vh] gap-3">
            <span class="loading loading-spinner loading-lg text-primary"></span>
            {label.map(|text| view! { <p class="text-sm text-base-content/60">{text}</p> })}
        </div>
    }
}
