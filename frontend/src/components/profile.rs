//! 个人资料：修改昵称、修改密码（仅本地校验）、删除账户

use crate::auth::use_auth;
use crate::components::icons::{Edit, Trash2, UserIcon};
use crate::notify::use_notifier;
use crate::web::confirm;
use goalpad_shared::PasswordChange;
use goalpad_shared::date::format_month_year;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();

    let (editing, set_editing) = signal(false);
    let (name, set_name) = signal(String::new());
    let (saving, set_saving) = signal(false);
    let (password_open, set_password_open) = signal(false);
    let (deleting, set_deleting) = signal(false);

    let user = move || auth.user();
    let member_since = move || {
        user()
            .and_then(|u| u.created_at)
            .and_then(|s| format_month_year(&s))
            .unwrap_or_else(|| "N/A".to_string())
    };

    let start_edit = move |_| {
        set_name.set(user().and_then(|u| u.name).unwrap_or_default());
        set_editing.set(true);
    };

    let save_name = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let value = name.get_untracked().trim().to_string();
        set_saving.set(true);
        let api = auth.api();
        spawn_local(async move {
            match auth.check("update profile", api.update_profile(value).await) {
                Ok(updated) => {
                    auth.set_user(updated);
                    set_editing.set(false);
                    notifier.success("Profile updated successfully!");
                }
                Err(e) => notifier.api_error("Failed to update profile", &e),
            }
            set_saving.set(false);
        });
    };

    let delete_account = move |_| {
        if !confirm("Are you sure you want to delete your account? This action cannot be undone.") {
            return;
        }
        set_deleting.set(true);
        let api = auth.api();
        spawn_local(async move {
            match auth.check("delete account", api.delete_account().await) {
                Ok(_) => {
                    notifier.success("Account deleted successfully");
                    auth.logout();
                }
                Err(e) => {
                    notifier.api_error("Failed to delete account", &e);
                    set_deleting.set(false);
                }
            }
        });
    };

    view! {
        <div class="max-w-2xl mx-auto space-y-4">
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <div class="flex items-center gap-4">
                        <div class="avatar placeholder">
                            <div class="bg-neutral text-neutral-content rounded-full w-16 grid place-items-center">
                                <UserIcon attr:class="h-8 w-8" />
                            </div>
                        </div>
                        <div class="flex-1 min-w-0">
                            <Show
                                when=move || editing.get()
                                fallback=move || view! {
                                    <div class="flex items-center gap-2">
                                        <h2 class="text-xl font-semibold truncate">
                                            {move || user().map(|u| u.display_name().to_string()).unwrap_or_default()}
                                        </h2>
                                        <button class="btn btn-ghost btn-xs" title="Edit name" on:click=start_edit>
                                            <Edit attr:class="h-3 w-3" />
                                        </button>
                                    </div>
                                }
                            >
                                <form class="flex gap-2" on:submit=save_name>
                                    <input
                                        type="text"
                                        class="input input-bordered input-sm flex-1"
                                        placeholder="Your name"
                                        prop:value=name
                                        on:input=move |ev| set_name.set(event_target_value(&ev))
                                    />
                                    <button type="submit" class="btn btn-sm btn-primary" disabled=move || saving.get()>
                                        "Save"
                                    </button>
                                    <button type="button" class="btn btn-sm btn-ghost" on:click=move |_| set_editing.set(false)>
                                        "Cancel"
                                    </button>
                                </form>
                            </Show>
                            <p class="text-sm text-base-content/60">
                                {move || user().map(|u| format!("@{}", u.username)).unwrap_or_default()}
                            </p>
                        </div>
                    </div>

                    <div class="divider my-2"></div>

                    <dl class="grid grid-cols-1 sm:grid-cols-2 gap-3 text-sm">
                        <div>
                            <dt class="text-base-content/60">"Email"</dt>
                            <dd>{move || user().map(|u| u.email).unwrap_or_default()}</dd>
                        </div>
                        <div>
                            <dt class="text-base-content/60">"Member since"</dt>
                            <dd>{member_since}</dd>
                        </div>
                    </dl>
                </div>
            </div>

            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h3 class="card-title text-base">"Security"</h3>
                    <div class="flex flex-wrap gap-2">
                        <button class="btn btn-outline btn-sm" on:click=move |_| set_password_open.set(true)>
                            "Change Password"
                        </button>
                        <button
                            class="btn btn-error btn-outline btn-sm"
                            disabled=move || deleting.get()
                            on:click=delete_account
                        >
                            <Trash2 attr:class="h-4 w-4" />
                            "Delete Account"
                        </button>
                    </div>
                </div>
            </div>

            <Show when=move || password_open.get()>
                <PasswordDialog on_close=Callback::new(move |_| set_password_open.set(false)) />
            </Show>
        </div>
    }
}

#[component]
fn PasswordDialog(on_close: Callback<()>) -> impl IntoView {
    let notifier = use_notifier();
    let form = RwSignal::new(PasswordChange::default());

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        // 没有对应的后端接口，校验通过即视为成功
        match form.with_untracked(PasswordChange::validate) {
            Ok(()) => {
                notifier.success("Password updated successfully!");
                on_close.run(());
            }
            Err(e) => notifier.api_error("Failed to update password", &e),
        }
    };

    view! {
        <div class="modal modal-open" role="dialog">
            <div class="modal-box max-w-sm">
                <h3 class="font-bold text-lg mb-3">"Change Password"</h3>
                <form class="space-y-3" on:submit=on_submit>
                    <input
                        type="password"
                        class="input input-bordered w-full"
                        placeholder="Current password"
                        autocomplete="current-password"
                        on:input=move |ev| form.update(|f| f.current = event_target_value(&ev))
                    />
                    <input
                        type="password"
                        class="input input-bordered w-full"
                        placeholder="New password"
                        autocomplete="new-password"
                        on:input=move |ev| form.update(|f| f.new = event_target_value(&ev))
                    />
                    <input
                        type="password"
                        class="input input-bordered w-full"
                        placeholder="Confirm new password"
                        autocomplete="new-password"
                        on:input=move |ev| form.update(|f| f.confirm = event_target_value(&ev))
                    />
                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| on_close.run(())>
                            "Cancel"
                        </button>
                        <button type="submit" class="btn btn-primary">"Update Password"</button>
                    </div>
                </form>
            </div>
            <div class="modal-backdrop" on:click=move |_| on_close.run(())></div>
        </div>
    }
}
