use crate::auth::use_auth;
use crate::components::icons::Target;
use crate::notify::use_notifier;
use goalpad_shared::{ApiError, LoginRequest, RegisterRequest};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 登录页的错误文案；登录接口的 401 表示凭据错误而不是会话过期
fn auth_error_message(err: &ApiError) -> String {
    match err {
        ApiError::Validation(msg) => msg.clone(),
        ApiError::Unauthorized { .. } => "Incorrect username or password".to_string(),
        ApiError::Status { message, .. } if !message.is_empty() => message.clone(),
        _ => "Authentication failed".to_string(),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();

    let (is_login, set_is_login) = signal(true);
    let (name, set_name) = signal(String::new());
    let (username, set_username) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let reset_form = move || {
        set_name.set(String::new());
        set_username.set(String::new());
        set_email.set(String::new());
        set_password.set(String::new());
        set_error_msg.set(None);
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }
        set_is_submitting.set(true);
        set_error_msg.set(None);

        let login_mode = is_login.get_untracked();
        let username = username.get_untracked();
        let password = password.get_untracked();
        let email = email.get_untracked();
        let name = name.get_untracked();

        spawn_local(async move {
            let result = if login_mode {
                auth.login(LoginRequest { username, password }).await
            } else {
                let name = Some(name.trim().to_string()).filter(|n| !n.is_empty());
                auth.register(RegisterRequest {
                    username: username.trim().to_string(),
                    email: email.trim().to_string(),
                    password,
                    name,
                })
                .await
            };

            match result {
                // 路由服务监听到认证状态变化后会跳转到面板
                Ok(()) => notifier.success(if login_mode {
                    "Welcome back!"
                } else {
                    "Account created"
                }),
                Err(e) => {
                    tracing::info!(error = %e, login = login_mode, "authentication failed");
                    set_error_msg.set(Some(auth_error_message(&e)));
                }
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-sm">
                <div class="text-center mb-2">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <Target attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-2xl font-bold">
                            {move || if is_login.get() { "Welcome back" } else { "Create your account" }}
                        </h1>
                        <p class="text-base-content/70 text-sm">
                            {move || if is_login.get() { "Sign in to continue" } else { "It takes less than a minute" }}
                        </p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body gap-3" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <Show when=move || !is_login.get()>
                            <input
                                type="text"
                                placeholder="Full name (optional)"
                                on:input=move |ev| set_name.set(event_target_value(&ev))
                                prop:value=name
                                class="input input-bordered"
                            />
                        </Show>
                        <input
                            type="text"
                            placeholder="Username"
                            autocomplete="username"
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            prop:value=username
                            class="input input-bordered"
                            required
                        />
                        <Show when=move || !is_login.get()>
                            <input
                                type="email"
                                placeholder="Email"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </Show>
                        <input
                            type="password"
                            placeholder="Password"
                            autocomplete=move || if is_login.get() { "current-password" } else { "new-password" }
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            prop:value=password
                            class="input input-bordered"
                            required
                        />
                        <button class="btn btn-primary mt-2" disabled=move || is_submitting.get()>
                            {move || if is_submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "Please wait..." }.into_any()
                            } else if is_login.get() {
                                "Sign in".into_any()
                            } else {
                                "Sign up".into_any()
                            }}
                        </button>
                    </form>
                </div>

                <button
                    type="button"
                    class="link text-sm"
                    on:click=move |_| {
                        set_is_login.update(|v| *v = !*v);
                        reset_form();
                    }
                >
                    {move || if is_login.get() {
                        "Don't have an account? Sign up"
                    } else {
                        "Already have an account? Sign in"
                    }}
                </button>
            </div>
        </div>
    }
}
