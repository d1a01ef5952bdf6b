//! 已登录页面的布局：左侧可折叠侧边栏 + 内容区

use crate::auth::use_auth;
use crate::components::icons::*;
use crate::web::route::AppRoute;
use crate::web::router::Link;
use leptos::prelude::*;

fn route_icon(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Dashboard => view! { <Home attr:class="h-4 w-4 shrink-0" /> }.into_any(),
        AppRoute::Videos => view! { <Play attr:class="h-4 w-4 shrink-0" /> }.into_any(),
        AppRoute::Quiz => view! { <HelpCircle attr:class="h-4 w-4 shrink-0" /> }.into_any(),
        AppRoute::Notes => view! { <StickyNote attr:class="h-4 w-4 shrink-0" /> }.into_any(),
        AppRoute::EditPlan => view! { <Edit attr:class="h-4 w-4 shrink-0" /> }.into_any(),
        _ => view! { <UserIcon attr:class="h-4 w-4 shrink-0" /> }.into_any(),
    }
}

#[component]
fn SidebarItem(route: AppRoute, active: AppRoute, collapsed: ReadSignal<bool>) -> impl IntoView {
    let class = move || {
        let base = if collapsed.get() {
            "flex items-center justify-center py-2 rounded-lg"
        } else {
            "flex items-center gap-2 px-2.5 py-2 rounded-lg"
        };
        if route == active {
            format!("{} bg-neutral text-neutral-content", base)
        } else {
            format!("{} hover:bg-base-200", base)
        }
    };

    view! {
        <li>
            <Link to=route class=Signal::derive(class)>
                {route_icon(route)}
                <Show when=move || !collapsed.get()>
                    <span class="text-sm">{route.label()}</span>
                </Show>
            </Link>
        </li>
    }
}

#[component]
pub fn AppShell(
    /// 当前页面，用于高亮菜单
    route: AppRoute,
    children: Children,
) -> impl IntoView {
    let auth = use_auth();
    let (collapsed, set_collapsed) = signal(false);

    let aside_class = move || {
        if collapsed.get() {
            "w-14 shrink-0 border-r border-base-300 bg-base-100 flex flex-col p-2 transition-all"
        } else {
            "w-56 shrink-0 border-r border-base-300 bg-base-100 flex flex-col p-3 transition-all"
        }
    };

    view! {
        <div class="min-h-screen flex bg-base-200">
            <aside class=aside_class>
                <div class="flex items-center justify-between mb-4">
                    <Show when=move || !collapsed.get()>
                        <span class="font-semibold text-sm">"Goal Pad"</span>
                    </Show>
                    <button
                        class="btn btn-ghost btn-xs btn-square"
                        aria-label="Toggle sidebar"
                        on:click=move |_| set_collapsed.update(|c| *c = !*c)
                    >
                        <PanelLeft attr:class="h-4 w-4" />
                    </button>
                </div>

                <ul class="flex flex-col gap-1 flex-1">
                    {AppRoute::MENU
                        .into_iter()
                        .map(|item| view! { <SidebarItem route=item active=route collapsed=collapsed /> })
                        .collect_view()}
                </ul>

                <ul class="flex flex-col gap-1 border-t border-base-300 pt-2">
                    <SidebarItem route=AppRoute::EditPlan active=route collapsed=collapsed />
                    <SidebarItem route=AppRoute::Profile active=route collapsed=collapsed />
                    <li>
                        <button
                            class="flex items-center gap-2 px-2.5 py-2 rounded-lg w-full text-error hover:bg-error/10"
                            on:click=move |_| auth.logout()
                        >
                            <LogOut attr:class="h-4 w-4 shrink-0" />
                            <Show when=move || !collapsed.get()>
                                <span class="text-sm">"Sign Out"</span>
                            </Show>
                        </button>
                    </li>
                </ul>
            </aside>

            <main class="flex-1 p-6 overflow-x-hidden">{children()}</main>
        </div>
    }
}
