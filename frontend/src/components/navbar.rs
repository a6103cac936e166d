use leptos::prelude::*;

use crate::auth::{logout, use_auth};
use crate::components::notification_dropdown::NotificationDropdown;
use crate::web::route::AppRoute;
use crate::web::router::Link;

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = use_auth();
    let is_authenticated = auth.is_authenticated_signal();
    let username = auth.username_signal();

    // 登出后路由服务检测到认证状态变化，会把受保护页面重定向到登录页
    let on_logout = move |_| logout(&auth);

    view! {
        <div class="navbar bg-base-100 shadow-sm sticky top-0 z-40">
            <div class="flex-1 gap-2">
                <Link to=AppRoute::Home.to_path() class="btn btn-ghost text-xl">"PixShare"</Link>
                <Link to=AppRoute::Groups.to_path() class="btn btn-ghost btn-sm">"Groups"</Link>
                <Show when=move || is_authenticated.get()>
                    <Link to=AppRoute::ChatRoom.to_path() class="btn btn-ghost btn-sm">"Chat"</Link>
                </Show>
            </div>
            <div class="flex-none gap-2">
                <Show
                    when=move || is_authenticated.get()
                    fallback=|| view! {
                        <Link to=AppRoute::Login.to_path() class="btn btn-ghost btn-sm">"Log in"</Link>
                        <Link to=AppRoute::Register.to_path() class="btn btn-primary btn-sm">"Sign up"</Link>
                    }
                >
                    <Link to=AppRoute::CreatePost(None).to_path() class="btn btn-primary btn-sm">"New post"</Link>
                    <NotificationDropdown />
                    <Link to=AppRoute::Profile.to_path() class="btn btn-ghost btn-sm">
                        "@" {move || username.get().unwrap_or_default()}
                    </Link>
                    <button class="btn btn-ghost btn-sm" on:click=on_logout>"Log out"</button>
                </Show>
            </div>
        </div>
    }
}
