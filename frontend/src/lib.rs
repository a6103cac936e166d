//! PixShare 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 认证状态管理
//! - `components`: UI 组件层
//!
//! 所有网络请求都经由核心库 `pixshare` 的 `ApiClient`，组件只处理展示与交互。

mod api;
mod auth;
pub mod logger;
mod components {
    pub mod chat_room;
    pub mod feed;
    pub mod group_detail;
    pub mod groups;
    pub mod login;
    pub mod navbar;
    mod notification_dropdown;
    pub mod post_card;
    pub mod post_detail;
    pub mod post_form;
    pub mod profile;
    mod share_buttons;
    pub mod toast;
}
pub(crate) mod web;

use crate::auth::{AuthContext, init_auth};
use crate::components::chat_room::ChatRoomPage;
use crate::components::feed::HomePage;
use crate::components::group_detail::GroupDetailPage;
use crate::components::groups::GroupsPage;
use crate::components::login::{LoginPage, RegisterPage};
use crate::components::navbar::Navbar;
use crate::components::post_detail::PostDetailPage;
use crate::components::post_form::{CreatePostPage, EditPostPage};
use crate::components::profile::ProfilePage;
use crate::components::toast::{Toast, ToastContext};

use leptos::prelude::*;

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Post(id) => view! { <PostDetailPage post_id=id /> }.into_any(),
        AppRoute::CreatePost(group_id) => view! { <CreatePostPage group_id=group_id /> }.into_any(),
        AppRoute::EditPost(id) => view! { <EditPostPage post_id=id /> }.into_any(),
        AppRoute::Groups => view! { <GroupsPage /> }.into_any(),
        AppRoute::Group(id) => view! { <GroupDetailPage group_id=id /> }.into_any(),
        AppRoute::ChatRoom => view! { <ChatRoomPage /> }.into_any(),
        AppRoute::Profile => view! { <ProfilePage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-[80vh] bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文（从 LocalStorage 中的 Token 推导）
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 2. 后台向服务端确认 Token 仍然有效
    init_auth(&auth_ctx);

    // 3. 提示上下文持有认证上下文，401 时可直接登出
    provide_context(ToastContext::new(auth_ctx));

    // 4. 认证状态信号注入路由服务
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <div class="min-h-screen bg-base-200 font-sans">
                <Navbar />
                <Toast />
                <main>
                    <RouterOutlet matcher=route_matcher />
                </main>
            </div>
        </Router>
    }
}
