use leptos::prelude::*;
use leptos::task::spawn_local;
use pixshare::shared::{Post, PostOrder, sort_posts};

use crate::api::api;
use crate::auth::use_auth;
use crate::components::post_card::PostGrid;
use crate::components::toast::use_toast;
use crate::web::route::AppRoute;
use crate::web::router::Link;

/// 首页信息流
#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();

    let (posts, set_posts) = signal(Vec::<Post>::new());
    let (loading, set_loading) = signal(true);
    let (order, set_order) = signal(PostOrder::Latest);

    spawn_local(async move {
        match api().posts().list().await {
            Ok(list) => set_posts.set(list),
            Err(e) => toast.api_error("Failed to load posts", &e),
        }
        set_loading.set(false);
    });

    // 排序只在本地进行，不重新请求
    let sorted = Signal::derive(move || {
        let mut list = posts.get();
        sort_posts(&mut list, order.get());
        list
    });

    let tab_class = move |tab: PostOrder| {
        if order.get() == tab { "tab tab-active" } else { "tab" }
    };

    view! {
        <div class="max-w-6xl mx-auto p-4 md:p-8 space-y-6">
            <div class="flex flex-wrap items-center justify-between gap-4">
                <h1 class="text-3xl font-bold">"Feed"</h1>
                <div class="flex items-center gap-4">
                    <div role="tablist" class="tabs tabs-boxed">
                        <a role="tab" class=move || tab_class(PostOrder::Latest)
                            on:click=move |_| set_order.set(PostOrder::Latest)>"Latest"</a>
                        <a role="tab" class=move || tab_class(PostOrder::Popular)
                            on:click=move |_| set_order.set(PostOrder::Popular)>"Popular"</a>
                    </div>
                    <Show when=move || auth.state.with(|s| s.is_authenticated)>
                        <Link to=AppRoute::CreatePost(None).to_path() class="btn btn-primary btn-sm">
                            "New post"
                        </Link>
                    </Show>
                </div>
            </div>

            <PostGrid posts=sorted loading=loading.into() empty_text="No posts yet." />
        </div>
    }
}
