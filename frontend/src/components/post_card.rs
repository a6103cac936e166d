use leptos::prelude::*;
use pixshare::shared::Post;
use pixshare::shared::date::relative_label;

use crate::web::route::AppRoute;
use crate::web::router::Link;

/// 信息流中的帖子卡片
#[component]
pub fn PostCard(post: Post) -> impl IntoView {
    let posted = post
        .created_at
        .as_deref()
        .map(|at| relative_label(at, chrono::Utc::now()));
    let href = AppRoute::Post(post.id.clone()).to_path();
    let likes = post.likes.count();
    let comments = post.comment_total();

    view! {
        <div class="card bg-base-100 shadow-md hover:shadow-xl transition-shadow">
            <figure class="aspect-square bg-base-300">
                <img src=post.image_url alt=post.title.clone() class="object-cover w-full h-full" loading="lazy" />
            </figure>
            <div class="card-body p-4">
                <Link to=href class="card-title text-base link-hover">{post.title}</Link>
                <p class="text-sm text-base-content/70 line-clamp-2">{post.description}</p>
                <div class="flex items-center justify-between text-xs text-base-content/60 mt-2">
                    <span class="font-semibold">"@" {post.author}</span>
                    {posted.map(|label| view! { <span>{label}</span> })}
                </div>
                <div class="flex gap-4 text-sm mt-1">
                    <span>"♥ " {likes}</span>
                    <span>"💬 " {comments}</span>
                </div>
            </div>
        </div>
    }
}

/// 卡片网格，列表为空时展示提示
#[component]
pub fn PostGrid(
    posts: Signal<Vec<Post>>,
    loading: Signal<bool>,
    #[prop(into)] empty_text: String,
) -> impl IntoView {
    view! {
        <Show when=move || loading.get()>
            <div class="flex justify-center py-12">
                <span class="loading loading-spinner loading-lg"></span>
            </div>
        </Show>
        <Show when=move || !loading.get() && posts.with(Vec::is_empty)>
            <p class="text-center py-12 text-base-content/50">{empty_text.clone()}</p>
        </Show>
        <div class="grid gap-6 sm:grid-cols-2 lg:grid-cols-3">
            <For
                each=move || posts.get()
                key=|p| p.id.clone()
                children=move |post| view! { <PostCard post=post /> }
            />
        </div>
    }
}
