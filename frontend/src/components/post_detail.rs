//! 帖子详情
//!
//! 点赞与评论成功后重新拉取整篇帖子，不在本地拼装计数。

use leptos::prelude::*;
use leptos::task::spawn_local;
use pixshare::shared::Post;
use pixshare::shared::date::relative_label;

use crate::api::api;
use crate::auth::use_auth;
use crate::components::share_buttons::ShareButtons;
use crate::components::toast::use_toast;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};

#[component]
pub fn PostDetailPage(post_id: String) -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();
    let router = use_router();

    let (post, set_post) = signal(Option::<Post>::None);
    let (loading, set_loading) = signal(true);
    let (busy, set_busy) = signal(false);
    let (show_share, set_show_share) = signal(false);
    let comment_text = RwSignal::new(String::new());

    let username = auth.username_signal();
    let id = StoredValue::new(post_id);

    let reload = move || {
        spawn_local(async move {
            match api().posts().get(&id.get_value()).await {
                Ok(p) => set_post.set(Some(p)),
                Err(e) => toast.api_error("Failed to load post", &e),
            }
            set_loading.set(false);
        });
    };
    reload();

    let liked = move || {
        let user = username.get();
        post.with(|p| match (p, user) {
            (Some(p), Some(user)) => p.is_liked_by(&user),
            _ => false,
        })
    };
    let is_author = move || {
        let user = username.get();
        post.with(|p| matches!((p, user), (Some(p), Some(user)) if p.author == user))
    };

    let on_like = move |_| {
        if !auth.state.with_untracked(|s| s.is_authenticated) {
            router.navigate_to(AppRoute::Login);
            return;
        }
        let unlike = liked();
        set_busy.set(true);
        spawn_local(async move {
            let client = api();
            let service = client.posts();
            let result = if unlike {
                service.unlike(&id.get_value()).await
            } else {
                service.like(&id.get_value()).await
            };
            match result {
                Ok(_) => reload(),
                Err(e) => toast.api_error("Failed to update like", &e),
            }
            set_busy.set(false);
        });
    };

    let on_comment = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let text = comment_text.get();
        if text.trim().is_empty() {
            return;
        }
        set_busy.set(true);
        spawn_local(async move {
            match api().posts().comment(&id.get_value(), &text).await {
                Ok(_) => {
                    comment_text.set(String::new());
                    reload();
                }
                Err(e) => toast.api_error("Failed to add comment", &e),
            }
            set_busy.set(false);
        });
    };

    let on_delete = move |_| {
        set_busy.set(true);
        spawn_local(async move {
            match api().posts().delete(&id.get_value()).await {
                Ok(_) => {
                    toast.success("Post deleted");
                    router.navigate_to(AppRoute::Home);
                }
                Err(e) => {
                    toast.api_error("Failed to delete post", &e);
                    set_busy.set(false);
                }
            }
        });
    };

    view! {
        <div class="max-w-3xl mx-auto p-4 md:p-8">
            <Show when=move || loading.get()>
                <div class="flex justify-center py-12">
                    <span class="loading loading-spinner loading-lg"></span>
                </div>
            </Show>
            <Show when=move || !loading.get() && post.with(Option::is_none)>
                <p class="text-center py-12 text-base-content/50">"Post not found."</p>
            </Show>
            {move || post.get().map(|p| {
                let posted = p.created_at.as_deref().map(|at| relative_label(at, chrono::Utc::now()));
                let likes = p.likes.count();
                let article = p.article.as_ref().map(|a| a.content.clone());
                let group = p.group_id.clone();
                let share_title = p.title.clone();
                view! {
                    <article class="card bg-base-100 shadow-xl">
                        <figure class="bg-base-300">
                            <img src=p.image_url.clone() alt=p.title.clone() class="w-full max-h-[70vh] object-contain" />
                        </figure>
                        <div class="card-body space-y-2">
                            <div class="flex items-start justify-between gap-4">
                                <h1 class="card-title text-2xl">{p.title.clone()}</h1>
                                <Show when=is_author>
                                    <div class="flex gap-2">
                                        <Link to=AppRoute::EditPost(id.get_value()).to_path() class="btn btn-sm btn-outline">"Edit"</Link>
                                        <button class="btn btn-sm btn-error btn-outline"
                                            disabled=move || busy.get()
                                            on:click=on_delete>"Delete"</button>
                                    </div>
                                </Show>
                            </div>
                            <div class="text-sm text-base-content/60 flex gap-3">
                                <span class="font-semibold">"@" {p.author.clone()}</span>
                                {posted.map(|label| view! { <span>{label}</span> })}
                                {group.map(|g| view! {
                                    <Link to=AppRoute::Group(g).to_path() class="link link-primary">"View group"</Link>
                                })}
                            </div>
                            <p>{p.description.clone()}</p>
                            {article.map(|content| view! {
                                <div class="prose max-w-none whitespace-pre-wrap border-t border-base-300 pt-4">{content}</div>
                            })}
                            <div class="card-actions items-center">
                                <button
                                    class=move || if liked() { "btn btn-sm btn-secondary" } else { "btn btn-sm btn-outline" }
                                    disabled=move || busy.get()
                                    on:click=on_like
                                >
                                    "♥ " {likes}
                                </button>
                                <button class="btn btn-sm btn-ghost"
                                    on:click=move |_| set_show_share.update(|open| *open = !*open)>"Share"</button>
                            </div>
                            <Show when=move || show_share.get()>
                                <ShareButtons post_id=id.get_value() title=share_title.clone() />
                            </Show>
                        </div>
                    </article>

                    <section class="mt-8 space-y-4">
                        <h2 class="text-xl font-bold">"Comments (" {p.comment_total()} ")"</h2>
                        <ul class="space-y-3">
                            {p.comments.iter().map(|c| view! {
                                <li class="bg-base-100 rounded-box p-3 shadow-sm">
                                    <div class="text-xs text-base-content/60 flex justify-between">
                                        <span class="font-semibold">"@" {c.username.clone()}</span>
                                        <span>{relative_label(&c.created_at, chrono::Utc::now())}</span>
                                    </div>
                                    <p class="mt-1">{c.text.clone()}</p>
                                </li>
                            }).collect_view()}
                        </ul>
                    </section>
                }
            })}

            <Show when=move || auth.state.with(|s| s.is_authenticated) && post.with(Option::is_some)>
                <form class="flex gap-2 mt-4" on:submit=on_comment>
                    <input
                        type="text"
                        placeholder="Write a comment..."
                        class="input input-bordered flex-1"
                        on:input=move |ev| comment_text.set(event_target_value(&ev))
                        prop:value=comment_text
                    />
                    <button class="btn btn-primary" disabled=move || busy.get()>"Post"</button>
                </form>
            </Show>
        </div>
    }
}
