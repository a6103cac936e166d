//! 发帖与编辑帖子
//!
//! 两种模式共用同一张表单，字段集中在 [`FormState`] 中。

use leptos::prelude::*;
use leptos::task::spawn_local;
use pixshare::shared::{ArticleInput, CreatePostData, Post, UpdatePostData};

use crate::api::api;
use crate::components::toast::use_toast;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// 表单状态
///
/// 全部是 `RwSignal`，整体可 Copy，方便在闭包之间传递。
#[derive(Clone, Copy)]
struct FormState {
    title: RwSignal<String>,
    description: RwSignal<String>,
    image_url: RwSignal<String>,
    article: RwSignal<String>,
}

impl FormState {
    fn new() -> Self {
        Self {
            title: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            image_url: RwSignal::new(String::new()),
            article: RwSignal::new(String::new()),
        }
    }

    /// 编辑模式下用已有帖子填充
    fn fill(&self, post: &Post) {
        self.title.set(post.title.clone());
        self.description.set(post.description.clone());
        self.image_url.set(post.image_url.clone());
        self.article
            .set(post.article.as_ref().map(|a| a.content.clone()).unwrap_or_default());
    }

    fn validate(&self) -> Result<(), &'static str> {
        if self.title.with(|t| t.trim().is_empty()) {
            return Err("Title is required");
        }
        if self.image_url.with(|u| u.trim().is_empty()) {
            return Err("Image URL is required");
        }
        Ok(())
    }

    fn article_input(&self) -> Option<ArticleInput> {
        let content = self.article.get();
        if content.trim().is_empty() {
            None
        } else {
            Some(ArticleInput { content })
        }
    }

    /// 作者留空，由服务层填入当前用户
    fn to_create(&self, group_id: Option<String>) -> CreatePostData {
        CreatePostData {
            title: self.title.get(),
            description: self.description.get(),
            image_url: self.image_url.get().trim().to_string(),
            author: String::new(),
            group_id,
            article: self.article_input(),
        }
    }

    fn to_update(&self) -> UpdatePostData {
        UpdatePostData {
            title: self.title.get(),
            description: self.description.get(),
            image_url: self.image_url.get().trim().to_string(),
            article: self.article_input(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Mode {
    Create { group_id: Option<String> },
    Edit { post_id: String },
}

#[component]
pub fn CreatePostPage(group_id: Option<String>) -> impl IntoView {
    view! { <PostForm mode=Mode::Create { group_id } /> }
}

#[component]
pub fn EditPostPage(post_id: String) -> impl IntoView {
    view! { <PostForm mode=Mode::Edit { post_id } /> }
}

#[component]
fn PostForm(mode: Mode) -> impl IntoView {
    let toast = use_toast();
    let router = use_router();

    let form = FormState::new();
    let (submitting, set_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (loading, set_loading) = signal(matches!(mode, Mode::Edit { .. }));

    let is_edit = matches!(mode, Mode::Edit { .. });
    let mode = StoredValue::new(mode);

    if let Mode::Edit { post_id } = mode.get_value() {
        spawn_local(async move {
            match api().posts().get(&post_id).await {
                Ok(post) => form.fill(&post),
                Err(e) => toast.api_error("Failed to load post", &e),
            }
            set_loading.set(false);
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if let Err(msg) = form.validate() {
            set_error_msg.set(Some(msg.to_string()));
            return;
        }
        set_error_msg.set(None);
        set_submitting.set(true);

        spawn_local(async move {
            let client = api();
            let target = match mode.get_value() {
                Mode::Create { group_id } => client
                    .posts()
                    .create(form.to_create(group_id))
                    .await
                    .map(|post| AppRoute::Post(post.id)),
                Mode::Edit { post_id } => client
                    .posts()
                    .update(&post_id, form.to_update())
                    .await
                    .map(|_| AppRoute::Post(post_id)),
            };
            match target {
                Ok(route) => {
                    toast.success(if is_edit { "Post updated" } else { "Post created" });
                    router.navigate_to(route);
                }
                Err(e) => {
                    set_error_msg.set(Some(e.message().to_string()));
                    set_submitting.set(false);
                }
            }
        });
    };

    view! {
        <div class="max-w-2xl mx-auto p-4 md:p-8">
            <h1 class="text-3xl font-bold mb-6">{if is_edit { "Edit post" } else { "New post" }}</h1>

            <Show when=move || !loading.get() fallback=|| view! {
                <div class="flex justify-center py-12"><span class="loading loading-spinner loading-lg"></span></div>
            }>
                <form class="card bg-base-100 shadow-xl card-body space-y-4" on:submit=on_submit>
                    <Show when=move || error_msg.with(Option::is_some)>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <span>{move || error_msg.get().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <div class="form-control">
                        <label for="title" class="label"><span class="label-text">"Title"</span></label>
                        <input id="title" type="text" class="input input-bordered" required
                            on:input=move |ev| form.title.set(event_target_value(&ev))
                            prop:value=form.title
                        />
                    </div>
                    <div class="form-control">
                        <label for="image_url" class="label"><span class="label-text">"Image URL"</span></label>
                        <input id="image_url" type="url" class="input input-bordered" required
                            placeholder="https://"
                            on:input=move |ev| form.image_url.set(event_target_value(&ev))
                            prop:value=form.image_url
                        />
                    </div>
                    <Show when=move || form.image_url.with(|u| !u.trim().is_empty())>
                        <img src=move || form.image_url.get() alt="preview" class="rounded-box max-h-64 object-contain" />
                    </Show>
                    <div class="form-control">
                        <label for="description" class="label"><span class="label-text">"Description"</span></label>
                        <textarea id="description" class="textarea textarea-bordered" rows="3"
                            on:input=move |ev| form.description.set(event_target_value(&ev))
                            prop:value=form.description
                        ></textarea>
                    </div>
                    <div class="form-control">
                        <label for="article" class="label">
                            <span class="label-text">"Article"</span>
                            <span class="label-text-alt">"optional"</span>
                        </label>
                        <textarea id="article" class="textarea textarea-bordered" rows="8"
                            on:input=move |ev| form.article.set(event_target_value(&ev))
                            prop:value=form.article
                        ></textarea>
                    </div>

                    <div class="card-actions justify-end">
                        <button type="button" class="btn btn-ghost"
                            on:click=move |_| router.navigate_to(AppRoute::Home)>"Cancel"</button>
                        <button class="btn btn-primary" disabled=move || submitting.get()>
                            {if is_edit { "Save" } else { "Publish" }}
                        </button>
                    </div>
                </form>
            </Show>
        </div>
    }
}
