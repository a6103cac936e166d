use leptos::prelude::*;
use leptos::task::spawn_local;
use pixshare::shared::{Post, UpdateProfileData, UserProfile};

use crate::api::api;
use crate::auth::use_auth;
use crate::components::post_card::PostGrid;
use crate::components::toast::use_toast;

/// 当前用户的个人主页：资料编辑与本人帖子
#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();

    let (profile, set_profile) = signal(Option::<UserProfile>::None);
    let (posts, set_posts) = signal(Vec::<Post>::new());
    let (posts_loading, set_posts_loading) = signal(true);
    let (editing, set_editing) = signal(false);
    let (saving, set_saving) = signal(false);
    let picture = RwSignal::new(String::new());
    let bio = RwSignal::new(String::new());

    // 路由守卫保证此处已登录
    let Some(username) = auth.state.with_untracked(|s| s.username.clone()) else {
        return view! { <p class="text-center py-12">"Please log in."</p> }.into_any();
    };

    {
        let username = username.clone();
        spawn_local(async move {
            let client = api();
            match client.users().profile(&username).await {
                Ok(p) => set_profile.set(Some(p)),
                Err(e) => toast.api_error("Failed to load profile", &e),
            }
            match client.posts().by_author(&username).await {
                Ok(list) => set_posts.set(list),
                Err(e) => toast.api_error("Failed to load your posts", &e),
            }
            set_posts_loading.set(false);
        });
    }

    let start_edit = move |_| {
        profile.with_untracked(|p| {
            if let Some(p) = p {
                picture.set(p.profile_picture.clone().unwrap_or_default());
                bio.set(p.bio.clone().unwrap_or_default());
            }
        });
        set_editing.set(true);
    };

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        set_saving.set(true);
        let data = UpdateProfileData {
            profile_picture: picture.get_untracked().trim().to_string(),
            bio: bio.get_untracked(),
        };
        spawn_local(async move {
            match api().users().update_my_profile(data).await {
                Ok(updated) => {
                    set_profile.set(Some(updated));
                    set_editing.set(false);
                    toast.success("Profile updated");
                }
                Err(e) => toast.api_error("Failed to update profile", &e),
            }
            set_saving.set(false);
        });
    };

    let avatar = move || {
        profile.with(|p| {
            p.as_ref()
                .and_then(|p| p.profile_picture.clone())
                .filter(|url| !url.is_empty())
        })
    };

    view! {
        <div class="max-w-5xl mx-auto p-4 md:p-8 space-y-8">
            <section class="card bg-base-100 shadow-xl">
                <div class="card-body md:flex-row md:items-center gap-6">
                    <div class="avatar placeholder">
                        <div class="w-24 rounded-full bg-neutral text-neutral-content">
                            {move || match avatar() {
                                Some(url) => view! { <img src=url alt="avatar" /> }.into_any(),
                                None => view! {
                                    <span class="text-3xl">
                                        {username.chars().next().map(|c| c.to_uppercase().to_string()).unwrap_or_default()}
                                    </span>
                                }.into_any(),
                            }}
                        </div>
                    </div>

                    <div class="flex-1 space-y-2">
                        <h1 class="text-2xl font-bold">
                            "@" {move || profile.with(|p| p.as_ref().map(|p| p.username.clone()))}
                        </h1>
                        <p class="text-sm text-base-content/60">
                            {move || profile.with(|p| p.as_ref().map(|p| p.email.clone()))}
                        </p>
                        <Show
                            when=move || editing.get()
                            fallback=move || view! {
                                <p>{move || profile.with(|p| p.as_ref().and_then(|p| p.bio.clone()).unwrap_or_else(|| "No bio yet.".to_string()))}</p>
                                <button class="btn btn-sm btn-outline" on:click=start_edit>"Edit profile"</button>
                            }
                        >
                            <form class="space-y-3" on:submit=on_save>
                                <input type="url" placeholder="Profile picture URL"
                                    class="input input-bordered w-full"
                                    on:input=move |ev| picture.set(event_target_value(&ev))
                                    prop:value=picture
                                />
                                <textarea placeholder="Bio" rows="3"
                                    class="textarea textarea-bordered w-full"
                                    on:input=move |ev| bio.set(event_target_value(&ev))
                                    prop:value=bio
                                ></textarea>
                                <div class="flex gap-2 justify-end">
                                    <button type="button" class="btn btn-ghost" on:click=move |_| set_editing.set(false)>"Cancel"</button>
                                    <button class="btn btn-primary" disabled=move || saving.get()>"Save"</button>
                                </div>
                            </form>
                        </Show>
                    </div>
                </div>
            </section>

            <section class="space-y-4">
                <h2 class="text-2xl font-bold">"My posts"</h2>
                <PostGrid posts=posts.into() loading=posts_loading.into() empty_text="You have not posted anything yet." />
            </section>
        </div>
    }
    .into_any()
}
