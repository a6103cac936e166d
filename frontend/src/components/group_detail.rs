//! 群组详情
//!
//! 任一成员操作成功后重新拉取群组与成员列表。

use leptos::prelude::*;
use leptos::task::spawn_local;
use pixshare::shared::{Group, Post, User};

use crate::api::api;
use crate::auth::use_auth;
use crate::components::post_card::PostGrid;
use crate::components::toast::use_toast;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MemberAction {
    Join,
    Leave,
}

#[component]
pub fn GroupDetailPage(group_id: String) -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();
    let router = use_router();

    let id = StoredValue::new(group_id);
    let username = auth.username_signal();

    let (group, set_group) = signal(Option::<Group>::None);
    let (members, set_members) = signal(Vec::<User>::new());
    let (posts, set_posts) = signal(Vec::<Post>::new());
    let (loading, set_loading) = signal(true);
    let (posts_loading, set_posts_loading) = signal(true);
    let (busy, set_busy) = signal(false);
    let (editing, set_editing) = signal(false);
    let edit_name = RwSignal::new(String::new());
    let edit_description = RwSignal::new(String::new());

    let reload = move || {
        spawn_local(async move {
            let client = api();
            match client.groups().get(&id.get_value()).await {
                Ok(g) => set_group.set(Some(g)),
                Err(e) => toast.api_error("Failed to load group", &e),
            }
            set_loading.set(false);
            if auth.state.with_untracked(|s| s.is_authenticated) {
                match client.groups().members(&id.get_value()).await {
                    Ok(list) => set_members.set(list),
                    Err(e) => log::warn!("could not load members: {}", e),
                }
            }
        });
    };
    reload();

    spawn_local(async move {
        match api().posts().by_group(&id.get_value()).await {
            Ok(list) => set_posts.set(list),
            Err(e) => toast.api_error("Failed to load group posts", &e),
        }
        set_posts_loading.set(false);
    });

    let is_member = move || {
        let user = username.get();
        group.with(|g| matches!((g, user), (Some(g), Some(u)) if g.is_member(&u)))
    };
    let is_admin = move || {
        let user = username.get();
        group.with(|g| matches!((g, user), (Some(g), Some(u)) if g.is_admin(&u)))
    };

    let on_membership = move |action: MemberAction| {
        if !auth.state.with_untracked(|s| s.is_authenticated) {
            router.navigate_to(AppRoute::Login);
            return;
        }
        set_busy.set(true);
        spawn_local(async move {
            let client = api();
            let result = match action {
                MemberAction::Join => client.groups().join(&id.get_value()).await,
                MemberAction::Leave => client.groups().leave(&id.get_value()).await,
            };
            match result {
                Ok(_) => reload(),
                Err(e) => toast.api_error("Failed to update membership", &e),
            }
            set_busy.set(false);
        });
    };

    let start_edit = move |_| {
        if let Some(g) = group.get_untracked() {
            edit_name.set(g.name);
            edit_description.set(g.description);
            set_editing.set(true);
        }
    };

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        set_busy.set(true);
        spawn_local(async move {
            match api()
                .groups()
                .update(&id.get_value(), &edit_name.get_untracked(), &edit_description.get_untracked())
                .await
            {
                Ok(_) => {
                    set_editing.set(false);
                    reload();
                }
                Err(e) => toast.api_error("Failed to update group", &e),
            }
            set_busy.set(false);
        });
    };

    let on_delete = move |_| {
        set_busy.set(true);
        spawn_local(async move {
            match api().groups().delete(&id.get_value()).await {
                Ok(_) => {
                    toast.success("Group deleted");
                    router.navigate_to(AppRoute::Groups);
                }
                Err(e) => {
                    toast.api_error("Failed to delete group", &e);
                    set_busy.set(false);
                }
            }
        });
    };

    let on_remove = move |member: String| {
        spawn_local(async move {
            match api().groups().remove_member(&id.get_value(), &member).await {
                Ok(_) => {
                    toast.success(format!("Removed @{}", member));
                    reload();
                }
                Err(e) => toast.api_error("Failed to remove member", &e),
            }
        });
    };

    view! {
        <div class="max-w-5xl mx-auto p-4 md:p-8 space-y-8">
            <Show when=move || loading.get()>
                <div class="flex justify-center py-12">
                    <span class="loading loading-spinner loading-lg"></span>
                </div>
            </Show>
            <Show when=move || !loading.get() && group.with(Option::is_none)>
                <p class="text-center py-12 text-base-content/50">"Group not found."</p>
            </Show>

            {move || group.get().map(|g| view! {
                <section class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <Show
                            when=move || editing.get()
                            fallback=move || view! {
                                <h1 class="card-title text-3xl">{move || group.with(|g| g.as_ref().map(|g| g.name.clone()))}</h1>
                                <p class="text-base-content/70">{move || group.with(|g| g.as_ref().map(|g| g.description.clone()))}</p>
                            }
                        >
                            <form class="space-y-3" on:submit=on_save>
                                <input type="text" class="input input-bordered w-full" required
                                    on:input=move |ev| edit_name.set(event_target_value(&ev))
                                    prop:value=edit_name
                                />
                                <textarea class="textarea textarea-bordered w-full" rows="3"
                                    on:input=move |ev| edit_description.set(event_target_value(&ev))
                                    prop:value=edit_description
                                ></textarea>
                                <div class="flex gap-2 justify-end">
                                    <button type="button" class="btn btn-ghost" on:click=move |_| set_editing.set(false)>"Cancel"</button>
                                    <button class="btn btn-primary" disabled=move || busy.get()>"Save"</button>
                                </div>
                            </form>
                        </Show>

                        <div class="text-sm text-base-content/60">
                            {g.members.count()} " members · created by @" {g.created_by.clone()}
                        </div>

                        <div class="card-actions justify-end">
                            <Show
                                when=is_member
                                fallback=move || view! {
                                    <button class="btn btn-primary btn-sm" disabled=move || busy.get()
                                        on:click=move |_| on_membership(MemberAction::Join)>"Join"</button>
                                }
                            >
                                <Link to=AppRoute::CreatePost(Some(id.get_value())).to_path() class="btn btn-primary btn-sm">
                                    "Post to group"
                                </Link>
                                <Show when=move || !is_admin()>
                                    <button class="btn btn-outline btn-sm" disabled=move || busy.get()
                                        on:click=move |_| on_membership(MemberAction::Leave)>"Leave"</button>
                                </Show>
                            </Show>
                            <Show when=is_admin>
                                <button class="btn btn-outline btn-sm" on:click=start_edit>"Edit"</button>
                                <button class="btn btn-error btn-outline btn-sm" disabled=move || busy.get()
                                    on:click=on_delete>"Delete"</button>
                            </Show>
                        </div>
                    </div>
                </section>
            })}

            <Show when=move || auth.state.with(|s| s.is_authenticated) && group.with(Option::is_some)>
                <section class="card bg-base-100 shadow-md">
                    <div class="card-body space-y-4">
                        <h2 class="card-title">"Members"</h2>
                        <ul class="flex flex-wrap gap-2">
                            <For
                                each=move || members.get()
                                key=|u| u.username.clone()
                                children=move |user| {
                                    // 管理员不能移除自己
                                    let is_self = username.get_untracked().as_deref() == Some(user.username.as_str());
                                    let name = user.username.clone();
                                    view! {
                                        <li class="badge badge-lg gap-2">
                                            "@" {user.username}
                                            <Show when=move || is_admin() && !is_self>
                                                {
                                                    let name = name.clone();
                                                    view! {
                                                        <button class="btn btn-ghost btn-xs"
                                                            on:click=move |_| on_remove(name.clone())>"✕"</button>
                                                    }
                                                }
                                            </Show>
                                        </li>
                                    }
                                }
                            />
                        </ul>
                        <Show when=is_admin>
                            <AddMemberForm
                                group_id=id.get_value()
                                on_added=Callback::new(move |_| reload())
                            />
                        </Show>
                    </div>
                </section>
            </Show>

            <section class="space-y-4">
                <h2 class="text-2xl font-bold">"Posts"</h2>
                <PostGrid posts=posts.into() loading=posts_loading.into() empty_text="No posts in this group yet." />
            </section>
        </div>
    }
}

/// 管理员添加成员：先按用户名搜索，再从结果中选择
#[component]
fn AddMemberForm(group_id: String, #[prop(into)] on_added: Callback<()>) -> impl IntoView {
    let toast = use_toast();

    let id = StoredValue::new(group_id);
    let query = RwSignal::new(String::new());
    let (results, set_results) = signal(Vec::<User>::new());
    let (searching, set_searching) = signal(false);

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        set_searching.set(true);
        spawn_local(async move {
            match api().users().search(&query.get_untracked()).await {
                Ok(list) => set_results.set(list),
                Err(e) => toast.api_error("Search failed", &e),
            }
            set_searching.set(false);
        });
    };

    let on_add = move |username: String| {
        spawn_local(async move {
            match api().groups().add_member(&id.get_value(), &username).await {
                Ok(_) => {
                    toast.success(format!("Added @{}", username));
                    set_results.set(Vec::new());
                    query.set(String::new());
                    on_added.run(());
                }
                Err(e) => toast.api_error("Failed to add member", &e),
            }
        });
    };

    view! {
        <div class="space-y-2">
            <form class="join w-full" on:submit=on_search>
                <input type="search" placeholder="Search users to add"
                    class="input input-bordered input-sm join-item flex-1"
                    on:input=move |ev| query.set(event_target_value(&ev))
                    prop:value=query
                />
                <button class="btn btn-sm join-item" disabled=move || searching.get()>"Search"</button>
            </form>
            <ul class="menu bg-base-200 rounded-box">
                <For
                    each=move || results.get()
                    key=|u| u.username.clone()
                    children=move |user| {
                        let name = user.username.clone();
                        view! {
                            <li>
                                <a on:click=move |_| on_add(name.clone())>
                                    "@" {user.username} <span class="text-xs opacity-60">{user.email}</span>
                                </a>
                            </li>
                        }
                    }
                />
            </ul>
        </div>
    }
}
