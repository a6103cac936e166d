use leptos::prelude::*;
use leptos::task::spawn_local;
use pixshare::shared::Group;

use crate::api::api;
use crate::auth::use_auth;
use crate::components::toast::use_toast;
use crate::web::route::AppRoute;
use crate::web::router::Link;

#[component]
pub fn GroupsPage() -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();

    let (groups, set_groups) = signal(Vec::<Group>::new());
    let (loading, set_loading) = signal(true);

    let load_groups = move || {
        set_loading.set(true);
        spawn_local(async move {
            match api().groups().list().await {
                Ok(list) => set_groups.set(list),
                Err(e) => toast.api_error("Failed to load groups", &e),
            }
            set_loading.set(false);
        });
    };
    load_groups();

    let username = auth.username_signal();

    view! {
        <div class="max-w-5xl mx-auto p-4 md:p-8 space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold">"Groups"</h1>
                <Show when=move || auth.state.with(|s| s.is_authenticated)>
                    <CreateGroupDialog on_created=Callback::new(move |_| load_groups()) />
                </Show>
            </div>

            <Show when=move || loading.get() && groups.with(Vec::is_empty)>
                <div class="flex justify-center py-12">
                    <span class="loading loading-spinner loading-lg"></span>
                </div>
            </Show>
            <Show when=move || !loading.get() && groups.with(Vec::is_empty)>
                <p class="text-center py-12 text-base-content/50">"No groups yet. Create the first one."</p>
            </Show>

            <div class="grid gap-4 md:grid-cols-2">
                <For
                    each=move || groups.get()
                    key=|g| g.id.clone()
                    children=move |group| {
                        let member = username
                            .get_untracked()
                            .is_some_and(|u| group.is_member(&u));
                        view! {
                            <div class="card bg-base-100 shadow-md">
                                <div class="card-body">
                                    <div class="flex items-center justify-between">
                                        <Link to=AppRoute::Group(group.id.clone()).to_path() class="card-title link-hover">
                                            {group.name.clone()}
                                        </Link>
                                        {member.then(|| view! { <span class="badge badge-primary">"Member"</span> })}
                                    </div>
                                    <p class="text-sm text-base-content/70">{group.description.clone()}</p>
                                    <div class="text-xs text-base-content/60">
                                        {group.members.count()} " members · created by @" {group.created_by.clone()}
                                    </div>
                                </div>
                            </div>
                        }
                    }
                />
            </div>
        </div>
    }
}

/// 新建群组对话框
#[component]
fn CreateGroupDialog(#[prop(into)] on_created: Callback<()>) -> impl IntoView {
    let toast = use_toast();

    let (open, set_open) = signal(false);
    let (loading, set_loading) = signal(false);
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    let name = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        set_loading.set(true);
        spawn_local(async move {
            match api()
                .groups()
                .create(&name.get_untracked(), &description.get_untracked())
                .await
            {
                Ok(_) => {
                    toast.success("Group created");
                    name.set(String::new());
                    description.set(String::new());
                    set_open.set(false);
                    on_created.run(());
                }
                Err(e) => toast.api_error("Failed to create group", &e),
            }
            set_loading.set(false);
        });
    };

    view! {
        <button class="btn btn-primary" on:click=move |_| set_open.set(true)>"New group"</button>

        <dialog class="modal" node_ref=dialog_ref on:close=move |_| set_open.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">"Create a group"</h3>
                <form on:submit=on_submit class="space-y-4 mt-4">
                    <input type="text" placeholder="Name" required
                        class="input input-bordered w-full"
                        on:input=move |ev| name.set(event_target_value(&ev))
                        prop:value=name
                    />
                    <textarea placeholder="Description" rows="3"
                        class="textarea textarea-bordered w-full"
                        on:input=move |ev| description.set(event_target_value(&ev))
                        prop:value=description
                    ></textarea>
                    <div class="modal-action">
                        <button type="button" class="btn" on:click=move |_| set_open.set(false)>"Cancel"</button>
                        <button type="submit" class="btn btn-primary" disabled=move || loading.get()>
                            {move || if loading.get() {
                                view! { <span class="loading loading-spinner"></span> }.into_any()
                            } else {
                                "Create".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
