//! 通知下拉菜单
//!
//! 每次展开时拉取一次，不做轮询。

use leptos::prelude::*;
use leptos::task::spawn_local;
use pixshare::shared::date::relative_label;
use pixshare::shared::{Notification, unread_count};

use crate::api::api;
use crate::components::toast::use_toast;

#[component]
pub fn NotificationDropdown() -> impl IntoView {
    let toast = use_toast();

    let (open, set_open) = signal(false);
    let (loading, set_loading) = signal(false);
    let (items, set_items) = signal(Vec::<Notification>::new());

    let fetch = move || {
        set_loading.set(true);
        spawn_local(async move {
            match api().notifications().mine().await {
                Ok(list) => set_items.set(list),
                Err(e) => toast.api_error("Failed to load notifications", &e),
            }
            set_loading.set(false);
        });
    };

    let toggle = move |_| {
        let next = !open.get_untracked();
        set_open.set(next);
        if next {
            fetch();
        }
    };

    let mark_read = move |id: String| {
        spawn_local(async move {
            match api().notifications().mark_read(&id).await {
                Ok(_) => set_items.update(|list| {
                    if let Some(n) = list.iter_mut().find(|n| n.id == id) {
                        n.read = true;
                    }
                }),
                Err(e) => toast.api_error("Failed to mark notification", &e),
            }
        });
    };

    let unread = move || items.with(|list| unread_count(list));

    view! {
        <div class="relative">
            <button class="btn btn-ghost btn-circle" on:click=toggle>
                <div class="indicator">
                    <span class="text-xl">"🔔"</span>
                    <Show when=move || { unread() > 0 }>
                        <span class="badge badge-xs badge-primary indicator-item">{unread}</span>
                    </Show>
                </div>
            </button>
            <Show when=move || open.get()>
                <div class="absolute right-0 mt-2 w-80 z-50 card card-compact bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h3 class="font-bold">"Notifications"</h3>
                        <Show when=move || loading.get() && items.with(Vec::is_empty)>
                            <span class="loading loading-spinner loading-sm"></span>
                        </Show>
                        <Show when=move || !loading.get() && items.with(Vec::is_empty)>
                            <p class="text-sm text-base-content/60">"Nothing new."</p>
                        </Show>
                        <ul class="menu p-0 max-h-96 overflow-y-auto">
                            <For
                                each=move || items.get()
                                key=|n| (n.id.clone(), n.read)
                                children=move |n| {
                                    let id = n.id.clone();
                                    let read = n.read;
                                    view! {
                                        <li>
                                            <a
                                                class=if read { "opacity-60" } else { "font-semibold" }
                                                on:click=move |_| {
                                                    if !read {
                                                        mark_read(id.clone());
                                                    }
                                                }
                                            >
                                                <div class="flex flex-col items-start">
                                                    <span>{n.message}</span>
                                                    <span class="text-xs opacity-60">{relative_label(&n.created_at, chrono::Utc::now())}</span>
                                                </div>
                                            </a>
                                        </li>
                                    }
                                }
                            />
                        </ul>
                    </div>
                </div>
            </Show>
        </div>
    }
}
