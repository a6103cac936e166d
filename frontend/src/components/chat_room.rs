//! 聊天室
//!
//! 挂载时立即拉取一次，之后交给 [`Poller`] 定时整体替换消息列表。
//! 轮询器不是 `Send`，存放在本地 `StoredValue` 中，卸载时停止。

use leptos::prelude::*;
use leptos::task::spawn_local;
use pixshare::Poller;
use pixshare::shared::ChatMessage;
use pixshare::shared::date::relative_label;

use crate::api::{api, client_config};
use crate::auth::use_auth;
use crate::components::toast::use_toast;
use crate::web::BrowserScheduler;

type ChatPoller = Poller<Vec<ChatMessage>, BrowserScheduler>;

#[component]
pub fn ChatRoomPage() -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();
    let username = auth.username_signal();

    let (messages, set_messages) = signal(Vec::<ChatMessage>::new());
    let (loaded, set_loaded) = signal(false);
    let (sending, set_sending) = signal(false);
    let draft = RwSignal::new(String::new());
    let editing = RwSignal::new(Option::<String>::None);
    let edit_text = RwSignal::new(String::new());

    let mut poller: ChatPoller = Poller::new(
        BrowserScheduler,
        client_config().chat_poll_interval,
        || async { api().chat().list().await },
    )
    .with_label("chat")
    .on_update(move |list| {
        set_messages.set(list);
        set_loaded.set(true);
    })
    .on_error(move |e, streak| {
        // 断网时每个周期都会失败，只提示一串失败中的第一次
        if streak == 1 {
            toast.api_error("Failed to load messages", &e);
        } else {
            log::debug!("chat still failing ({} in a row): {}", streak, e);
        }
    });

    poller.start();
    poller.refresh_now();

    let poller = StoredValue::new_local(poller);
    on_cleanup(move || {
        poller.try_update_value(|p| p.stop());
    });

    // 本地操作成功后立刻刷新，不等下一个周期；视图已卸载时什么也不做
    let refresh = move || {
        poller.try_with_value(|p| {
            p.refresh_now();
        });
    };

    let on_send = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let text = draft.get();
        if text.trim().is_empty() {
            return;
        }
        set_sending.set(true);
        spawn_local(async move {
            match api().chat().send(&text).await {
                Ok(_) => {
                    draft.set(String::new());
                    refresh();
                }
                Err(e) => toast.api_error("Failed to send message", &e),
            }
            set_sending.set(false);
        });
    };

    let on_edit_save = move |message_id: String| {
        let text = edit_text.get_untracked();
        spawn_local(async move {
            match api().chat().edit(&message_id, &text).await {
                Ok(_) => {
                    editing.set(None);
                    refresh();
                }
                Err(e) => toast.api_error("Failed to edit message", &e),
            }
        });
    };

    let on_delete = move |message_id: String| {
        spawn_local(async move {
            match api().chat().delete(&message_id).await {
                Ok(_) => {
                    set_messages.update(|list| list.retain(|m| m.id != message_id));
                    refresh();
                }
                Err(e) => toast.api_error("Failed to delete message", &e),
            }
        });
    };

    view! {
        <div class="max-w-3xl mx-auto p-4 md:p-8 flex flex-col h-[calc(100vh-4rem)]">
            <h1 class="text-3xl font-bold mb-4">"Chat room"</h1>

            <div class="flex-1 overflow-y-auto bg-base-100 rounded-box shadow-inner p-4 space-y-2">
                <Show when=move || !loaded.get()>
                    <div class="flex justify-center py-12">
                        <span class="loading loading-dots loading-lg"></span>
                    </div>
                </Show>
                <Show when=move || loaded.get() && messages.with(Vec::is_empty)>
                    <p class="text-center py-12 text-base-content/50">"No messages yet. Say hello!"</p>
                </Show>
                <For
                    each=move || messages.get()
                    key=|m| (m.id.clone(), m.text.clone())
                    children=move |message| {
                        let own = username.get_untracked().as_deref() == Some(message.username.as_str());
                        let id = StoredValue::new(message.id.clone());
                        let author = message.username.clone();
                        let sent = relative_label(&message.created_at, chrono::Utc::now());
                        let text = message.text.clone();
                        let original = message.text;
                        let is_editing = move || editing.with(|e| e.as_deref() == Some(id.get_value().as_str()));
                        view! {
                            <div class=if own { "chat chat-end" } else { "chat chat-start" }>
                                <div class="chat-header text-xs">
                                    "@" {author}
                                    <time class="opacity-50 ml-2">{sent}</time>
                                </div>
                                <Show
                                    when=is_editing
                                    fallback=move || view! {
                                        <div class=if own { "chat-bubble chat-bubble-primary" } else { "chat-bubble" }>
                                            {text.clone()}
                                        </div>
                                    }
                                >
                                    <form class="join" on:submit=move |ev: leptos::ev::SubmitEvent| {
                                        ev.prevent_default();
                                        on_edit_save(id.get_value());
                                    }>
                                        <input type="text" class="input input-bordered input-sm join-item"
                                            on:input=move |ev| edit_text.set(event_target_value(&ev))
                                            prop:value=edit_text
                                        />
                                        <button class="btn btn-sm btn-primary join-item">"Save"</button>
                                        <button type="button" class="btn btn-sm join-item"
                                            on:click=move |_| editing.set(None)>"Cancel"</button>
                                    </form>
                                </Show>
                                {own.then(|| {
                                    let original = original.clone();
                                    view! {
                                        <div class="chat-footer flex gap-2 text-xs opacity-70">
                                            <a class="link" on:click=move |_| {
                                                edit_text.set(original.clone());
                                                editing.set(Some(id.get_value()));
                                            }>"Edit"</a>
                                            <a class="link text-error" on:click=move |_| on_delete(id.get_value())>"Delete"</a>
                                        </div>
                                    }
                                })}
                            </div>
                        }
                    }
                />
            </div>

            <form class="join w-full mt-4" on:submit=on_send>
                <input type="text" placeholder="Type a message..."
                    class="input input-bordered join-item flex-1"
                    on:input=move |ev| draft.set(event_target_value(&ev))
                    prop:value=draft
                />
                <button class="btn btn-primary join-item" disabled=move || sending.get()>"Send"</button>
            </form>
        </div>
    }
}
