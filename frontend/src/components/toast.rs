//! 全局提示
//!
//! 所有失败都以可关闭的提示展示错误消息，不做自动重试。

use leptos::prelude::*;
use pixshare::ApiError;

use crate::auth::{AuthContext, logout};

const DISMISS_AFTER: std::time::Duration = std::time::Duration::from_secs(4);

#[derive(Clone, Debug, PartialEq)]
pub struct ToastMessage {
    pub text: String,
    pub is_error: bool,
}

/// 提示上下文
///
/// 持有认证上下文，以便在 401 时登出。两者都是 Copy，可在异步任务中直接使用。
#[derive(Clone, Copy)]
pub struct ToastContext {
    message: RwSignal<Option<ToastMessage>>,
    auth: AuthContext,
}

impl ToastContext {
    pub fn new(auth: AuthContext) -> Self {
        Self {
            message: RwSignal::new(None),
            auth,
        }
    }

    pub fn success(&self, text: impl Into<String>) {
        self.message.set(Some(ToastMessage {
            text: text.into(),
            is_error: false,
        }));
    }

    pub fn error(&self, text: impl Into<String>) {
        self.message.set(Some(ToastMessage {
            text: text.into(),
            is_error: true,
        }));
    }

    pub fn dismiss(&self) {
        self.message.set(None);
    }

    /// 展示 API 错误；服务端判定 Token 失效时顺带登出
    pub fn api_error(&self, title: &str, err: &ApiError) {
        log::error!("{}: {}", title, err);
        if err.status == Some(401) {
            logout(&self.auth);
        }
        self.error(format!("{}: {}", title, err.message()));
    }
}

pub fn use_toast() -> ToastContext {
    use_context::<ToastContext>().expect("ToastContext should be provided")
}

#[component]
pub fn Toast() -> impl IntoView {
    let toast = use_toast();
    let message = toast.message;

    Effect::new(move |_| {
        if message.with(Option::is_some) {
            set_timeout(move || message.set(None), DISMISS_AFTER);
        }
    });

    view! {
        <Show when=move || message.with(Option::is_some)>
            <div class="toast toast-top toast-end z-50">
                <div class=move || {
                    if message.with(|m| m.as_ref().is_some_and(|m| m.is_error)) {
                        "alert alert-error shadow-lg"
                    } else {
                        "alert alert-success shadow-lg"
                    }
                }>
                    <span>{move || message.with(|m| m.as_ref().map(|m| m.text.clone()).unwrap_or_default())}</span>
                    <button class="btn btn-ghost btn-xs" on:click=move |_| toast.dismiss()>"✕"</button>
                </div>
            </div>
        </Show>
    }
}
