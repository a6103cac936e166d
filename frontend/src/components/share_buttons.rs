use leptos::prelude::*;
use pixshare::shared::share::{SharePlatform, post_url, share_url};

use crate::components::toast::use_toast;

fn current_origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

fn open_in_new_tab(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.open_with_url_and_target(url, "_blank") {
            log::warn!("could not open share window: {:?}", e);
        }
    }
}

/// 分享到第三方平台或复制链接
#[component]
pub fn ShareButtons(post_id: String, title: String) -> impl IntoView {
    let toast = use_toast();

    let link = StoredValue::new(post_url(&current_origin(), &post_id));
    let title = StoredValue::new(title);

    let on_copy = move |_| {
        let Some(window) = web_sys::window() else {
            return;
        };
        // 不等待 Promise，写入失败时浏览器自行提示
        let _ = window.navigator().clipboard().write_text(&link.get_value());
        toast.success("Link copied to clipboard");
    };

    view! {
        <div class="flex flex-wrap gap-2">
            {SharePlatform::ALL
                .into_iter()
                .map(|platform| view! {
                    <button class="btn btn-sm btn-outline"
                        on:click=move |_| {
                            open_in_new_tab(&share_url(platform, &link.get_value(), &title.get_value()))
                        }
                    >
                        {platform.label()}
                    </button>
                })
                .collect_view()}
            <button class="btn btn-sm btn-outline" on:click=on_copy>"Copy link"</button>
        </div>
    }
}
