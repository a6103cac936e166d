//! 帖子分享链接
//!
//! 帖子的站内地址为 `{origin}/post/{id}`，第三方分享地址在此基础上拼出。

use urlencoding::encode;

/// 支持的分享平台
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharePlatform {
    Facebook,
    Twitter,
    LinkedIn,
}

impl SharePlatform {
    pub const ALL: [SharePlatform; 3] = [Self::Facebook, Self::Twitter, Self::LinkedIn];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Facebook => "Facebook",
            Self::Twitter => "Twitter",
            Self::LinkedIn => "LinkedIn",
        }
    }
}

/// 帖子的完整地址，`origin` 结尾的 `/` 会被去掉
pub fn post_url(origin: &str, post_id: &str) -> String {
    format!("{}/post/{}", origin.trim_end_matches('/'), encode(post_id))
}

pub fn share_text(title: &str) -> String {
    format!("Check out this photo: {}", title)
}

/// 在给定平台分享 `post_url` 的地址
///
/// 只有 Twitter 会附带标题文本。
pub fn share_url(platform: SharePlatform, post_url: &str, title: &str) -> String {
    let url = encode(post_url);
    match platform {
        SharePlatform::Facebook => format!("https://www.facebook.com/sharer/sharer.php?u={}", url),
        SharePlatform::Twitter => format!(
            "https://twitter.com/intent/tweet?text={}&url={}",
            encode(&share_text(title)),
            url
        ),
        SharePlatform::LinkedIn => {
            format!("https://www.linkedin.com/sharing/share-offsite/?url={}", url)
        }
    }
}
