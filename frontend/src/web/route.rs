//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、路径参数及其认证要求。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 信息流首页
    #[default]
    Home,
    Login,
    Register,
    /// 帖子详情 `/post/{id}`
    Post(String),
    /// 发帖，可选地发到某个群组 `/groups/{id}/create-post`
    CreatePost(Option<String>),
    /// 编辑帖子 `/edit-post/{id}`
    EditPost(String),
    Groups,
    /// 群组详情 `/groups/{id}`
    Group(String),
    ChatRoom,
    Profile,
    /// 页面未找到
    NotFound,
}

/// 解码单个路径段，失败时保留原文
fn decode_segment(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    ///
    /// 忽略查询串、片段和结尾的 `/`。
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Home,
            ["login"] => Self::Login,
            ["signup"] | ["register"] => Self::Register,
            ["post", id] => Self::Post(decode_segment(id)),
            ["create-post"] => Self::CreatePost(None),
            ["edit-post", id] => Self::EditPost(decode_segment(id)),
            ["groups"] => Self::Groups,
            ["groups", id] => Self::Group(decode_segment(id)),
            ["groups", id, "create-post"] => Self::CreatePost(Some(decode_segment(id))),
            ["chat-room"] => Self::ChatRoom,
            ["profile"] => Self::Profile,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        let enc = |s: &str| urlencoding::encode(s).into_owned();
        match self {
            Self::Home => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Register => "/signup".to_string(),
            Self::Post(id) => format!("/post/{}", enc(id)),
            Self::CreatePost(None) => "/create-post".to_string(),
            Self::CreatePost(Some(group_id)) => format!("/groups/{}/create-post", enc(group_id)),
            Self::EditPost(id) => format!("/edit-post/{}", enc(id)),
            Self::Groups => "/groups".to_string(),
            Self::Group(id) => format!("/groups/{}", enc(id)),
            Self::ChatRoom => "/chat-room".to_string(),
            Self::Profile => "/profile".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::CreatePost(_) | Self::EditPost(_) | Self::ChatRoom | Self::Profile
        )
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Home
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_static_routes() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Home);
        assert_eq!(AppRoute::from_path(""), AppRoute::Home);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/signup"), AppRoute::Register);
        assert_eq!(AppRoute::from_path("/groups/"), AppRoute::Groups);
        assert_eq!(AppRoute::from_path("/chat-room?x=1"), AppRoute::ChatRoom);
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/post"), AppRoute::NotFound);
    }

    #[test]
    fn test_parse_parameterized_routes() {
        assert_eq!(AppRoute::from_path("/post/42"), AppRoute::Post("42".into()));
        assert_eq!(AppRoute::from_path("/edit-post/7"), AppRoute::EditPost("7".into()));
        assert_eq!(AppRoute::from_path("/groups/g%201"), AppRoute::Group("g 1".into()));
        assert_eq!(
            AppRoute::from_path("/groups/g1/create-post"),
            AppRoute::CreatePost(Some("g1".into()))
        );
        assert_eq!(AppRoute::from_path("/create-post"), AppRoute::CreatePost(None));
    }

    #[test]
    fn test_path_round_trip() {
        let routes = [
            AppRoute::Home,
            AppRoute::Login,
            AppRoute::Register,
            AppRoute::Post("a b".into()),
            AppRoute::CreatePost(None),
            AppRoute::CreatePost(Some("g/1".into())),
            AppRoute::EditPost("9".into()),
            AppRoute::Groups,
            AppRoute::Group("g1".into()),
            AppRoute::ChatRoom,
            AppRoute::Profile,
        ];
        for route in routes {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
    }

    #[test]
    fn test_auth_requirements() {
        assert!(AppRoute::ChatRoom.requires_auth());
        assert!(AppRoute::Profile.requires_auth());
        assert!(AppRoute::CreatePost(None).requires_auth());
        assert!(!AppRoute::Home.requires_auth());
        assert!(!AppRoute::Group("g1".into()).requires_auth());
        assert!(AppRoute::Login.should_redirect_when_authenticated());
        assert!(!AppRoute::Groups.should_redirect_when_authenticated());
    }
}
