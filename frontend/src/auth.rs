//! 认证模块
//!
//! 管理登录状态，与路由系统解耦：路由服务只通过注入的认证信号检查状态。
//! 状态本身不单独保存，每次都从 LocalStorage 里的 Token 重新推导。

use leptos::prelude::*;
use leptos::task::spawn_local;
use pixshare::{ApiResponse, Session};

use crate::api::api;

/// 认证状态
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub is_authenticated: bool,
    /// Token 中的用户名，仅用于界面展示
    pub username: Option<String>,
}

impl AuthState {
    fn from_session(session: &Session) -> Self {
        Self {
            is_authenticated: session.is_authenticated(),
            username: session.current_username(),
        }
    }
}

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<AuthState>,
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState::from_session(&api().session()));
        Self { state, set_state }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.is_authenticated))
    }

    pub fn username_signal(&self) -> Signal<Option<String>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.username.clone()))
    }

    /// 按存储中的 Token 重新计算状态
    pub fn sync(&self) {
        let next = AuthState::from_session(&api().session());
        if self.state.with_untracked(|s| *s != next) {
            self.set_state.set(next);
        }
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 启动时向服务端确认 Token 仍然有效
///
/// 只有服务端明确拒绝（401）才清除 Token，网络错误时保留登录状态。
pub fn init_auth(ctx: &AuthContext) {
    let ctx = *ctx;
    if !ctx.state.with_untracked(|s| s.is_authenticated) {
        return;
    }

    spawn_local(async move {
        match api().auth().validate().await {
            Ok(resp) => log::debug!("session valid for {}", resp.username),
            Err(e) if e.is_unauthenticated() => {
                log::warn!("stored token rejected: {}", e);
                logout(&ctx);
            }
            Err(e) => log::warn!("could not validate session: {}", e),
        }
    });
}

/// 登录成功后 Token 已写入 LocalStorage，这里只需同步状态
///
/// 导航由路由服务监听认证状态自动完成。
pub async fn login(ctx: &AuthContext, username: String, password: String) -> ApiResponse<()> {
    api().auth().login(&username, &password).await?;
    ctx.sync();
    Ok(())
}

pub async fn register(username: String, email: String, password: String) -> ApiResponse<()> {
    api().auth().register(&username, &email, &password).await?;
    Ok(())
}

/// 注销并清除状态
pub fn logout(ctx: &AuthContext) {
    api().auth().logout();
    ctx.sync();
}
