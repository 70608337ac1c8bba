//! 认证流程
//!
//! 登录、注册、注销以及用户资料同步。所有状态变化都落在 `SessionStore` 上，
//! 路由和 HTTP 拦截器通过会话间接感知登录状态。

use crate::api::ApiClient;
use crate::session::SessionStore;
use crate::web::{HttpError, HttpTransport};
use tripdiary_shared::protocol::{
    LoginRequest, RegisterRequest, UpdateUserRequest, UserDetailsRequest,
};
use tripdiary_shared::{MessageResponse, UserProfile, UserUpdate};

/// 登录并写入会话
///
/// 失败时会话保持不变，错误原样返回。
pub async fn login<T: HttpTransport>(
    session: SessionStore,
    api: &ApiClient<T>,
    username: String,
    password: String,
) -> Result<(), HttpError> {
    let resp = api.call(&LoginRequest { username, password }).await?;
    session.sign_in(UserProfile::from_response(resp.user), resp.token);
    Ok(())
}

/// 注册新用户，不改变会话
pub async fn register<T: HttpTransport>(
    api: &ApiClient<T>,
    username: String,
    password: String,
) -> Result<MessageResponse, HttpError> {
    api.call(&RegisterRequest { username, password }).await
}

/// 注销并清除会话
///
/// 路由不做跳转，页面根据登录状态自行刷新。
pub fn logout(session: SessionStore) {
    session.logout();
}

/// 从后端拉取当前用户的最新资料；未登录时什么也不做
pub async fn refresh_profile<T: HttpTransport>(
    session: SessionStore,
    api: &ApiClient<T>,
) -> Result<(), HttpError> {
    if !session.is_logged_in() {
        return Ok(());
    }

    let username = session.user().username;
    let resp = api.call(&UserDetailsRequest { username }).await?;
    session.apply_profile(resp);
    Ok(())
}

/// 修改当前用户资料，并用后端返回的结果更新会话
pub async fn update_profile<T: HttpTransport>(
    session: SessionStore,
    api: &ApiClient<T>,
    update: UserUpdate,
) -> Result<(), HttpError> {
    let username = session.user().username;
    let resp = api.call(&UpdateUserRequest { username, update }).await?;
    session.apply_profile(resp.user);
    Ok(())
}
