//! 会话状态模块
//!
//! 用户资料与 token 合并在同一个 `SessionState` 中，由单个信号持有，
//! 登录、注销都是一次原子更新。`SessionStore` 通过 Context 注入到组件和
//! HTTP 拦截器，不存在进程级单例。

use leptos::prelude::*;
use tripdiary_shared::{UserProfile, UserResponse};

/// 会话记录
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub user: UserProfile,
    pub token: Option<String>,
}

impl SessionState {
    /// 可用于鉴权的 token，空字符串视为不存在
    pub fn bearer_token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }
}

#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("invalid user record shape: {0}")]
    InvalidUserRecord(String),
}

/// 会话存储
///
/// 包含读写信号，`Copy` 语义，可以随意传入闭包和拦截器。
#[derive(Debug, Clone, Copy)]
pub struct SessionStore {
    state: ReadSignal<SessionState>,
    set_state: WriteSignal<SessionState>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// 创建处于未登录状态的会话
    pub fn new() -> Self {
        let (state, set_state) = signal(SessionState::default());
        Self { state, set_state }
    }

    // --- Mutations ---

    /// 整体替换用户资料，token 保持不变
    #[allow(dead_code)]
    pub fn set_user(&self, user: UserProfile) {
        log::debug!("[Session] set_user: {}", user.username);
        self.set_state.update(|state| state.user = user);
    }

    /// 校验并写入未经类型检查的用户资料
    ///
    /// 校验失败时会话保持不变。
    #[allow(dead_code)]
    pub fn set_user_json(&self, raw: &str) -> Result<(), SessionError> {
        let user = parse_user_record(raw)?;
        self.set_user(user);
        Ok(())
    }

    /// 单独设置或清除 token
    #[allow(dead_code)]
    pub fn set_token(&self, token: Option<String>) {
        log::debug!("[Session] set_token: present={}", token.is_some());
        self.set_state.update(|state| state.token = token);
    }

    /// 登录：资料与 token 在同一次更新中写入，并强制 `is_logged_in = true`
    pub fn sign_in(&self, mut user: UserProfile, token: Option<String>) {
        log::info!("[Session] signed in as {}", user.username);
        user.is_logged_in = true;
        self.set_state.set(SessionState { user, token });
    }

    /// 用后端返回的最新资料刷新当前用户，登录标志与 token 不变
    pub fn apply_profile(&self, resp: UserResponse) {
        self.set_state.update(|state| {
            let is_logged_in = state.user.is_logged_in;
            state.user = UserProfile {
                is_logged_in,
                ..UserProfile::from_response(resp)
            };
        });
    }

    /// 注销：资料恢复默认值，同时清除 token
    pub fn logout(&self) {
        log::info!("[Session] logged out");
        self.set_state.set(SessionState::default());
    }

    // --- Accessors (无副作用，不建立响应式依赖) ---

    pub fn is_logged_in(&self) -> bool {
        self.state.with_untracked(|s| s.user.is_logged_in)
    }

    pub fn user(&self) -> UserProfile {
        self.state.with_untracked(|s| s.user.clone())
    }

    pub fn token(&self) -> Option<String> {
        self.state.with_untracked(|s| s.bearer_token().map(str::to_string))
    }

    #[allow(dead_code)]
    pub fn snapshot(&self) -> SessionState {
        self.state.get_untracked()
    }

    // --- Reactive accessors (用于视图和路由) ---

    pub fn is_logged_in_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.user.is_logged_in))
    }

    pub fn user_signal(&self) -> Signal<UserProfile> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.user.clone()))
    }
}

/// 解析并校验用户资料
///
/// 必须是包含全部字段且类型正确的 JSON 对象；已登录的记录必须带有真实的 id 和用户名。
#[allow(dead_code)]
fn parse_user_record(raw: &str) -> Result<UserProfile, SessionError> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| SessionError::InvalidUserRecord(format!("not valid JSON: {}", e)))?;

    if !value.is_object() {
        return Err(SessionError::InvalidUserRecord(
            "expected a JSON object".to_string(),
        ));
    }

    let user: UserProfile = serde_json::from_value(value)
        .map_err(|e| SessionError::InvalidUserRecord(e.to_string()))?;

    if user.is_logged_in && (user.id < 0 || user.username.is_empty()) {
        return Err(SessionError::InvalidUserRecord(
            "logged-in record needs an id and a username".to_string(),
        ));
    }

    Ok(user)
}

/// 创建会话存储并提供到 Context
pub fn provide_session() -> SessionStore {
    let session = SessionStore::new();
    provide_context(session);
    session
}

/// 从 Context 获取会话存储
pub fn use_session() -> SessionStore {
    use_context::<SessionStore>().expect("SessionStore should be provided")
}
