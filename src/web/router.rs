//! 路由服务模块 - 核心引擎
//!
//! 使用 hash 风格的 URL (`#/SpotDetail/Paris`)，所有对 `window.location` 的操作
//! 都集中在此模块。导航流程："监听 -> 解析 -> 守卫 -> 加载"。

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// 从 location.hash 中取出路由路径 (`#/Plan` -> `/Plan`)
pub fn path_from_hash(hash: &str) -> &str {
    hash.strip_prefix('#').unwrap_or(hash)
}

/// 获取当前 hash 路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .map(|hash| path_from_hash(&hash).to_string())
        .unwrap_or_default()
}

/// 写入 hash，产生新的历史记录
fn push_hash(path: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_hash(path);
    }
}

/// 替换当前历史记录（用于重定向和初始规范化）
fn replace_hash(path: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().replace(&format!("#{}", path));
    }
}

/// 路由器服务
///
/// 当前路由保存在信号中，驱动 `RouterOutlet` 重新渲染。
/// 登录状态由外部注入，路由本身不依赖会话模块。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        let path = current_path();
        let initial_route = AppRoute::from_path(&path);
        // 空 hash 或无效写法统一规范化为路由自身的路径
        if initial_route != AppRoute::NotFound && path != initial_route.to_path() {
            replace_hash(&initial_route.to_path());
        }
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            is_authenticated,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    pub fn navigate_to_route(&self, target_route: AppRoute) {
        let route = target_route.clone().guard(self.is_authenticated.get_untracked());

        if route != target_route {
            log::info!("[Router] Already logged in. Redirecting to {}.", route.name());
            replace_hash(&route.to_path());
        } else {
            log::debug!("[Router] navigate -> {} ({})", route.name(), route);
            push_hash(&route.to_path());
        }
        self.set_route.set(route);
    }

    /// 监听浏览器 hash 变化（链接点击、手动输入、后退/前进按钮）
    ///
    /// 站内链接都是普通锚点，守卫必须在这里再执行一次。
    fn init_hashchange_listener(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target_route = AppRoute::from_path(&current_path());
            let route = target_route.clone().guard(is_authenticated.get_untracked());
            if route != target_route {
                log::info!("[Router] Already logged in. Redirecting to {}.", route.name());
                replace_hash(&route.to_path());
            }
            // navigate 已经更新过信号时不再重复触发渲染
            if current_route.get_untracked() != route {
                set_route.set(route);
            }
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 登录成功时离开登录注册页
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        Effect::new(move |_| {
            let is_auth = is_authenticated.get();
            let route = current_route.get_untracked();
            let guarded = route.clone().guard(is_auth);

            if guarded != route {
                push_hash(&guarded.to_path());
                set_route.set(guarded);
                log::info!("[Router] Logged in, redirecting to Recommend.");
            }
        });
    }
}

fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);

    router.init_hashchange_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
#[component]
pub fn Router(
    /// 登录状态信号
    is_authenticated: Signal<bool>,
    children: Children,
) -> impl IntoView {
    provide_router(is_authenticated);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 站内链接
///
/// 渲染为 `href="#/..."` 的普通锚点，点击后由 hashchange 监听更新路由。
/// 样式通过 `attr:class` 传入。
#[component]
pub fn Link(#[prop(into)] to: String, children: Children) -> impl IntoView {
    view! {
        <a href=format!("#{}", to)>
            {children()}
        </a>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_from_hash() {
        assert_eq!(path_from_hash("#/SpotDetail/Paris"), "/SpotDetail/Paris");
        assert_eq!(path_from_hash(""), "");
        assert_eq!(path_from_hash("/Plan"), "/Plan");
    }
}
