//! 旅游日记前端应用
//!
//! 采用 Context-Driven 架构：
//! - `session`: 会话状态（当前用户 + token）
//! - `api`: 后端客户端，拦截器自动注入 Bearer token
//! - `web::route`: 路由表（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `components`: UI 组件层

mod api;
mod auth;
mod config;
mod session;
mod components {
    pub mod diary;
    pub mod login_register;
    pub mod nav;
    pub mod profile;
    pub mod recommend;
    pub mod spot_detail;
}

use crate::api::provide_api;
use crate::components::diary::{DiaryDetailPage, DiaryPage};
use crate::components::login_register::LoginRegisterPage;
use crate::components::nav::NavBar;
use crate::components::recommend::RecommendPage;
use crate::components::spot_detail::SpotDetailPage;
use crate::config::AppConfig;
use crate::session::provide_session;

use leptos::prelude::*;

// 浏览器 API 封装：HTTP 传输层与 hash 路由
pub(crate) mod web {
    mod http;
    pub mod route;
    pub mod router;

    #[cfg(test)]
    pub use http::MockTransport;
    pub use http::{FetchTransport, HttpError, HttpRequest, HttpResponse, HttpTransport};
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

fn placeholder_page(title: &'static str, hint: &'static str) -> AnyView {
    view! {
        <div class="p-6">
            <h1 class="text-3xl font-bold">{title}</h1>
            <p class="mt-2 opacity-70">{hint}</p>
        </div>
    }
    .into_any()
}

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Recommend => view! { <RecommendPage /> }.into_any(),
        AppRoute::Plan => placeholder_page("路线规划", "选择起点和途经景点生成游览路线"),
        AppRoute::Diary => view! { <DiaryPage /> }.into_any(),
        AppRoute::LoginRegister => view! { <LoginRegisterPage /> }.into_any(),
        AppRoute::CustomMap => placeholder_page("地图", "在地图上查看景点位置"),
        AppRoute::SpotDetail { name } => view! { <SpotDetailPage name=name /> }.into_any(),
        AppRoute::DiaryDetail { id } => view! { <DiaryDetailPage id=id /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"页面未找到"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 构建期配置（后端地址）
    let config = AppConfig::from_build_env();
    log::info!("[App] backend = {}, ai = {}", config.api_base_url, config.ai_base_url);

    // 2. 会话状态，页面刷新后从未登录开始
    let session = provide_session();

    // 3. API 客户端共享同一个会话，由拦截器读取 token
    provide_api(&config, session);

    view! {
        // 4. 路由器组件：注入登录状态信号实现守卫
        <Router is_authenticated=session.is_logged_in_signal()>
            <NavBar />
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
