use crate::auth;
use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::Link;
use leptos::prelude::*;

/// 顶部导航栏
#[component]
pub fn NavBar() -> impl IntoView {
    let session = use_session();
    let user = session.user_signal();

    let links = [
        (AppRoute::Recommend, "推荐"),
        (AppRoute::Plan, "路线规划"),
        (AppRoute::Diary, "旅游日记"),
        (AppRoute::CustomMap, "地图"),
    ];

    view! {
        <div class="navbar bg-base-100 shadow">
            <div class="flex-1 gap-2">
                {links
                    .into_iter()
                    .map(|(route, label)| {
                        view! { <Link to=route.to_path() attr:class="btn btn-ghost">{label}</Link> }
                    })
                    .collect_view()}
            </div>
            <div class="flex-none gap-2">
                {move || {
                    let current = user.get();
                    if current.is_logged_in {
                        view! {
                            <span class="font-semibold">{current.username}</span>
                            <button class="btn btn-sm" on:click=move |_| auth::logout(session)>
                                "退出登录"
                            </button>
                        }
                            .into_any()
                    } else {
                        view! {
                            <Link to=AppRoute::LoginRegister.to_path() attr:class="btn btn-sm btn-primary">
                                "登录 / 注册"
                            </Link>
                        }
                            .into_any()
                    }
                }}
            </div>
        </div>
    }
}
