use crate::api::use_api;
use crate::web::route::AppRoute;
use crate::web::router::Link;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tripdiary_shared::Spot;
use tripdiary_shared::protocol::{SpotRequest, SpotsByTagRequest};

/// 景点详情页，参数 `name` 来自路由 `/SpotDetail/:name`
#[component]
pub fn SpotDetailPage(name: String) -> impl IntoView {
    let api = use_api();

    let (spot, set_spot) = signal(Option::<Spot>::None);
    let (related, set_related) = signal(Vec::<Spot>::new());
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    {
        let api = api.clone();
        let request = SpotRequest { name: name.clone() };
        spawn_local(async move {
            match api.backend.call(&request).await {
                Ok(data) => set_spot.set(Some(data)),
                Err(e) => set_error_msg.set(Some(format!("加载景点失败: {}", e))),
            }
        });
    }

    let load_related = move |tag: String| {
        let api = api.clone();
        spawn_local(async move {
            match api.backend.call(&SpotsByTagRequest { tag }).await {
                Ok(list) => set_related.set(list),
                Err(e) => log::warn!("[SpotDetail] tag lookup failed: {}", e),
            }
        });
    };

    view! {
        <div class="p-6 space-y-4">
            <h1 class="text-3xl font-bold">{name}</h1>

            {move || error_msg.get().map(|msg| view! {
                <div role="alert" class="alert alert-error"><span>{msg}</span></div>
            })}

            {move || spot.get().map(|s| {
                let load_related = load_related.clone();
                view! {
                    <div class="card bg-base-100 shadow">
                        <div class="card-body">
                            <p>{s.description}</p>
                            <p class="text-sm opacity-70">{s.location}</p>
                            <p>"评分: " {s.rating} " · 热度: " {s.popularity} " · 价格: " {s.price_range}</p>
                            <p>"开放时间: 工作日 " {s.open_hours.weekday} " / 周末 " {s.open_hours.weekend}</p>
                            <div class="flex gap-2">
                                {s.tags.into_iter().map(|tag| {
                                    let load_related = load_related.clone();
                                    let label = tag.clone();
                                    view! {
                                        <button class="badge badge-outline" on:click=move |_| load_related(tag.clone())>
                                            {label}
                                        </button>
                                    }
                                }).collect_view()}
                            </div>
                        </div>
                    </div>
                }
            })}

            <ul class="menu">
                {move || related.get().into_iter().map(|s| {
                    let route = AppRoute::SpotDetail { name: s.name.clone() };
                    view! { <li><Link to=route.to_path()>{s.name}</Link></li> }
                }).collect_view()}
            </ul>
        </div>
    }
}
