use crate::api::use_api;
use crate::components::profile::ProfileCard;
use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::Link;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;
use tripdiary_shared::protocol::{ListSpotsRequest, RecommendRequest};
use tripdiary_shared::{
    RecommendItem, RecommendResponse, SortOrder, Spot, SpotSortKey, UserProfile,
};

/// 推荐条目的展示名称，推荐结果里景点/美食用 `name`，日记用 `title`
fn item_label(item: &Value) -> String {
    item.get("name")
        .or_else(|| item.get("title"))
        .and_then(Value::as_str)
        .unwrap_or("未命名")
        .to_string()
}

/// 推荐请求对应的用户，未登录时为 `None`
///
/// 只取用户名，签名、兴趣等资料变化不影响结果。
fn recommend_target(user: &UserProfile) -> Option<String> {
    user.is_logged_in.then(|| user.username.clone())
}

fn recommend_section(title: &'static str, items: Vec<RecommendItem>) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title">{title}</h2>
                <ul class="list-disc pl-5">
                    {items
                        .into_iter()
                        .map(|r| {
                            let label = item_label(&r.item);
                            view! {
                                <li>
                                    {label} " "
                                    <span class="text-xs opacity-60">{format!("{:.2}", r.final_score)}</span>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </div>
        </div>
    }
}

/// 首页：个性化推荐 + 热门景点
#[component]
pub fn RecommendPage() -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let is_logged_in = session.is_logged_in_signal();
    let user = session.user_signal();
    // 资料更新不会触发重新请求
    let recommend_for = Memo::new(move |_| user.with(recommend_target));

    let (spots, set_spots) = signal(Vec::<Spot>::new());
    let (recommend, set_recommend) = signal(Option::<RecommendResponse>::None);
    let (sort_key, set_sort_key) = signal(SpotSortKey::Rating);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 排序方式变化时重新拉取景点
    Effect::new({
        let api = api.clone();
        move |_| {
            let request = ListSpotsRequest {
                sort_key: sort_key.get(),
                sort_order: SortOrder::Desc,
            };
            let api = api.clone();
            spawn_local(async move {
                match api.backend.call(&request).await {
                    Ok(list) => set_spots.set(list),
                    Err(e) => set_error_msg.set(Some(format!("加载景点失败: {}", e))),
                }
            });
        }
    });

    // 推荐依赖用户画像，仅登录后请求
    Effect::new(move |_| {
        set_recommend.set(None);
        let Some(username) = recommend_for.get() else {
            return;
        };
        let api = api.clone();
        spawn_local(async move {
            match api.backend.call(&RecommendRequest { username }).await {
                Ok(data) => set_recommend.set(Some(data)),
                Err(e) => log::warn!("[Recommend] fetch failed: {}", e),
            }
        });
    });

    view! {
        <div class="p-6 space-y-6">
            <h1 class="text-3xl font-bold">"为你推荐"</h1>

            {move || error_msg.get().map(|msg| view! {
                <div role="alert" class="alert alert-error"><span>{msg}</span></div>
            })}

            <Show
                when=move || is_logged_in.get()
                fallback=|| view! {
                    <p class="opacity-70">
                        <Link to=AppRoute::LoginRegister.to_path() attr:class="link">"登录"</Link>
                        "后查看个性化推荐"
                    </p>
                }
            >
                <ProfileCard />
                {move || match recommend.get() {
                    Some(data) => view! {
                        <div class="grid gap-4 md:grid-cols-2">
                            {recommend_section("景点", data.scenic_spots)}
                            {recommend_section("美食", data.foods)}
                            {recommend_section("学校", data.schools)}
                            {recommend_section("日记", data.diaries)}
                        </div>
                    }
                    .into_any(),
                    None => view! { <p class="opacity-70">"暂无推荐"</p> }.into_any(),
                }}
            </Show>

            <div class="flex items-center gap-2">
                <h2 class="text-2xl font-semibold flex-1">"热门景点"</h2>
                <button
                    class="btn btn-sm"
                    class:btn-active=move || sort_key.get() == SpotSortKey::Rating
                    on:click=move |_| set_sort_key.set(SpotSortKey::Rating)
                >
                    "按评分"
                </button>
                <button
                    class="btn btn-sm"
                    class:btn-active=move || sort_key.get() == SpotSortKey::Popularity
                    on:click=move |_| set_sort_key.set(SpotSortKey::Popularity)
                >
                    "按热度"
                </button>
            </div>

            <div class="grid gap-4 md:grid-cols-3">
                {move || spots.get().into_iter().map(|s| {
                    let route = AppRoute::SpotDetail { name: s.name.clone() };
                    view! {
                        <div class="card bg-base-100 shadow">
                            <div class="card-body">
                                <Link to=route.to_path() attr:class="card-title link-hover">{s.name}</Link>
                                <p class="text-sm opacity-70">{s.location}</p>
                                <p>"评分 " {s.rating} " · 热度 " {s.popularity}</p>
                            </div>
                        </div>
                    }
                }).collect_view()}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_label_prefers_name_then_title() {
        assert_eq!(item_label(&json!({"name": "故宫", "title": "x"})), "故宫");
        assert_eq!(item_label(&json!({"title": "北京三日游"})), "北京三日游");
        assert_eq!(item_label(&json!({"id": 1})), "未命名");
    }

    #[test]
    fn test_recommend_target_ignores_profile_edits() {
        assert_eq!(recommend_target(&UserProfile::default()), None);

        let user = UserProfile {
            is_logged_in: true,
            id: 1,
            username: "alice".to_string(),
            ..Default::default()
        };
        let edited = UserProfile {
            signature: "去看海".to_string(),
            hobbies: vec!["摄影".to_string()],
            ..user.clone()
        };
        assert_eq!(recommend_target(&user), Some("alice".to_string()));
        assert_eq!(recommend_target(&edited), recommend_target(&user));
    }
}
