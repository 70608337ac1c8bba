use crate::api::use_api;
use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tripdiary_shared::protocol::{AddDiaryRequest, DiaryDraft, ListDiariesRequest, TextToVideoRequest};
use tripdiary_shared::{ALL_USERS, DiaryEntry};

fn format_date(entry: &DiaryEntry) -> String {
    entry
        .timestamp
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// 日记列表页
///
/// 已登录时显示本人日记并可以发布新日记，未登录时显示全部日记。
#[component]
pub fn DiaryPage() -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let router = use_router();
    let user = session.user_signal();

    let (diaries, set_diaries) = signal(Vec::<DiaryEntry>::new());
    let (title, set_title) = signal(String::new());
    let (content, set_content) = signal(String::new());
    let (notification, set_notification) = signal(Option::<(String, bool)>::None); // 消息内容, 是否出错

    let load_diaries = {
        let api = api.clone();
        move || {
            let api = api.clone();
            let current = user.get_untracked();
            let owner = if current.is_logged_in {
                current.username
            } else {
                ALL_USERS.to_string()
            };
            spawn_local(async move {
                match api.backend.call(&ListDiariesRequest::for_user(owner)).await {
                    Ok(list) => set_diaries.set(list.diaries),
                    Err(e) => set_notification.set(Some((format!("加载日记失败: {}", e), true))),
                }
            });
        }
    };

    // 登录状态变化时重新加载
    Effect::new({
        let load_diaries = load_diaries.clone();
        move |_| {
            let _ = user.with(|u| u.is_logged_in);
            load_diaries();
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = DiaryDraft {
            username: user.get_untracked().username,
            title: title.get(),
            content: content.get(),
            ..Default::default()
        };
        if draft.title.is_empty() || draft.content.is_empty() {
            set_notification.set(Some(("标题和内容不能为空".to_string(), true)));
            return;
        }

        let api = api.clone();
        let load_diaries = load_diaries.clone();
        spawn_local(async move {
            match api.backend.call(&AddDiaryRequest::new(draft)).await {
                Ok(resp) => {
                    set_notification.set(Some((resp.message, false)));
                    set_title.set(String::new());
                    set_content.set(String::new());
                    load_diaries();
                }
                Err(e) => set_notification.set(Some((format!("发布失败: {}", e), true))),
            }
        });
    };

    view! {
        <div class="p-6 space-y-4">
            <h1 class="text-3xl font-bold">"旅游日记"</h1>

            {move || notification.get().map(|(msg, is_error)| {
                let class = if is_error { "alert alert-error" } else { "alert alert-success" };
                view! { <div role="alert" class=class><span>{msg}</span></div> }
            })}

            <Show when=move || user.with(|u| u.is_logged_in)>
                <form class="card bg-base-100 shadow card-body" on:submit=on_submit.clone()>
                    <input
                        type="text"
                        placeholder="标题"
                        class="input input-bordered"
                        on:input=move |ev| set_title.set(event_target_value(&ev))
                        prop:value=title
                    />
                    <textarea
                        placeholder="记录你的旅程"
                        class="textarea textarea-bordered"
                        on:input=move |ev| set_content.set(event_target_value(&ev))
                        prop:value=content
                    ></textarea>
                    <button class="btn btn-primary">"发布"</button>
                </form>
            </Show>

            <div class="grid gap-4">
                {move || diaries.get().into_iter().map(|entry| {
                    let id = entry.id;
                    let date = format_date(&entry);
                    view! {
                        <div
                            class="card bg-base-100 shadow cursor-pointer"
                            on:click=move |_| router.navigate_to_route(AppRoute::DiaryDetail { id })
                        >
                            <div class="card-body">
                                <h2 class="card-title">{entry.title}</h2>
                                <p class="text-sm opacity-70">{entry.username} " · " {date}</p>
                                <p>"浏览 " {entry.views} " · 评分 " {entry.rating}</p>
                            </div>
                        </div>
                    }
                }).collect_view()}
            </div>
        </div>
    }
}

/// 日记详情页，参数 `id` 来自路由 `/DiaryDetail/:id`
///
/// 后端没有单条查询接口，从全部日记中按 id 查找。
#[component]
pub fn DiaryDetailPage(id: i64) -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let is_logged_in = session.is_logged_in_signal();

    let (entry, set_entry) = signal(Option::<DiaryEntry>::None);
    let (status, set_status) = signal(Option::<String>::None);

    {
        let api = api.clone();
        spawn_local(async move {
            match api.backend.call(&ListDiariesRequest::for_user(ALL_USERS)).await {
                Ok(list) => match list.diaries.into_iter().find(|d| d.id == id) {
                    Some(found) => set_entry.set(Some(found)),
                    None => set_status.set(Some(format!("日记 {} 不存在", id))),
                },
                Err(e) => set_status.set(Some(format!("加载日记失败: {}", e))),
            }
        });
    }

    // 以日记标题为提示词生成视频
    let generate_video = move |_: leptos::ev::MouseEvent| {
        let Some(current) = entry.get_untracked() else {
            return;
        };
        let request = TextToVideoRequest {
            username: session.user().username,
            diary_id: current.id,
            prompt: current.title,
            quality: "speed".to_string(),
        };
        let api = api.clone();
        set_status.set(Some("视频生成任务提交中...".to_string()));
        spawn_local(async move {
            match api.ai.call(&request).await {
                Ok(resp) => set_status.set(Some(format!("已提交: {}", resp))),
                Err(e) => set_status.set(Some(format!("生成失败: {}", e))),
            }
        });
    };

    view! {
        <div class="p-6 space-y-4">
            <Link to=AppRoute::Diary.to_path() attr:class="btn btn-ghost btn-sm">"返回列表"</Link>

            {move || status.get().map(|msg| view! { <div class="alert"><span>{msg}</span></div> })}

            {move || entry.get().map(|d| {
                let date = format_date(&d);
                view! {
                    <article class="prose">
                        <h1>{d.title}</h1>
                        <p class="text-sm opacity-70">{d.username} " · " {date}</p>
                        <p>{d.content}</p>
                        <div class="flex gap-2">
                            {d.tags.into_iter().map(|tag| view! { <span class="badge">{tag}</span> }).collect_view()}
                        </div>
                    </article>
                }
            })}

            <Show when=move || is_logged_in.get() && entry.with(|e| e.is_some())>
                <button class="btn btn-secondary" on:click=generate_video.clone()>"生成旅行视频"</button>
            </Show>
        </div>
    }
}
