use crate::api::use_api;
use crate::auth;
use crate::session::use_session;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tripdiary_shared::UserUpdate;

/// 把逗号分隔的输入拆成兴趣列表
fn parse_hobbies(raw: &str) -> Vec<String> {
    raw.split([',', '，'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// 个人资料卡片，可修改签名和兴趣
#[component]
pub fn ProfileCard() -> impl IntoView {
    let session = use_session();
    let api = use_api();
    let user = session.user_signal();

    let initial = session.user();
    let (signature, set_signature) = signal(initial.signature);
    let (hobbies, set_hobbies) = signal(initial.hobbies.join(", "));
    let (status, set_status) = signal(Option::<String>::None);

    let on_save = move |_: leptos::ev::MouseEvent| {
        let update = UserUpdate {
            signature: Some(signature.get_untracked()),
            hobbies: Some(parse_hobbies(&hobbies.get_untracked())),
            ..Default::default()
        };
        let api = api.clone();
        spawn_local(async move {
            match auth::update_profile(session, &api.backend, update).await {
                Ok(()) => set_status.set(Some("已保存".to_string())),
                Err(e) => set_status.set(Some(format!("保存失败: {}", e))),
            }
        });
    };

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title">{move || user.get().username}</h2>
                <p class="text-sm opacity-70">{move || user.get().role}</p>
                <input
                    type="text"
                    placeholder="个性签名"
                    class="input input-bordered input-sm"
                    on:input=move |ev| set_signature.set(event_target_value(&ev))
                    prop:value=signature
                />
                <input
                    type="text"
                    placeholder="兴趣 (逗号分隔)"
                    class="input input-bordered input-sm"
                    on:input=move |ev| set_hobbies.set(event_target_value(&ev))
                    prop:value=hobbies
                />
                <div class="card-actions items-center">
                    <button class="btn btn-sm btn-primary" on:click=on_save>"保存资料"</button>
                    {move || status.get().map(|msg| view! { <span class="text-sm">{msg}</span> })}
                </div>
            </div>
        </div>
    }
}
