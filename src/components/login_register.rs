use crate::api::use_api;
use crate::auth;
use crate::session::use_session;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Login,
    Register,
}

#[component]
pub fn LoginRegisterPage() -> impl IntoView {
    let session = use_session();
    let api = use_api();

    let (mode, set_mode) = signal(Mode::Login);
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (notice, set_notice) = signal(Option::<(String, bool)>::None); // 消息内容, 是否出错

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let (user, pass) = (username.get(), password.get());
        if user.is_empty() || pass.is_empty() {
            set_notice.set(Some(("请填写用户名和密码".to_string(), true)));
            return;
        }

        set_is_submitting.set(true);
        set_notice.set(None);

        let api = api.clone();
        spawn_local(async move {
            match mode.get_untracked() {
                Mode::Login => match auth::login(session, &api.backend, user, pass).await {
                    // 跳转由路由服务监听登录状态完成
                    Ok(()) => {
                        if let Err(e) = auth::refresh_profile(session, &api.backend).await {
                            log::warn!("[Login] profile refresh failed: {}", e);
                        }
                    }
                    Err(e) => set_notice.set(Some((format!("登录失败: {}", e), true))),
                },
                Mode::Register => match auth::register(&api.backend, user, pass).await {
                    Ok(resp) => {
                        set_notice.set(Some((resp.message, false)));
                        set_mode.set(Mode::Login);
                    }
                    Err(e) => set_notice.set(Some((format!("注册失败: {}", e), true))),
                },
            }
            set_is_submitting.set(false);
        });
    };

    let toggle_mode = move |_: leptos::ev::MouseEvent| {
        set_notice.set(None);
        set_mode.update(|m| {
            *m = match m {
                Mode::Login => Mode::Register,
                Mode::Register => Mode::Login,
            }
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold">
                    {move || if mode.get() == Mode::Login { "登录" } else { "注册" }}
                </h1>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        {move || notice.get().map(|(msg, is_error)| {
                            let class = if is_error { "alert alert-error text-sm py-2" } else { "alert alert-success text-sm py-2" };
                            view! { <div role="alert" class=class><span>{msg}</span></div> }
                        })}

                        <div class="form-control">
                            <label class="label" for="username">
                                <span class="label-text">"用户名"</span>
                            </label>
                            <input
                                id="username"
                                type="text"
                                on:input=move |ev| set_username.set(event_target_value(&ev))
                                prop:value=username
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"密码"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || match (is_submitting.get(), mode.get()) {
                                    (true, _) => "提交中...",
                                    (false, Mode::Login) => "登录",
                                    (false, Mode::Register) => "注册",
                                }}
                            </button>
                        </div>
                        <button type="button" class="btn btn-link" on:click=toggle_mode>
                            {move || if mode.get() == Mode::Login { "没有账号？去注册" } else { "已有账号？去登录" }}
                        </button>
                    </form>
                </div>
            </div>
        </div>
    }
}
