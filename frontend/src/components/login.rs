use crate::api::use_api;
use crate::auth::{login, use_auth};
use crate::data::use_data;
use crate::web::google;
use crate::web::router::{Link, use_router};
use flightontime::AppRoute;
use flightontime::forms::{self, LoginForm};
use flightontime::log_warn;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let data = use_data();
    let api = use_api();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = {
        let api = api.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            set_is_submitting.set(true);
            set_error_msg.set(None);

            let form = LoginForm {
                email: email.get_untracked(),
                password: password.get_untracked(),
            };
            let api = api.clone();
            spawn_local(async move {
                match forms::login(&api, &form).await {
                    Ok(token) => {
                        login(&auth, &data, token);
                        router.navigate_to(AppRoute::auth_success_redirect());
                    }
                    Err(e) => set_error_msg.set(Some(e.message().to_string())),
                }
                set_is_submitting.set(false);
            });
        }
    };

    // Google Identity Services 回调给出的凭据
    let on_google = {
        let api = api.clone();
        move |credential: Option<String>| {
            set_is_submitting.set(true);
            set_error_msg.set(None);

            let api = api.clone();
            spawn_local(async move {
                match forms::google_login(&api, credential.as_deref()).await {
                    Ok(token) => {
                        login(&auth, &data, token);
                        router.navigate_to(AppRoute::auth_success_redirect());
                    }
                    Err(e) => set_error_msg.set(Some(e.message().to_string())),
                }
                set_is_submitting.set(false);
            });
        }
    };

    // 容器挂载后渲染官方按钮，未配置或脚本不可用时隐藏
    let google_button = NodeRef::<leptos::html::Div>::new();
    let (google_ready, set_google_ready) = signal(false);
    let google_client_id = api.config().google_client_id.clone();
    Effect::new(move |_| {
        let Some(container) = google_button.get() else {
            return;
        };
        let Some(client_id) = google_client_id.as_deref() else {
            log_warn!("[Login] Google client id not configured");
            return;
        };
        match google::render_button(&container, client_id, on_google.clone()) {
            Ok(()) => set_google_ready.set(true),
            Err(e) => log_warn!("[Login] Google Identity Services unavailable: {:?}", e),
        }
    });

    view! {
        <div class="hero min-h-[70vh]">
            <div class="hero-content flex-col w-full max-w-sm">
                <h1 class="text-2xl font-semibold text-center">"Entrar"</h1>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="seu@email.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Senha"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Entrando..." }.into_any()
                                } else {
                                    "Entrar".into_any()
                                }}
                            </button>
                        </div>

                        <Show when=move || google_ready.get()>
                            <div class="divider text-xs">"ou"</div>
                        </Show>
                        <div node_ref=google_button class="flex justify-center"></div>

                        <p class="text-center text-sm mt-4">
                            "Não tem uma conta? "
                            <Link to=AppRoute::Register class="link link-primary">"Cadastre-se"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
