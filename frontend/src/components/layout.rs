use crate::auth::{logout, use_auth};
use crate::data::use_data;
use crate::web::router::{Link, use_router};
use flightontime::AppRoute;
use leptos::prelude::*;

/// 当前路由对应的导航链接样式
fn nav_class(active: AppRoute) -> Signal<String> {
    let router = use_router();
    Signal::derive(move || {
        if router.current_route().get() == active {
            "btn btn-ghost btn-sm text-primary font-semibold".to_string()
        } else {
            "btn btn-ghost btn-sm".to_string()
        }
    })
}

#[component]
pub fn Header() -> impl IntoView {
    let auth = use_auth();
    let data = use_data();
    let router = use_router();
    let is_authenticated = auth.is_authenticated_signal();

    let on_logout = move |_: web_sys::MouseEvent| {
        logout(&auth, &data);
        router.navigate_to(AppRoute::Login);
    };

    view! {
        <header class="navbar bg-neutral text-neutral-content shadow-md px-4 md:px-8">
            <div class="flex-1">
                <Link to=AppRoute::Home class="btn btn-ghost text-xl">
                    "FlightOnTime"
                </Link>
            </div>
            <nav class="flex-none flex items-center gap-2">
                <Link to=AppRoute::Home class=nav_class(AppRoute::Home)>"Início"</Link>
                <Show
                    when=move || is_authenticated.get()
                    fallback=|| view! {
                        <Link to=AppRoute::Login class=nav_class(AppRoute::Login)>"Login"</Link>
                        <Link to=AppRoute::Register class="btn btn-secondary btn-sm">"Cadastrar"</Link>
                    }
                >
                    <Link to=AppRoute::Dashboard class=nav_class(AppRoute::Dashboard)>"Predição"</Link>
                    <Link to=AppRoute::Flights class=nav_class(AppRoute::Flights)>"Voos"</Link>
                    <Link to=AppRoute::Stats class=nav_class(AppRoute::Stats)>"Estatísticas"</Link>
                    <button class="btn btn-ghost btn-sm hover:text-error" on:click=on_logout>
                        "Sair"
                    </button>
                </Show>
            </nav>
        </header>
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="footer footer-center p-4 bg-base-300 text-base-content text-sm">
            <div class="flex gap-4">
                <span>"FlightOnTime · Predição de Atrasos de Voos"</span>
                <Link to=AppRoute::Team class="link link-hover">"Equipe"</Link>
            </div>
        </footer>
    }
}
