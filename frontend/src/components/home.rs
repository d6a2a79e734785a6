use crate::auth::use_auth;
use crate::web::router::Link;
use flightontime::AppRoute;
use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    let is_authenticated = use_auth().is_authenticated_signal();

    view! {
        <div class="hero min-h-[70vh]">
            <div class="hero-content text-center">
                <div class="max-w-xl space-y-6">
                    <h1 class="text-5xl font-bold">"FlightOnTime"</h1>
                    <p class="text-lg text-base-content/70">
                        "Preveja atrasos de voos com base em dados históricos e condições meteorológicas."
                    </p>
                    <Show
                        when=move || is_authenticated.get()
                        fallback=|| view! {
                            <Link to=AppRoute::Login class="btn btn-primary">"Entrar"</Link>
                        }
                    >
                        <Link to=AppRoute::Dashboard class="btn btn-primary">"Fazer Predição"</Link>
                    </Show>
                </div>
            </div>
        </div>
    }
}
