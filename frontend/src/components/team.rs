use leptos::prelude::*;

const ROLES: [(&str, &str); 3] = [
    ("Data Science", "Modelo de predição de atrasos"),
    ("Data Engineering", "Coleta de dados de voos e meteorologia"),
    ("Backend", "API REST de autenticação, predição e histórico"),
];

#[component]
pub fn TeamPage() -> impl IntoView {
    view! {
        <div class="max-w-4xl mx-auto px-4 py-10 space-y-8">
            <div class="text-center">
                <h1 class="text-4xl font-bold">"Equipe"</h1>
                <p class="text-base-content/70 mt-2">"Conheça a equipe por trás do projeto FlightOnTime"</p>
            </div>
            <div class="grid md:grid-cols-3 gap-6">
                {ROLES
                    .iter()
                    .map(|(area, description)| view! {
                        <div class="card bg-base-100 shadow">
                            <div class="card-body">
                                <h2 class="card-title">{*area}</h2>
                                <p class="text-sm text-base-content/70">{*description}</p>
                            </div>
                        </div>
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
