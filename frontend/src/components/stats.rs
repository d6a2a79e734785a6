use crate::api::use_api;
use crate::data::use_data;
use flightontime_shared::date::format_stats_date;
use flightontime_shared::format::{DelaySeverity, format_percentage};
use flightontime_shared::stats::{RECENT_DATES, TOP_RANKING};
use flightontime_shared::{DelayTally, FlightStats, airport_name};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 表格中的一行：标签、副标题、计数
#[derive(Clone)]
struct TallyRow {
    label: String,
    detail: Option<String>,
    tally: DelayTally,
}

#[component]
fn TallyTable(
    title: &'static str,
    description: &'static str,
    column: &'static str,
    rows: Vec<TallyRow>,
) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title">{title}</h2>
                <p class="text-sm text-base-content/70">{description}</p>
                <table class="table table-sm">
                    <thead>
                        <tr>
                            <th>{column}</th>
                            <th class="text-right">"Voos"</th>
                            <th class="text-right">"Atrasados"</th>
                            <th class="text-right">"Taxa"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {rows
                            .into_iter()
                            .map(|row| {
                                let severity = DelaySeverity::from_percentage(row.tally.delay_percentage);
                                view! {
                                    <tr>
                                        <td>
                                            <div class="font-semibold">{row.label}</div>
                                            {row.detail.map(|d| view! { <div class="text-xs text-base-content/50">{d}</div> })}
                                        </td>
                                        <td class="text-right">{row.tally.total_flights}</td>
                                        <td class="text-right">{row.tally.delayed_flights}</td>
                                        <td class="text-right">
                                            <span class=format!("badge {}", severity.css_class())>
                                                {format_percentage(row.tally.delay_percentage)}
                                            </span>
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()}
                    </tbody>
                </table>
            </div>
        </div>
    }
}

#[component]
pub fn StatsPage() -> impl IntoView {
    let api = use_api();
    let data = use_data();

    let (stats, set_stats) = signal(Option::<FlightStats>::None);
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    spawn_local(async move {
        match api.flight_stats().await {
            Ok(s) => set_stats.set(Some(s)),
            Err(e) => set_error_msg.set(Some(e.message().to_string())),
        }
        set_loading.set(false);
    });

    let content = move || {
        if loading.get() {
            return view! {
                <div class="text-center py-16">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                    <p class="mt-4 text-base-content/50">"Carregando estatísticas..."</p>
                </div>
            }
            .into_any();
        }
        if let Some(msg) = error_msg.get() {
            return view! {
                <div role="alert" class="alert alert-error"><span>{msg}</span></div>
            }
            .into_any();
        }
        let Some(stats) = stats.get() else {
            return ().into_any();
        };

        let airports = data.with(|c| c.airports().to_vec());
        let overall = stats.overall_stats.clone();

        let airline_rows = stats
            .airlines_by_volume()
            .into_iter()
            .map(|s| TallyRow { label: s.airline, detail: None, tally: s.tally })
            .collect::<Vec<_>>();
        let origin_rows = stats
            .worst_origins(TOP_RANKING)
            .into_iter()
            .map(|s| TallyRow {
                detail: Some(airport_name(&airports, &s.origin).to_string()),
                label: s.origin,
                tally: s.tally,
            })
            .collect::<Vec<_>>();
        let destination_rows = stats
            .worst_destinations(TOP_RANKING)
            .into_iter()
            .map(|s| TallyRow {
                detail: Some(airport_name(&airports, &s.destination).to_string()),
                label: s.destination,
                tally: s.tally,
            })
            .collect::<Vec<_>>();
        let route_rows = stats
            .worst_routes(TOP_RANKING)
            .into_iter()
            .map(|s| TallyRow {
                label: format!("{} → {}", s.origin, s.destination),
                detail: None,
                tally: s.tally,
            })
            .collect::<Vec<_>>();
        let date_rows = stats
            .recent_dates(RECENT_DATES)
            .iter()
            .map(|s| TallyRow {
                label: format_stats_date(&s.date),
                detail: None,
                tally: s.tally.clone(),
            })
            .collect::<Vec<_>>();

        view! {
            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100 mb-8">
                <div class="stat">
                    <div class="stat-title">"Total de Voos"</div>
                    <div class="stat-value">{overall.total_flights}</div>
                </div>
                <div class="stat">
                    <div class="stat-title">"Voos Atrasados"</div>
                    <div class="stat-value text-error">{overall.delayed_flights}</div>
                </div>
                <div class="stat">
                    <div class="stat-title">"Voos Pontuais"</div>
                    <div class="stat-value text-success">{overall.ontime_flights}</div>
                </div>
                <div class="stat">
                    <div class="stat-title">"Taxa de Atrasos"</div>
                    <div class="stat-value text-warning">{format_percentage(overall.delay_percentage)}</div>
                </div>
            </div>

            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6 mb-6">
                <TallyTable
                    title="Por Companhia Aérea"
                    description="Performance de pontualidade por operadora"
                    column="Companhia"
                    rows=airline_rows
                />
                <TallyTable
                    title="Por Origem"
                    description="Aeroportos com mais voos atrasados na partida"
                    column="Aeroporto"
                    rows=origin_rows
                />
                <TallyTable
                    title="Por Destino"
                    description="Aeroportos com mais voos atrasados na chegada"
                    column="Aeroporto"
                    rows=destination_rows
                />
                <TallyTable
                    title="Por Rota"
                    description="Rotas mais problemáticas"
                    column="Rota"
                    rows=route_rows
                />
            </div>

            <TallyTable
                title="Evolução Temporal"
                description="Histórico de atrasos por data"
                column="Data"
                rows=date_rows
            />
        }
        .into_any()
    };

    view! {
        <div class="max-w-7xl mx-auto px-4 py-8">
            <h1 class="text-3xl font-bold mb-2">"Estatísticas de Voos"</h1>
            <p class="text-base-content/70 mb-8">"Análise completa de desempenho e pontualidade"</p>
            {content}
        </div>
    }
}
