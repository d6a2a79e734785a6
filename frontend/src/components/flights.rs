use crate::api::use_api;
use crate::data::use_data;
use flightontime::history::{HistoryFilter, HistoryRow};
use flightontime::log_error;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn FlightsPage() -> impl IntoView {
    let api = use_api();
    let data = use_data();

    let (filter, set_filter) = signal(HistoryFilter::All);
    let (notice, set_notice) = signal(Option::<String>::None);
    let (deleting, set_deleting) = signal(Option::<i64>::None);

    // 从未加载或上次失败且为空时获取
    if data.with_untracked(|c| c.needs_history()) {
        data.refetch_flights(api.clone());
    }

    let rows = Memo::new(move |_| {
        data.with(|c| {
            let current = filter.get();
            current
                .apply(c.flights())
                .into_iter()
                .map(|record| HistoryRow::new(record, c.airlines(), c.airports()))
                .collect::<Vec<_>>()
        })
    });

    let on_delete = Callback::new(move |id: i64| {
        set_deleting.set(Some(id));
        set_notice.set(None);
        let api = api.clone();
        spawn_local(async move {
            if let Err(e) = data.delete_flight(&api, id).await {
                log_error!("[Flights] Failed to delete {}: {}", id, e);
                set_notice.set(Some(e.message().to_string()));
            }
            set_deleting.set(None);
        });
    });

    view! {
        <div class="max-w-7xl mx-auto px-4 py-8">
            <div class="text-center mb-8">
                <h1 class="text-5xl font-extrabold">"Voos"</h1>
                <span class="text-xs uppercase tracking-widest text-primary/60">
                    "Histórico de predições de voos realizadas"
                </span>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <div class="flex items-center justify-between flex-wrap gap-2">
                        <div>
                            <h2 class="card-title">"Histórico de Voos"</h2>
                            <p class="text-sm text-base-content/70">"Lista de todas as predições realizadas"</p>
                        </div>
                        <div class="join">
                            {HistoryFilter::ALL
                                .into_iter()
                                .map(|f| view! {
                                    <button
                                        class=move || {
                                            if filter.get() == f {
                                                "btn btn-sm join-item btn-primary"
                                            } else {
                                                "btn btn-sm join-item btn-outline"
                                            }
                                        }
                                        on:click=move |_| set_filter.set(f)
                                    >
                                        {f.label()}
                                    </button>
                                })
                                .collect_view()}
                        </div>
                    </div>

                    <Show when=move || notice.get().is_some()>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <span>{move || notice.get().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <Show
                        when=move || rows.with(|r| !r.is_empty())
                        fallback=|| view! {
                            <div class="text-center py-8 text-base-content/50">"Nenhum voo encontrado"</div>
                        }
                    >
                        <div class="overflow-x-auto">
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        <th>"ID"</th>
                                        <th>"Companhia"</th>
                                        <th>"Origem"</th>
                                        <th>"Destino"</th>
                                        <th>"Partida"</th>
                                        <th>"Distância"</th>
                                        <th>"Status"</th>
                                        <th>"Prob. de Atraso"</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For
                                        each=move || rows.get()
                                        key=|row| row.id
                                        children=move |row| {
                                            let id = row.id;
                                            let badge_class = if row.delayed { "badge badge-error" } else { "badge badge-primary" };
                                            view! {
                                                <tr>
                                                    <td class="font-medium">{row.id}</td>
                                                    <td title=row.airline_title>{row.airline}</td>
                                                    <td title=row.origin_title>{row.origin}</td>
                                                    <td title=row.destination_title>{row.destination}</td>
                                                    <td>{row.departure}</td>
                                                    <td>{row.distance}</td>
                                                    <td>
                                                        <span class=badge_class>
                                                            {row.status}
                                                        </span>
                                                    </td>
                                                    <td>{row.probability}</td>
                                                    <td>
                                                        <button
                                                            class="btn btn-ghost btn-xs text-error"
                                                            disabled=move || deleting.get() == Some(id)
                                                            on:click=move |_| on_delete.run(id)
                                                        >
                                                            "Excluir"
                                                        </button>
                                                    </td>
                                                </tr>
                                            }
                                        }
                                    />
                                </tbody>
                            </table>
                        </div>
                    </Show>
                </div>
            </div>
        </div>
    }
}
