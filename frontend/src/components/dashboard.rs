use crate::api::use_api;
use crate::data::use_data;
use flightontime::predict::{self, PredictionForm, PredictionState, WEATHER_UNAVAILABLE};
use flightontime_shared::format::capitalize_place_name;
use flightontime_shared::{Airline, Airport};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 机场下拉框的显示文字：`Guarulhos (São Paulo/SP)`
fn airport_label(airport: &Airport) -> String {
    format!(
        "{} ({}/{})",
        capitalize_place_name(&airport.name),
        capitalize_place_name(&airport.city),
        airport.state
    )
}

#[component]
fn AirlineSelect(
    airlines: Signal<Vec<Airline>>,
    value: ReadSignal<String>,
    set_value: WriteSignal<String>,
) -> impl IntoView {
    view! {
        <select
            class="select select-bordered w-full"
            prop:value=value
            on:change=move |ev| set_value.set(event_target_value(&ev))
        >
            <option value="">"Selecione uma companhia aérea"</option>
            <For
                each=move || airlines.get()
                key=|a| a.code.clone()
                children=|a| view! { <option value=a.code.clone()>{a.name.clone()}</option> }
            />
        </select>
    }
}

#[component]
fn AirportSelect(
    airports: Signal<Vec<Airport>>,
    placeholder: &'static str,
    value: ReadSignal<String>,
    set_value: WriteSignal<String>,
) -> impl IntoView {
    view! {
        <select
            class="select select-bordered w-full"
            prop:value=value
            on:change=move |ev| set_value.set(event_target_value(&ev))
        >
            <option value="">{placeholder}</option>
            <For
                each=move || airports.get()
                key=|a| a.code.clone()
                children=|a| {
                    let label = airport_label(&a);
                    view! { <option value=a.code>{label}</option> }
                }
            />
        </select>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let api = use_api();
    let data = use_data();

    let (airline, set_airline) = signal(String::new());
    let (origin, set_origin) = signal(String::new());
    let (destination, set_destination) = signal(String::new());
    let (date, set_date) = signal(String::new());
    let (time, set_time) = signal(String::new());
    let (state, set_state) = signal(PredictionState::Idle);

    let airlines = Signal::derive(move || data.with(|c| c.airlines().to_vec()));
    let airports = Signal::derive(move || data.with(|c| c.airports().to_vec()));
    let loading_options = Signal::derive(move || data.with(|c| c.is_loading()));

    // 两个列表都为空且有错误时提供重试
    let reference_error = Signal::derive(move || {
        data.with(|c| {
            if c.airlines().is_empty() && c.airports().is_empty() {
                c.error().map(|e| e.message().to_string())
            } else {
                None
            }
        })
    });

    let on_retry = {
        let api = api.clone();
        move |_: web_sys::MouseEvent| data.refetch(api.clone())
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let form = PredictionForm {
            airline: airline.get_untracked(),
            origin: origin.get_untracked(),
            destination: destination.get_untracked(),
            date: date.get_untracked(),
            time: time.get_untracked(),
        };
        let prepared = match form.validate() {
            Ok(prepared) => prepared,
            Err(e) => {
                set_state.set(PredictionState::Invalid(e.message().to_string()));
                return;
            }
        };

        set_state.set(PredictionState::Submitting);
        let api = api.clone();
        spawn_local(async move {
            let refresh_api = api.clone();
            let next = predict::send_prediction(&api, prepared, move || {
                data.refetch_flights(refresh_api)
            })
            .await;
            set_state.set(next);
        });
    };

    view! {
        <div class="max-w-7xl mx-auto px-4 py-8">
            <div class="grid grid-cols-1 lg:grid-cols-2 gap-8">
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h2 class="card-title">"Nova Predição"</h2>
                        <p class="text-sm text-base-content/70">
                            "Preencha os dados do voo para obter a predição de atraso"
                        </p>

                        <form class="space-y-4 mt-4" on:submit=on_submit>
                            <Show when=move || state.with(|s| s.error_message().is_some())>
                                <div role="alert" class="alert alert-error text-sm py-2">
                                    <span>{move || state.with(|s| s.error_message().unwrap_or_default().to_string())}</span>
                                </div>
                            </Show>

                            <Show when=move || reference_error.get().is_some()>
                                <div role="alert" class="alert alert-error text-sm py-2 flex justify-between">
                                    <span>{move || reference_error.get().unwrap_or_default()}</span>
                                    <button type="button" class="btn btn-sm btn-outline" on:click=on_retry.clone()>
                                        "Tentar Novamente"
                                    </button>
                                </div>
                            </Show>

                            <Show
                                when=move || !loading_options.get()
                                fallback=|| view! {
                                    <div class="text-center py-8 text-base-content/50">"Carregando opções..."</div>
                                }
                            >
                                <div class="form-control">
                                    <label class="label"><span class="label-text">"Companhia Aérea"</span></label>
                                    <AirlineSelect airlines=airlines value=airline set_value=set_airline />
                                </div>
                                <div class="form-control">
                                    <label class="label"><span class="label-text">"Aeroporto de Origem"</span></label>
                                    <AirportSelect
                                        airports=airports
                                        placeholder="Selecione o aeroporto de origem"
                                        value=origin
                                        set_value=set_origin
                                    />
                                </div>
                                <div class="form-control">
                                    <label class="label"><span class="label-text">"Aeroporto de Destino"</span></label>
                                    <AirportSelect
                                        airports=airports
                                        placeholder="Selecione o aeroporto de destino"
                                        value=destination
                                        set_value=set_destination
                                    />
                                </div>
                                <div class="flex gap-3">
                                    <div class="form-control w-full">
                                        <label class="label" for="departureDate"><span class="label-text">"Data de Partida"</span></label>
                                        <input
                                            id="departureDate"
                                            type="date"
                                            class="input input-bordered"
                                            prop:value=date
                                            on:input=move |ev| set_date.set(event_target_value(&ev))
                                            required
                                        />
                                    </div>
                                    <div class="form-control w-full">
                                        <label class="label" for="departureTime"><span class="label-text">"Hora de Partida"</span></label>
                                        <input
                                            id="departureTime"
                                            type="time"
                                            class="input input-bordered"
                                            prop:value=time
                                            on:input=move |ev| set_time.set(event_target_value(&ev))
                                            required
                                        />
                                    </div>
                                </div>
                                <button
                                    type="submit"
                                    class="btn btn-primary w-full"
                                    disabled=move || state.with(PredictionState::is_submitting) || loading_options.get()
                                >
                                    {move || if state.with(PredictionState::is_submitting) {
                                        "Processando..."
                                    } else {
                                        "Fazer Predição"
                                    }}
                                </button>
                            </Show>
                        </form>
                    </div>
                </div>

                <PredictionCard state=state airlines=airlines airports=airports />
            </div>
        </div>
    }
}

/// 结果卡片，仅在成功时显示
#[component]
fn PredictionCard(
    state: ReadSignal<PredictionState>,
    airlines: Signal<Vec<Airline>>,
    airports: Signal<Vec<Airport>>,
) -> impl IntoView {
    move || {
        let result = state.with(|s| s.result().cloned())?;

        let badge_class = if result.is_destructive() {
            "badge badge-error badge-lg px-4 py-3"
        } else {
            "badge badge-primary badge-lg px-4 py-3"
        };
        let airline_name = airlines.with(|list| result.airline_name(list).to_string());
        let (origin_name, destination_name) = airports.with(|list| {
            (
                result.origin_name(list).to_string(),
                result.destination_name(list).to_string(),
            )
        });
        let weather = match result.weather() {
            Some(w) => view! {
                <div class="grid grid-cols-3 gap-3">
                    <div class="stat place-items-center p-3 bg-base-200 rounded-lg">
                        <div class="stat-title text-xs">"Temperatura"</div>
                        <div class="font-semibold text-sm">{w.temperature.clone()}</div>
                    </div>
                    <div class="stat place-items-center p-3 bg-base-200 rounded-lg">
                        <div class="stat-title text-xs">"Precipitação"</div>
                        <div class="font-semibold text-sm">{w.precipitation.clone()}</div>
                    </div>
                    <div class="stat place-items-center p-3 bg-base-200 rounded-lg">
                        <div class="stat-title text-xs">"Vento"</div>
                        <div class="font-semibold text-sm">{w.wind_speed.clone()}</div>
                    </div>
                </div>
            }
            .into_any(),
            None => view! { <p class="text-sm text-base-content/50">{WEATHER_UNAVAILABLE}</p> }.into_any(),
        };

        Some(view! {
            <div class="card bg-base-100 shadow-xl h-fit lg:sticky lg:top-8">
                <div class="card-body space-y-6">
                    <div>
                        <h2 class="card-title">"Resultado da Predição"</h2>
                        <p class="text-sm text-base-content/70">"Análise preditiva do voo"</p>
                    </div>

                    <div class="text-center p-6 bg-base-200 rounded-lg">
                        <span class=badge_class>{result.badge_label()}</span>
                        <div class="text-3xl font-bold mt-4">{result.probability_text()}</div>
                        <p class="text-sm text-base-content/60 mt-2">{result.caption()}</p>
                    </div>

                    <div class="space-y-3">
                        <h3 class="font-semibold text-lg">"Detalhes do Voo"</h3>
                        <div class="grid grid-cols-2 gap-3 text-sm">
                            <div>
                                <p class="text-base-content/50">"Companhia"</p>
                                <p class="font-semibold">{airline_name}</p>
                            </div>
                            <div>
                                <p class="text-base-content/50">"Origem"</p>
                                <p class="font-semibold">{origin_name}</p>
                            </div>
                            <div>
                                <p class="text-base-content/50">"Destino"</p>
                                <p class="font-semibold">{destination_name}</p>
                            </div>
                            <div>
                                <p class="text-base-content/50">"Partida"</p>
                                <p class="font-semibold">{result.departure_text()}</p>
                            </div>
                        </div>
                    </div>

                    <div class="space-y-3 pt-4 border-t border-base-300">
                        <h3 class="font-semibold text-lg">"Condições Meteorológicas"</h3>
                        {weather}
                    </div>
                </div>
            </div>
        })
    }
}
