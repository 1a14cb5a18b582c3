use crate::bridge::{self, BridgeStore, LocalStorageStore};
use crate::components::detail_view::DetailView;
use crate::components::filter_popover::FilterPopover;
use crate::components::sidebar::ReportSidebar;
use leptos::*;
use regwatch_core::dashboard::{default_selection, DashboardState};
use regwatch_core::filters::{save_filter_args, FilterArgs};
use regwatch_core::mock;
use regwatch_core::model::Report;
use regwatch_core::sidebar::format_timestamp;
use wasm_bindgen_futures::spawn_local;

#[component]
pub fn App() -> impl IntoView {
    let descriptors = mock::card_descriptors();
    let reports = create_rw_signal(Vec::<Report>::new());
    let dashboard = create_rw_signal(DashboardState::init(
        &descriptors,
        &[],
        &BridgeStore,
        bridge::now(),
    ));
    let mounted_at = dashboard.with_untracked(|d| d.mounted_at);

    let descriptors = store_value(descriptors);
    let load_reports = move || {
        spawn_local(async move {
            let list = match bridge::fetch_reports().await {
                Ok(list) => list,
                Err(err) => {
                    tracing::debug!(error = %err, "desktop bridge unavailable; using bundled reports");
                    mock::reports()
                }
            };
            if bridge::desktop_available() {
                match bridge::fetch_filter_args().await {
                    Ok(args) => {
                        if let Err(err) = save_filter_args(&LocalStorageStore, &args) {
                            tracing::warn!(error = %err, "failed to cache filter args");
                        }
                        dashboard.update(|d| d.filter_args = args);
                    }
                    Err(err) => tracing::warn!(error = %err, "failed to load filter args from desktop store"),
                }
            }
            let first = descriptors.with_value(|d| default_selection(d, &list));
            reports.set(list);
            dashboard.update(|d| {
                if d.selected.is_none() {
                    d.selected = first;
                }
            });
        });
    };
    load_reports();

    let visible = Signal::derive(move || {
        dashboard.with(|d| reports.with(|r| descriptors.with_value(|descs| d.visible_reports(descs, r))))
    });
    let selected = Signal::derive(move || dashboard.with(|d| d.selected.clone()));
    let filter_args = Signal::derive(move || dashboard.with(|d| d.filter_args.clone()));
    let popover_open = Signal::derive(move || dashboard.with(|d| d.popover_open));
    let modified = move || dashboard.with(DashboardState::filters_modified);

    let on_select = move |id: String| dashboard.update(|d| d.select(id));
    let on_filters = move |args: FilterArgs| {
        dashboard.update(|d| {
            if let Err(err) = d.update_filters(args, &BridgeStore) {
                tracing::warn!(error = %err, "failed to persist filter args");
            }
        })
    };
    let on_reset = move |_: ()| {
        dashboard.update(|d| {
            if let Err(err) = d.reset_filters(&BridgeStore) {
                tracing::warn!(error = %err, "failed to persist filter args");
            }
        })
    };

    view! {
      <div class="dashboard">
        <header class="topbar">
          <h1>"RegWatch"</h1>
          <span class="meta">{format!("As of {}", format_timestamp(mounted_at))}</span>
          <button class="overview-button" on:click=move |_| dashboard.update(DashboardState::clear_selection)>
            "Overview"
          </button>
          <div class="filters-anchor">
            <button
              class="filters-button"
              class:modified=modified
              on:click=move |_| dashboard.update(DashboardState::toggle_popover)
            >
              "Filters"
            </button>
            <FilterPopover
              open=popover_open
              args=filter_args
              on_change=on_filters
              on_reset=on_reset
              on_close=move |_: ()| dashboard.update(DashboardState::close_popover)
            />
          </div>
        </header>
        <div class="layout">
          <ReportSidebar
            descriptors=descriptors.get_value()
            reports=visible
            selected=selected
            on_select=on_select
          />
          <main class="panel">
            <DetailView
              descriptors=Signal::derive(move || descriptors.get_value())
              reports=visible
              selected=selected
              now=mounted_at
              on_select=on_select
            />
          </main>
        </div>
      </div>
    }
}
