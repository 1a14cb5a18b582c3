use crate::components::report_card::ReportCard;
use chrono::{DateTime, Utc};
use leptos::*;
use regwatch_core::detail::DetailState;
use regwatch_core::model::{CardDescriptor, Report};

#[component]
pub fn DetailView(
    #[prop(into)] descriptors: Signal<Vec<CardDescriptor>>,
    #[prop(into)] reports: Signal<Vec<Report>>,
    #[prop(into)] selected: Signal<Option<String>>,
    now: DateTime<Utc>,
    #[prop(into)] on_select: Callback<String>,
) -> impl IntoView {
    let state = move || {
        descriptors.with(|descriptors| {
            reports.with(|reports| {
                selected.with(|selected| DetailState::resolve(selected.as_deref(), descriptors, reports, now))
            })
        })
    };

    move || match state() {
        DetailState::NoSelection => view! {
          <section class="detail overview">
            <div class="placeholder">
              <span class="material-icons">"insights"</span>
              <h2>"Welcome to RegWatch"</h2>
              <p>"Choose a report from the sidebar to see the latest regulatory intelligence."</p>
            </div>
            <div class="card-grid">
              {descriptors
                  .get()
                  .into_iter()
                  .map(|descriptor| {
                      let id = descriptor.id.clone();
                      view! {
                        <ReportCard
                          descriptor=descriptor
                          reports=reports
                          expanded=false
                          on_toggle=Callback::new(move |_| on_select.call(id.clone()))
                        />
                      }
                  })
                  .collect_view()}
            </div>
          </section>
        }
        .into_view(),
        DetailState::SelectedNoData { report_type } => view! {
          <section class="detail placeholder">
            <span class="material-icons">"inbox"</span>
            <h2>"No data available"</h2>
            <p>{format!("No report has been generated for {report_type} in this period.")}</p>
          </section>
        }
        .into_view(),
        DetailState::SelectedWithData { header, descriptor, report } => view! {
          <section class="detail">
            <header class="detail-header">
              <h2>{header.title}</h2>
              <dl>
                <dt>"Jurisdiction"</dt>
                <dd>{header.jurisdiction}</dd>
                <dt>"Priority"</dt>
                <dd class=format!("priority {}", header.priority.as_str())>{header.priority.as_str()}</dd>
                <dt>"Status"</dt>
                <dd>{header.status.as_str()}</dd>
                <dt>"Last updated"</dt>
                <dd>{header.last_updated}</dd>
              </dl>
            </header>
            <ReportCard descriptor=descriptor reports=vec![report] expanded=true/>
          </section>
        }
        .into_view(),
    }
}
