use leptos::*;
use regwatch_core::model::{CardDescriptor, Report};
use regwatch_core::sidebar::{sidebar_rows, Availability};

#[component]
pub fn ReportSidebar(
    #[prop(into)] descriptors: MaybeSignal<Vec<CardDescriptor>>,
    #[prop(into)] reports: Signal<Vec<Report>>,
    #[prop(into)] selected: Signal<Option<String>>,
    #[prop(into)] on_select: Callback<String>,
) -> impl IntoView {
    let rows = move || {
        descriptors.with(|descriptors| {
            reports.with(|reports| selected.with(|selected| sidebar_rows(descriptors, reports, selected.as_deref())))
        })
    };

    view! {
      <nav class="sidebar">
        <h2>"Reports"</h2>
        <ul>
          {move || {
              rows()
                  .into_iter()
                  .map(|row| {
                      let id = row.id.clone();
                      let generated = (row.availability == Availability::Available).then(|| {
                          format!(
                              "Generated {} · {} citations",
                              row.generated.clone().unwrap_or_default(),
                              row.citation_count.unwrap_or(0)
                          )
                      });
                      view! {
                        <li
                          class="sidebar-row"
                          class:selected=row.selected
                          on:click=move |_| on_select.call(id.clone())
                        >
                          <div class="row-title">
                            <span class="material-icons" style=format!("color: {}", row.icon_color)>{row.icon}</span>
                            <b>{row.title}</b>
                            <span class=format!("badge {}", row.availability.badge_class())>
                              {row.availability.label()}
                            </span>
                          </div>
                          <div class="meta">{row.period}</div>
                          {generated.map(|line| view! { <div class="meta">{line}</div> })}
                        </li>
                      }
                  })
                  .collect_view()
          }}
        </ul>
      </nav>
    }
}
