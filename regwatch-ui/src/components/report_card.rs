use crate::components::citation::CitationButton;
use crate::components::markdown::Markdown;
use leptos::*;
use regwatch_core::card::CardView;
use regwatch_core::model::{CardDescriptor, Report};

/// Collapsible report card; the parent owns `expanded`.
#[component]
pub fn ReportCard(
    descriptor: CardDescriptor,
    #[prop(into)] reports: MaybeSignal<Vec<Report>>,
    #[prop(into)] expanded: MaybeSignal<bool>,
    #[prop(optional, into)] on_toggle: Option<Callback<()>>,
) -> impl IntoView {
    let descriptor = store_value(descriptor);
    let card = move || {
        let expanded = expanded.get();
        reports.with(|reports| descriptor.with_value(|d| CardView::build(d, reports, expanded)))
    };

    move || {
        let card_view = card();
        let expanded_now = card_view.expanded;

        let header = card_view.header.map(|h| {
            view! {
              <header
                class="card-header"
                on:click=move |_| {
                    if CardView::should_toggle_on_header_click(expanded_now) {
                        if let Some(on_toggle) = on_toggle {
                            on_toggle.call(());
                        }
                    }
                }
              >
                <span class="material-icons" style=format!("color: {}", h.icon_color)>{h.icon}</span>
                <h3>{h.title}</h3>
                <span class="material-icons toggle">"expand_more"</span>
              </header>
            }
        });

        let citations = card_view.citations.map(|buttons| {
            view! {
              <section class="citations">
                <h4>"Sources"</h4>
                {buttons
                    .into_iter()
                    .map(|button| view! { <CitationButton button=button/> })
                    .collect_view()}
              </section>
            }
        });

        view! {
          <article
            class="report-card"
            class:expanded=expanded_now
            class:empty={!card_view.has_data}
            style=format!("border-left-color: {}", card_view.border_color)
          >
            {header}
            <div class="card-content">
              <Markdown content=card_view.content/>
            </div>
            {citations}
          </article>
        }
    }
}
