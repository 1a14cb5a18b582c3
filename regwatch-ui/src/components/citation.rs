use crate::bridge::BrowserSink;
use leptos::*;
use regwatch_core::card::CitationButton as CitationButtonView;
use regwatch_core::citations::{activate, CitationAction};

#[component]
pub fn CitationButton(button: CitationButtonView) -> impl IntoView {
    let kind = match &button.action {
        CitationAction::OpenModal { .. } => "modal",
        CitationAction::OpenUrl { .. } => "link",
        CitationAction::Ignore => "inert",
    };
    let collection = button.citation.collection.as_str().to_string();
    let citation = button.citation;

    view! {
      <button
        class=format!("citation {kind}")
        data-collection=collection
        on:click=move |_| activate(&citation, &BrowserSink)
      >
        {button.label}
      </button>
    }
}
