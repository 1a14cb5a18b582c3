use chrono::{DateTime, NaiveDate, Utc};
use regwatch_core::card::{CardView, PLACEHOLDER_CONTENT};
use regwatch_core::citations::{activate, CitationAction, CitationSink};
use regwatch_core::dashboard::{detail_card, DashboardState};
use regwatch_core::detail::{DetailState, Priority};
use regwatch_core::markdown::HtmlRenderer;
use regwatch_core::mock;
use regwatch_core::model::{Citation, CitationCollection, Report};
use regwatch_core::store::MemoryStore;
use std::cell::RefCell;

#[derive(Default)]
struct ModalRecorder {
    opened: RefCell<Vec<(String, serde_json::Value)>>,
}

impl CitationSink for ModalRecorder {
    fn open_modal(&self, name: &str, params: serde_json::Value) {
        self.opened.borrow_mut().push((name.to_string(), params));
    }

    fn open_url(&self, _url: &str) {}
}

fn now() -> DateTime<Utc> {
    "2026-10-16T12:00:00Z".parse().expect("now")
}

fn gazette_report() -> Report {
    Report {
        id: "g-1".into(),
        date_added: "2026-10-10T16:05:00Z".parse().expect("ts"),
        content: "A".repeat(500),
        report_type: "gazette".into(),
        start_date: NaiveDate::from_ymd_opt(2026, 10, 4).expect("date"),
        end_date: NaiveDate::from_ymd_opt(2026, 10, 10).expect("date"),
        jurisdiction: None,
        citations: vec![Citation {
            collection: CitationCollection::Bill,
            id: "42".into(),
            title: "Bill X".into(),
            url: None,
        }],
    }
}

#[test]
fn selecting_gazette_expands_full_content_with_bill_citation() {
    let descriptors = mock::card_descriptors();
    let reports = vec![gazette_report()];
    let store = MemoryStore::new();
    let mut state = DashboardState::init(&descriptors, &reports, &store, now());
    state.select("gazette");

    let detail = state.detail(&descriptors, &reports);
    let DetailState::SelectedWithData { header, .. } = &detail else {
        panic!("expected detail data");
    };
    assert_eq!(header.priority, Priority::Medium);
    assert_eq!(header.title, "Gazette Watch");

    let card = detail_card(&detail).expect("card");
    assert!(card.expanded);
    assert_eq!(card.content.chars().count(), 500);

    let citations = card.citations.expect("citations");
    assert_eq!(citations.len(), 1);
    assert_eq!(citations[0].label, "[1] Bill X");
    assert_eq!(
        citations[0].action,
        CitationAction::OpenModal {
            name: "billModal".into(),
            params: serde_json::json!({"itemId": "42"}),
        }
    );

    let recorder = ModalRecorder::default();
    activate(&citations[0].citation, &recorder);
    assert_eq!(
        *recorder.opened.borrow(),
        vec![("billModal".to_string(), serde_json::json!({"itemId": "42"}))]
    );
}

#[test]
fn unmatched_selection_shows_no_data_placeholder() {
    let descriptors = mock::card_descriptors();
    let reports = vec![gazette_report()];
    let store = MemoryStore::new();
    let mut state = DashboardState::init(&descriptors, &reports, &store, now());
    state.select("critical_alerts");

    let detail = state.detail(&descriptors, &reports);
    assert_eq!(
        detail,
        DetailState::SelectedNoData {
            report_type: "critical_alerts".into()
        }
    );
    assert!(detail_card(&detail).is_none());
}

#[test]
fn collapsed_cards_never_show_citations() {
    let descriptors = mock::card_descriptors();
    let reports = mock::reports();
    for descriptor in &descriptors {
        let collapsed = CardView::build(descriptor, &reports, false);
        assert!(collapsed.citations.is_none(), "{}", descriptor.id);

        let expanded = CardView::build(descriptor, &reports, true);
        let count = reports
            .iter()
            .find(|r| r.report_type == descriptor.id)
            .map(|r| r.citations.len())
            .unwrap_or(0);
        assert_eq!(expanded.citations.is_some(), count > 0, "{}", descriptor.id);
        if count == 0 && !expanded.has_data {
            assert_eq!(expanded.content, PLACEHOLDER_CONTENT);
        }
    }
}

#[test]
fn mock_reports_render_to_html() {
    let mut renderer = HtmlRenderer::default();
    for report in mock::reports() {
        let html = renderer.render(&report.content);
        assert!(html.starts_with("<h"), "{}", report.id);
    }
    let weekly = renderer.render(&mock::reports()[0].content);
    assert!(weekly.contains("<table"));
    assert!(weekly.contains("<blockquote"));
    assert!(weekly.contains("<ol"));
    assert!(weekly.contains("<hr"));
}
