use crate::state::AppState;
use chrono::{DateTime, Utc};
use regwatch_core::citations::CitationAction;
use regwatch_core::dashboard::{detail_card, DashboardState};
use regwatch_core::detail::DetailState;
use regwatch_core::filters::{self, FilterArgs};
use regwatch_core::markdown::HtmlRenderer;
use regwatch_core::model::{CardDescriptor, Report};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SidebarRowDto {
    pub id: String,
    pub title: String,
    pub availability: String,
    pub period: String,
    pub generated: Option<String>,
    pub citation_count: Option<usize>,
    pub selected: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CitationDto {
    pub label: String,
    pub action: CitationAction,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DetailDto {
    NoSelection,
    NoData {
        report_type: String,
    },
    Report {
        title: String,
        jurisdiction: String,
        priority: String,
        status: String,
        last_updated: String,
        html: String,
        citations: Vec<CitationDto>,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DashboardSnapshotDto {
    pub as_of: DateTime<Utc>,
    pub selected: Option<String>,
    pub filters_modified: bool,
    pub sidebar: Vec<SidebarRowDto>,
    pub detail: DetailDto,
}

pub fn list_reports(state: &AppState) -> Result<Vec<Report>, String> {
    Ok(state.reports.as_ref().clone())
}

pub fn list_card_descriptors(state: &AppState) -> Result<Vec<CardDescriptor>, String> {
    Ok(state.descriptors.as_ref().clone())
}

pub fn get_filter_args(state: &AppState) -> Result<FilterArgs, String> {
    Ok(filters::load_filter_args(state.store.as_ref()))
}

pub fn save_filter_args(state: &AppState, args: FilterArgs) -> Result<(), String> {
    filters::save_filter_args(state.store.as_ref(), &args).map_err(|e| e.to_string())
}

/// What the dashboard would show on first mount, optionally with a given selection.
pub fn dashboard_snapshot(
    state: &AppState,
    selected: Option<String>,
    now: DateTime<Utc>,
) -> Result<DashboardSnapshotDto, String> {
    let mut dashboard = DashboardState::init(&state.descriptors, &state.reports, state.store.as_ref(), now);
    if let Some(id) = selected {
        dashboard.select(id);
    }
    let visible = dashboard.visible_reports(&state.descriptors, &state.reports);

    let sidebar = dashboard
        .sidebar(&state.descriptors, &visible)
        .into_iter()
        .map(|row| SidebarRowDto {
            id: row.id,
            title: row.title,
            availability: row.availability.badge_class().to_string(),
            period: row.period,
            generated: row.generated,
            citation_count: row.citation_count,
            selected: row.selected,
        })
        .collect();

    let detail_state = dashboard.detail(&state.descriptors, &visible);
    let detail = match &detail_state {
        DetailState::NoSelection => DetailDto::NoSelection,
        DetailState::SelectedNoData { report_type } => DetailDto::NoData {
            report_type: report_type.clone(),
        },
        DetailState::SelectedWithData { header, .. } => {
            let card = detail_card(&detail_state)
                .ok_or_else(|| "detail card missing for selected report".to_string())?;
            DetailDto::Report {
                title: header.title.clone(),
                jurisdiction: header.jurisdiction.clone(),
                priority: header.priority.as_str().to_string(),
                status: header.status.as_str().to_string(),
                last_updated: header.last_updated.clone(),
                html: HtmlRenderer::default().render(&card.content),
                citations: card
                    .citations
                    .unwrap_or_default()
                    .into_iter()
                    .map(|c| CitationDto {
                        label: c.label,
                        action: c.action,
                    })
                    .collect(),
            }
        }
    };

    Ok(DashboardSnapshotDto {
        as_of: dashboard.mounted_at,
        selected: dashboard.selected.clone(),
        filters_modified: dashboard.filters_modified(),
        sidebar,
        detail,
    })
}

#[cfg(feature = "tauri-app")]
#[tauri::command(rename_all = "camelCase")]
pub fn list_reports_cmd(state: tauri::State<'_, AppState>) -> Result<Vec<Report>, String> {
    list_reports(&state)
}

#[cfg(feature = "tauri-app")]
#[tauri::command(rename_all = "camelCase")]
pub fn list_card_descriptors_cmd(state: tauri::State<'_, AppState>) -> Result<Vec<CardDescriptor>, String> {
    list_card_descriptors(&state)
}

#[cfg(feature = "tauri-app")]
#[tauri::command(rename_all = "camelCase")]
pub fn get_filter_args_cmd(state: tauri::State<'_, AppState>) -> Result<FilterArgs, String> {
    get_filter_args(&state)
}

#[cfg(feature = "tauri-app")]
#[tauri::command(rename_all = "camelCase")]
pub fn save_filter_args_cmd(state: tauri::State<'_, AppState>, args: FilterArgs) -> Result<(), String> {
    save_filter_args(&state, args)
}

#[cfg(feature = "tauri-app")]
#[tauri::command(rename_all = "camelCase")]
pub fn dashboard_snapshot_cmd(
    state: tauri::State<'_, AppState>,
    selected: Option<String>,
) -> Result<DashboardSnapshotDto, String> {
    dashboard_snapshot(&state, selected, chrono::Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use regwatch_core::mock;
    use regwatch_core::store::SqliteStore;
    use std::sync::Arc;

    fn db_path(name: &str) -> String {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        format!("/tmp/regwatch-tests/{name}-{nanos}.db")
    }

    fn state(name: &str) -> AppState {
        AppState {
            reports: Arc::new(mock::reports()),
            descriptors: Arc::new(mock::card_descriptors()),
            store: Arc::new(SqliteStore::open(db_path(name)).expect("open")),
        }
    }

    fn now() -> DateTime<Utc> {
        "2026-10-16T12:00:00Z".parse().expect("now")
    }

    #[test]
    fn ui_filter_payload_lands_in_sqlite() {
        let state = state("ui-payload");
        let payload = serde_json::json!({"args": {"onlyWithCitations": true, "jurisdictions": ["Ontario"]}});
        let args: FilterArgs = serde_json::from_value(payload["args"].clone()).expect("args");
        save_filter_args(&state, args).expect("save");

        let stored = get_filter_args(&state).expect("get");
        assert!(stored.only_with_citations);
        assert_eq!(stored.jurisdictions, vec!["Ontario".to_string()]);
        assert!(stored.include_weekly_summary);
    }

    #[test]
    fn filter_args_persist_across_calls() {
        let state = state("filters");
        assert_eq!(get_filter_args(&state).expect("get"), FilterArgs::default());

        let args = FilterArgs {
            jurisdictions: vec!["Federal".into()],
            ..FilterArgs::default()
        };
        save_filter_args(&state, args.clone()).expect("save");
        assert_eq!(get_filter_args(&state).expect("get"), args);
    }

    #[test]
    fn snapshot_defaults_to_first_card() {
        let state = state("snapshot-default");
        let snapshot = dashboard_snapshot(&state, None, now()).expect("snapshot");

        assert_eq!(snapshot.selected.as_deref(), Some("weekly_summary"));
        assert!(!snapshot.filters_modified);
        assert_eq!(snapshot.sidebar.len(), state.descriptors.len());
        let DetailDto::Report { html, citations, priority, .. } = snapshot.detail else {
            panic!("expected report detail");
        };
        assert!(html.contains("<table"));
        assert_eq!(citations.len(), 3);
        assert_eq!(citations[0].label, "[1] Digital Charter Implementation Act");
        assert_eq!(priority, "low");
    }

    #[test]
    fn snapshot_for_type_without_data() {
        let state = state("snapshot-no-data");
        let snapshot = dashboard_snapshot(&state, Some("critical_alerts".into()), now()).expect("snapshot");
        assert!(matches!(
            snapshot.detail,
            DetailDto::NoData { ref report_type } if report_type == "critical_alerts"
        ));
        let row = snapshot
            .sidebar
            .iter()
            .find(|r| r.id == "critical_alerts")
            .expect("row");
        assert_eq!(row.availability, "no-data");
        assert!(row.selected);
    }

    #[test]
    fn snapshot_respects_persisted_filters() {
        let state = state("snapshot-filtered");
        save_filter_args(
            &state,
            FilterArgs {
                only_with_citations: true,
                ..FilterArgs::default()
            },
        )
        .expect("save");

        let snapshot = dashboard_snapshot(&state, Some("case_law_digest".into()), now()).expect("snapshot");
        assert!(snapshot.filters_modified);
        assert!(matches!(snapshot.detail, DetailDto::NoData { .. }));
    }
}
