use crate::card::CardView;
use crate::detail::DetailState;
use crate::error::StoreResult;
use crate::filters::{load_filter_args, save_filter_args, FilterArgs};
use crate::model::{CardDescriptor, Report};
use crate::sidebar::{sidebar_rows, SidebarRow};
use crate::store::KeyValueStore;
use chrono::{DateTime, Utc};

/// Client-side state owned by the dashboard container.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardState {
    pub selected: Option<String>,
    pub filter_args: FilterArgs,
    pub popover_open: bool,
    pub mounted_at: DateTime<Utc>,
}

impl DashboardState {
    pub fn init(
        descriptors: &[CardDescriptor],
        reports: &[Report],
        store: &impl KeyValueStore,
        now: DateTime<Utc>,
    ) -> Self {
        let selected = default_selection(descriptors, reports);
        tracing::debug!(selected = ?selected, reports = reports.len(), "dashboard mounted");
        Self {
            selected,
            filter_args: load_filter_args(store),
            popover_open: false,
            mounted_at: now,
        }
    }

    pub fn select(&mut self, report_type: impl Into<String>) {
        let report_type = report_type.into();
        tracing::debug!(%report_type, "report selected");
        self.selected = Some(report_type);
    }

    /// Back to the overview of collapsed cards.
    pub fn clear_selection(&mut self) {
        tracing::debug!("selection cleared");
        self.selected = None;
    }

    /// Applies new filter args and writes them through to the store.
    pub fn update_filters(&mut self, args: FilterArgs, store: &impl KeyValueStore) -> StoreResult<()> {
        self.filter_args = args;
        save_filter_args(store, &self.filter_args)
    }

    pub fn reset_filters(&mut self, store: &impl KeyValueStore) -> StoreResult<()> {
        self.update_filters(FilterArgs::default(), store)
    }

    pub fn filters_modified(&self) -> bool {
        !self.filter_args.is_default()
    }

    pub fn toggle_popover(&mut self) {
        self.popover_open = !self.popover_open;
    }

    pub fn close_popover(&mut self) {
        self.popover_open = false;
    }

    pub fn visible_reports(&self, descriptors: &[CardDescriptor], reports: &[Report]) -> Vec<Report> {
        reports
            .iter()
            .filter(|r| {
                let descriptor = descriptors.iter().find(|d| d.id == r.report_type);
                self.filter_args.matches(r, descriptor)
            })
            .cloned()
            .collect()
    }

    pub fn sidebar(&self, descriptors: &[CardDescriptor], reports: &[Report]) -> Vec<SidebarRow> {
        sidebar_rows(descriptors, reports, self.selected.as_deref())
    }

    pub fn detail(&self, descriptors: &[CardDescriptor], reports: &[Report]) -> DetailState {
        DetailState::resolve(self.selected.as_deref(), descriptors, reports, self.mounted_at)
    }
}

/// First descriptor id, but only once there is some report data.
pub fn default_selection(descriptors: &[CardDescriptor], reports: &[Report]) -> Option<String> {
    if reports.is_empty() {
        return None;
    }
    descriptors.first().map(|d| d.id.clone())
}

/// Detail card for the current selection, always expanded.
pub fn detail_card(state: &DetailState) -> Option<CardView> {
    match state {
        DetailState::SelectedWithData { descriptor, .. } => {
            Some(CardView::build(descriptor, state.card_reports(), true))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FILTER_ARGS_KEY;
    use crate::mock;
    use crate::store::MemoryStore;

    fn now() -> DateTime<Utc> {
        "2026-10-16T12:00:00Z".parse().expect("now")
    }

    #[test]
    fn init_selects_first_descriptor_once_data_exists() {
        let store = MemoryStore::new();
        let descriptors = mock::card_descriptors();

        let empty = DashboardState::init(&descriptors, &[], &store, now());
        assert_eq!(empty.selected, None);

        let state = DashboardState::init(&descriptors, &mock::reports(), &store, now());
        assert_eq!(state.selected.as_deref(), Some(descriptors[0].id.as_str()));
        assert_eq!(state.mounted_at, now());
        assert!(!state.filters_modified());
    }

    #[test]
    fn filter_updates_persist_and_flag_modification() {
        let store = MemoryStore::new();
        let mut state = DashboardState::init(&mock::card_descriptors(), &mock::reports(), &store, now());

        let args = FilterArgs {
            only_with_citations: true,
            ..FilterArgs::default()
        };
        state.update_filters(args.clone(), &store).expect("update");
        assert!(state.filters_modified());
        assert_eq!(
            store.get(FILTER_ARGS_KEY).expect("get"),
            Some(serde_json::to_value(&args).expect("json"))
        );

        let remounted = DashboardState::init(&mock::card_descriptors(), &mock::reports(), &store, now());
        assert!(remounted.filters_modified());

        state.reset_filters(&store).expect("reset");
        assert!(!state.filters_modified());
    }

    #[test]
    fn popover_toggles() {
        let store = MemoryStore::new();
        let mut state = DashboardState::init(&[], &[], &store, now());
        state.toggle_popover();
        assert!(state.popover_open);
        state.toggle_popover();
        assert!(!state.popover_open);
        state.toggle_popover();
        state.close_popover();
        assert!(!state.popover_open);
    }

    #[test]
    fn selection_drives_sidebar_and_detail() {
        let store = MemoryStore::new();
        let descriptors = mock::card_descriptors();
        let reports = mock::reports();
        let mut state = DashboardState::init(&descriptors, &reports, &store, now());

        state.select("gazette");
        let rows = state.sidebar(&descriptors, &reports);
        assert_eq!(rows.iter().filter(|r| r.selected).count(), 1);
        assert!(rows.iter().any(|r| r.selected && r.id == "gazette"));

        let detail = state.detail(&descriptors, &reports);
        let card = detail_card(&detail).expect("card");
        assert!(card.expanded);
        assert!(card.header.is_none());
    }

    #[test]
    fn clearing_selection_returns_to_collapsed_overview() {
        let store = MemoryStore::new();
        let descriptors = mock::card_descriptors();
        let reports = mock::reports();
        let mut state = DashboardState::init(&descriptors, &reports, &store, now());

        state.clear_selection();
        assert_eq!(state.detail(&descriptors, &reports), DetailState::NoSelection);

        let cards: Vec<_> = descriptors
            .iter()
            .map(|d| CardView::build(d, &reports, false))
            .collect();
        assert_eq!(cards.len(), descriptors.len());
        for card in &cards {
            assert!(!card.expanded);
            assert!(card.header.is_some());
            assert!(card.citations.is_none());
            assert!(CardView::should_toggle_on_header_click(card.expanded));
        }

        // A header click in the overview selects that card.
        state.select(cards[4].id.clone());
        assert!(matches!(
            state.detail(&descriptors, &reports),
            DetailState::SelectedWithData { .. }
        ));
    }

    #[test]
    fn visible_reports_applies_filters() {
        let store = MemoryStore::new();
        let descriptors = mock::card_descriptors();
        let reports = mock::reports();
        let mut state = DashboardState::init(&descriptors, &reports, &store, now());
        let all = state.visible_reports(&descriptors, &reports).len();
        assert_eq!(all, reports.len());

        state
            .update_filters(
                FilterArgs {
                    include_weekly_summary: false,
                    ..FilterArgs::default()
                },
                &store,
            )
            .expect("update");
        let visible = state.visible_reports(&descriptors, &reports);
        assert!(visible.len() < all);
        assert!(visible.iter().all(|r| r.report_type != "weekly_summary"));
    }
}
