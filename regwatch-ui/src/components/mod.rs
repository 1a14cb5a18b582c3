pub mod citation;
pub mod detail_view;
pub mod filter_popover;
pub mod markdown;
pub mod report_card;
pub mod sidebar;
