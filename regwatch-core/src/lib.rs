pub mod card;
pub mod citations;
pub mod dashboard;
pub mod detail;
pub mod error;
pub mod filters;
pub mod markdown;
pub mod mock;
pub mod model;
pub mod sidebar;
pub mod store;
