use regwatch_core::model::{CardDescriptor, Report};
use regwatch_core::store::SqliteStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub reports: Arc<Vec<Report>>,
    pub descriptors: Arc<Vec<CardDescriptor>>,
    pub store: Arc<SqliteStore>,
}
