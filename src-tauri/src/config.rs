use chrono::{DateTime, Utc};
use regwatch_core::mock;
use regwatch_core::model::Report;
use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "regwatch.db";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DesktopConfig {
    pub db_path: PathBuf,
    pub reports_path: Option<PathBuf>,
    pub now: Option<DateTime<Utc>>,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            reports_path: None,
            now: None,
        }
    }
}

impl DesktopConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let now = non_empty("REGWATCH_NOW")
            .map(|v| {
                DateTime::parse_from_rfc3339(v.trim())
                    .map(|ts| ts.with_timezone(&Utc))
                    .map_err(|e| format!("invalid REGWATCH_NOW '{v}': {e}"))
            })
            .transpose()?;

        Ok(Self {
            db_path: non_empty("REGWATCH_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH)),
            reports_path: non_empty("REGWATCH_REPORTS_PATH").map(PathBuf::from),
            now,
        })
    }

    pub fn load_reports(&self) -> Result<Vec<Report>, String> {
        let Some(path) = &self.reports_path else {
            return Ok(mock::reports());
        };
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        serde_json::from_str(&raw).map_err(|e| format!("failed to parse {}: {e}", path.display()))
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }
}
