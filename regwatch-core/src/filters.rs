use crate::error::StoreResult;
use crate::model::{CardDescriptor, Report};
use crate::store::KeyValueStore;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const FILTER_ARGS_KEY: &str = "regwatch.filterArgs";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterArgs {
    pub jurisdictions: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub include_weekly_summary: bool,
    pub only_with_citations: bool,
}

impl Default for FilterArgs {
    fn default() -> Self {
        Self {
            jurisdictions: Vec::new(),
            start_date: None,
            end_date: None,
            include_weekly_summary: true,
            only_with_citations: false,
        }
    }
}

impl FilterArgs {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, report: &Report, descriptor: Option<&CardDescriptor>) -> bool {
        if !self.jurisdictions.is_empty() {
            if let Some(jurisdiction) = &report.jurisdiction {
                let listed = self
                    .jurisdictions
                    .iter()
                    .any(|j| j.eq_ignore_ascii_case(jurisdiction));
                if !listed {
                    return false;
                }
            }
        }
        if let Some(start) = self.start_date {
            if report.end_date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if report.start_date > end {
                return false;
            }
        }
        if !self.include_weekly_summary && descriptor.is_some_and(|d| d.is_weekly_summary) {
            return false;
        }
        !(self.only_with_citations && report.citations.is_empty())
    }

    /// Parses a comma separated jurisdiction list as typed into the popover.
    pub fn parse_jurisdictions(input: &str) -> Vec<String> {
        input
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect()
    }
}

/// Reads persisted filter args, shallow-merged over the defaults.
///
/// Unreadable or malformed entries fall back to the defaults.
pub fn load_filter_args(store: &impl KeyValueStore) -> FilterArgs {
    let stored = match store.get(FILTER_ARGS_KEY) {
        Ok(Some(value)) => value,
        Ok(None) => return FilterArgs::default(),
        Err(err) => {
            tracing::warn!(error = %err, "failed to read filter args; using defaults");
            return FilterArgs::default();
        }
    };

    let serde_json::Value::Object(stored) = stored else {
        tracing::warn!("persisted filter args are not an object; using defaults");
        return FilterArgs::default();
    };

    let mut merged = match serde_json::to_value(FilterArgs::default()) {
        Ok(serde_json::Value::Object(map)) => map,
        _ => return FilterArgs::default(),
    };
    for (key, value) in stored {
        if merged.contains_key(&key) {
            merged.insert(key, value);
        }
    }

    serde_json::from_value(serde_json::Value::Object(merged)).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "persisted filter args are invalid; using defaults");
        FilterArgs::default()
    })
}

pub fn save_filter_args(store: &impl KeyValueStore, args: &FilterArgs) -> StoreResult<()> {
    store.set(FILTER_ARGS_KEY, &serde_json::to_value(args)?)
}
