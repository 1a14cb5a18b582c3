use crate::card::find_report;
use crate::model::{CardDescriptor, Report};
use crate::sidebar::format_timestamp;
use chrono::{DateTime, Utc};

pub const ALL_JURISDICTIONS: &str = "All jurisdictions";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn classify(report_type: &str) -> Self {
        let lower = report_type.to_ascii_lowercase();
        if lower.contains("critical") || lower.contains("fines") {
            Self::High
        } else if lower.contains("bill") || lower.contains("gazette") {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportStatus {
    Active,
    Archived,
}

impl ReportStatus {
    pub fn for_report(report: &Report, now: DateTime<Utc>) -> Self {
        if now.date_naive() <= report.end_date {
            Self::Active
        } else {
            Self::Archived
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Archived => "Archived",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailHeader {
    pub title: String,
    pub jurisdiction: String,
    pub priority: Priority,
    pub status: ReportStatus,
    pub last_updated: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DetailState {
    NoSelection,
    SelectedNoData {
        report_type: String,
    },
    SelectedWithData {
        header: DetailHeader,
        descriptor: CardDescriptor,
        report: Report,
    },
}

impl DetailState {
    pub fn resolve(
        selected: Option<&str>,
        descriptors: &[CardDescriptor],
        reports: &[Report],
        now: DateTime<Utc>,
    ) -> Self {
        let Some(report_type) = selected else {
            return Self::NoSelection;
        };
        let Some(report) = find_report(reports, report_type) else {
            return Self::SelectedNoData {
                report_type: report_type.to_string(),
            };
        };

        let descriptor = descriptors
            .iter()
            .find(|d| d.id == report_type)
            .cloned()
            .unwrap_or_else(|| CardDescriptor {
                id: report_type.to_string(),
                title: String::new(),
                icon: "description".into(),
                border_color: "#94a3b8".into(),
                icon_color: "#64748b".into(),
                is_weekly_summary: false,
            });

        Self::SelectedWithData {
            header: DetailHeader {
                title: descriptor.display_title().to_string(),
                jurisdiction: report
                    .jurisdiction
                    .clone()
                    .unwrap_or_else(|| ALL_JURISDICTIONS.to_string()),
                priority: Priority::classify(report_type),
                status: ReportStatus::for_report(report, now),
                last_updated: format_timestamp(report.date_added),
            },
            descriptor,
            report: report.clone(),
        }
    }

    /// The single-report collection the detail card renders from.
    pub fn card_reports(&self) -> &[Report] {
        match self {
            Self::SelectedWithData { report, .. } => std::slice::from_ref(report),
            _ => &[],
        }
    }
}
