use crate::card::find_report;
use crate::model::{CardDescriptor, Report};
use chrono::{DateTime, NaiveDate, Utc};

pub const NO_DATA_MESSAGE: &str = "No data for this period";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Availability {
    Available,
    NoData,
}

impl Availability {
    pub fn badge_class(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::NoData => "no-data",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::NoData => "No data",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidebarRow {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub icon_color: String,
    pub availability: Availability,
    pub period: String,
    pub generated: Option<String>,
    pub citation_count: Option<usize>,
    pub selected: bool,
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%d %b %Y %H:%M UTC").to_string()
}

pub fn format_period(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} - {}", format_date(start), format_date(end))
}

pub fn sidebar_rows(
    descriptors: &[CardDescriptor],
    reports: &[Report],
    selected: Option<&str>,
) -> Vec<SidebarRow> {
    descriptors
        .iter()
        .map(|d| {
            let report = find_report(reports, &d.id);
            SidebarRow {
                id: d.id.clone(),
                title: d.display_title().to_string(),
                icon: d.icon.clone(),
                icon_color: d.icon_color.clone(),
                availability: if report.is_some() {
                    Availability::Available
                } else {
                    Availability::NoData
                },
                period: report
                    .map(|r| format_period(r.start_date, r.end_date))
                    .unwrap_or_else(|| NO_DATA_MESSAGE.to_string()),
                generated: report.map(|r| format_timestamp(r.date_added)),
                citation_count: report.map(|r| r.citations.len()),
                selected: selected == Some(d.id.as_str()),
            }
        })
        .collect()
}
