use crate::citations::{citation_action, citation_label, CitationAction};
use crate::model::{CardDescriptor, Citation, Report};
use chrono::{DateTime, NaiveDate, Utc};
use std::borrow::Cow;

pub const CONTENT_PREVIEW_LIMIT: usize = 120;
pub const ELLIPSIS: &str = "...";
pub const PLACEHOLDER_CONTENT: &str = "No report has been generated for this category yet.";

/// Cuts `content` to `limit` characters, appending an ellipsis when anything was dropped.
///
/// Counts `char`s, not bytes or words, so the cut may land inside Markdown markup.
pub fn truncate(content: &str, limit: usize) -> Cow<'_, str> {
    match content.char_indices().nth(limit) {
        None => Cow::Borrowed(content),
        Some((byte_idx, _)) => Cow::Owned(format!("{}{ELLIPSIS}", &content[..byte_idx])),
    }
}

pub fn find_report<'a>(reports: &'a [Report], report_type: &str) -> Option<&'a Report> {
    reports.iter().find(|r| r.report_type == report_type)
}

pub fn placeholder_report(report_type: &str) -> Report {
    let epoch = NaiveDate::default();
    Report {
        id: format!("placeholder-{report_type}"),
        date_added: DateTime::<Utc>::default(),
        content: PLACEHOLDER_CONTENT.to_string(),
        report_type: report_type.to_string(),
        start_date: epoch,
        end_date: epoch,
        jurisdiction: None,
        citations: Vec::new(),
    }
}

pub fn resolve_report<'a>(reports: &'a [Report], report_type: &str) -> Cow<'a, Report> {
    match find_report(reports, report_type) {
        Some(report) => Cow::Borrowed(report),
        None => Cow::Owned(placeholder_report(report_type)),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardHeader {
    pub title: String,
    pub icon: String,
    pub icon_color: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CitationButton {
    pub index: usize,
    pub label: String,
    pub citation: Citation,
    pub action: CitationAction,
}

/// Everything a card needs to draw itself for one `expanded` value.
#[derive(Clone, Debug, PartialEq)]
pub struct CardView {
    pub id: String,
    pub border_color: String,
    pub expanded: bool,
    pub header: Option<CardHeader>,
    pub content: String,
    pub has_data: bool,
    pub citations: Option<Vec<CitationButton>>,
}

impl CardView {
    pub fn build(descriptor: &CardDescriptor, reports: &[Report], expanded: bool) -> Self {
        let has_data = find_report(reports, &descriptor.id).is_some();
        let report = resolve_report(reports, &descriptor.id);

        let header = (!expanded).then(|| CardHeader {
            title: descriptor.display_title().to_string(),
            icon: descriptor.icon.clone(),
            icon_color: descriptor.icon_color.clone(),
        });

        let content = if expanded {
            report.content.clone()
        } else {
            truncate(&report.content, CONTENT_PREVIEW_LIMIT).into_owned()
        };

        let citations = (expanded && !report.citations.is_empty()).then(|| {
            report
                .citations
                .iter()
                .enumerate()
                .map(|(i, citation)| CitationButton {
                    index: i + 1,
                    label: citation_label(i + 1, citation),
                    citation: citation.clone(),
                    action: citation_action(citation),
                })
                .collect()
        });

        Self {
            id: descriptor.id.clone(),
            border_color: descriptor.border_color.clone(),
            expanded,
            header,
            content,
            has_data,
            citations,
        }
    }

    /// Header clicks only ask the parent to expand a collapsed card.
    pub fn should_toggle_on_header_click(expanded: bool) -> bool {
        !expanded
    }
}
