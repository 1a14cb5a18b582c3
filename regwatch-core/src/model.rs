use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Source collection a citation points into.
///
/// Tags arrive as kebab-case strings from the data source; anything outside the
/// known set is kept verbatim in `Unknown` so it survives a round trip.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CitationCollection {
    Bill,
    Gazette,
    CaseLaw,
    Regulation,
    Consultation,
    Fine,
    WebSearch,
    Unknown(String),
}

impl CitationCollection {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Bill => "bill",
            Self::Gazette => "gazette",
            Self::CaseLaw => "case-law",
            Self::Regulation => "regulation",
            Self::Consultation => "consultation",
            Self::Fine => "fine",
            Self::WebSearch => "web-search",
            Self::Unknown(tag) => tag,
        }
    }
}

impl From<String> for CitationCollection {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "bill" => Self::Bill,
            "gazette" => Self::Gazette,
            "case-law" => Self::CaseLaw,
            "regulation" => Self::Regulation,
            "consultation" => Self::Consultation,
            "fine" => Self::Fine,
            "web-search" => Self::WebSearch,
            _ => Self::Unknown(tag),
        }
    }
}

impl From<CitationCollection> for String {
    fn from(collection: CitationCollection) -> Self {
        match collection {
            CitationCollection::Unknown(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub collection: CitationCollection,
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub date_added: DateTime<Utc>,
    pub content: String,
    pub report_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    #[serde(default)]
    pub citations: Vec<Citation>,
}

/// Static display configuration for one report category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDescriptor {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub border_color: String,
    pub icon_color: String,
    #[serde(default)]
    pub is_weekly_summary: bool,
}

impl CardDescriptor {
    /// Title shown to users, falling back to the raw type key.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.id
        } else {
            &self.title
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_tags_parse_known_and_unknown() {
        assert_eq!(CitationCollection::from("case-law".to_string()), CitationCollection::CaseLaw);
        assert_eq!(
            CitationCollection::from("press-release".to_string()),
            CitationCollection::Unknown("press-release".into())
        );
    }

    #[test]
    fn report_reads_camel_case_json() {
        let report: Report = serde_json::from_value(serde_json::json!({
            "id": "r-1",
            "dateAdded": "2026-10-01T08:30:00Z",
            "content": "# Weekly",
            "reportType": "gazette",
            "startDate": "2026-09-24",
            "endDate": "2026-10-01",
            "citations": [
                {"collection": "bill", "id": "42", "title": "Bill X"},
                {"collection": "memo", "id": "7"}
            ]
        }))
        .expect("report");

        assert_eq!(report.report_type, "gazette");
        assert_eq!(report.jurisdiction, None);
        assert_eq!(report.citations[0].collection, CitationCollection::Bill);
        assert_eq!(report.citations[1].collection, CitationCollection::Unknown("memo".into()));
        assert_eq!(report.citations[1].title, "");

        let json = serde_json::to_value(&report.citations[1]).expect("serialize");
        assert_eq!(json["collection"], "memo");
    }

    #[test]
    fn display_title_falls_back_to_id() {
        let descriptor = CardDescriptor {
            id: "fines_quarterly".into(),
            title: "  ".into(),
            icon: "gavel".into(),
            border_color: "#000".into(),
            icon_color: "#000".into(),
            is_weekly_summary: false,
        };
        assert_eq!(descriptor.display_title(), "fines_quarterly");
    }
}
