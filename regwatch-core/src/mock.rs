//! Static card configuration and the bundled sample reports.

use crate::model::{CardDescriptor, Citation, CitationCollection, Report};
use chrono::{DateTime, NaiveDate, Utc};

fn descriptor(
    id: &str,
    title: &str,
    icon: &str,
    color: &str,
    is_weekly_summary: bool,
) -> CardDescriptor {
    CardDescriptor {
        id: id.into(),
        title: title.into(),
        icon: icon.into(),
        border_color: color.into(),
        icon_color: color.into(),
        is_weekly_summary,
    }
}

pub fn card_descriptors() -> Vec<CardDescriptor> {
    vec![
        descriptor("weekly_summary", "Weekly Regulatory Summary", "summarize", "#2563eb", true),
        descriptor("critical_alerts", "Critical Alerts", "warning", "#dc2626", false),
        descriptor("fines_quarterly", "Fines & Enforcement", "gavel", "#ea580c", false),
        descriptor("bill_tracker", "Bill Tracker", "account_balance", "#7c3aed", false),
        descriptor("gazette", "Gazette Watch", "newspaper", "#0891b2", false),
        descriptor("case_law_digest", "Case Law Digest", "balance", "#059669", false),
        descriptor("consultations", "Open Consultations", "forum", "#ca8a04", false),
    ]
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn at(date: NaiveDate, hour: u32, minute: u32) -> DateTime<Utc> {
    date.and_hms_opt(hour, minute, 0).unwrap_or_default().and_utc()
}

fn cite(collection: CitationCollection, id: &str, title: &str) -> Citation {
    Citation {
        collection,
        id: id.into(),
        title: title.into(),
        url: None,
    }
}

pub fn reports() -> Vec<Report> {
    vec![
        Report {
            id: "rpt-weekly-2026-41".into(),
            date_added: at(day(2026, 10, 12), 7, 0),
            content: WEEKLY_SUMMARY.into(),
            report_type: "weekly_summary".into(),
            start_date: day(2026, 10, 5),
            end_date: day(2026, 10, 11),
            jurisdiction: Some("Federal".into()),
            citations: vec![
                cite(CitationCollection::Bill, "C-27", "Digital Charter Implementation Act"),
                cite(CitationCollection::Gazette, "2026-41-I", "Canada Gazette Part I, Vol. 160"),
                Citation {
                    collection: CitationCollection::WebSearch,
                    id: "ws-1".into(),
                    title: "Regulator press release".into(),
                    url: Some("https://example.org/press/2026-10-09".into()),
                },
            ],
        },
        Report {
            id: "rpt-fines-2026-q3".into(),
            date_added: at(day(2026, 10, 2), 14, 30),
            content: FINES_QUARTERLY.into(),
            report_type: "fines_quarterly".into(),
            start_date: day(2026, 7, 1),
            end_date: day(2026, 9, 30),
            jurisdiction: Some("Ontario".into()),
            citations: vec![
                cite(CitationCollection::Fine, "F-2026-118", "Administrative penalty, Acme Data Inc."),
                cite(CitationCollection::CaseLaw, "2026-ONSC-4410", "R. v. Acme Data Inc."),
            ],
        },
        Report {
            id: "rpt-bills-2026-10".into(),
            date_added: at(day(2026, 10, 14), 9, 45),
            content: BILL_TRACKER.into(),
            report_type: "bill_tracker".into(),
            start_date: day(2026, 10, 1),
            end_date: day(2026, 10, 31),
            jurisdiction: Some("Federal".into()),
            citations: vec![
                cite(CitationCollection::Bill, "C-27", "Digital Charter Implementation Act"),
                cite(CitationCollection::Bill, "S-5", "Strengthening Environmental Protection Act"),
                cite(CitationCollection::Consultation, "CONS-88", "Consultation on AI data standards"),
            ],
        },
        Report {
            id: "rpt-gazette-2026-41".into(),
            date_added: at(day(2026, 10, 10), 16, 5),
            content: GAZETTE.into(),
            report_type: "gazette".into(),
            start_date: day(2026, 10, 4),
            end_date: day(2026, 10, 10),
            jurisdiction: None,
            citations: vec![
                cite(CitationCollection::Gazette, "2026-41-II", "Canada Gazette Part II, SOR/2026-201"),
                cite(CitationCollection::Regulation, "SOR-2026-201", "Privacy Breach Reporting Regulations"),
            ],
        },
        Report {
            id: "rpt-caselaw-2026-09".into(),
            date_added: at(day(2026, 9, 30), 11, 0),
            content: CASE_LAW.into(),
            report_type: "case_law_digest".into(),
            start_date: day(2026, 9, 1),
            end_date: day(2026, 9, 30),
            jurisdiction: Some("Quebec".into()),
            citations: Vec::new(),
        },
    ]
}

const WEEKLY_SUMMARY: &str = "\
# Week 41 at a glance

Parliament returned with a **busy legislative agenda**. Three items stand out:

1. Bill C-27 passed committee with amendments to the *consent* provisions.
2. The Gazette published final breach-reporting regulations.
3. A regulator announced a sector review of data brokers.

> Expect guidance on the new reporting thresholds before year end.

| Item | Status | Effective |
|------|:------:|----------:|
| C-27 | Committee | n/a |
| SOR/2026-201 | Final | 2027-01-01 |

---

See the detail cards for the full record.
";

const FINES_QUARTERLY: &str = "\
## Enforcement, Q3 2026

Total penalties issued: **$4.2M** across 11 decisions.

- Largest single penalty: Acme Data Inc. for ~~late~~ unreported breaches.
- Two decisions are under appeal.

### Trend

Penalty amounts rose 30% over Q2, driven by *repeat offenders*.
";

const BILL_TRACKER: &str = "\
## Bills in motion

| Bill | Chamber | Stage | Last action |
|------|---------|-------|-------------|
| C-27 | House | Committee | 2026-10-08 |
| S-5 | Senate | Third reading | 2026-10-13 |

Consultation on AI data standards closes **2026-11-15**.
";

const GAZETTE: &str = "\
## Gazette highlights

- Part II: *Privacy Breach Reporting Regulations* registered as SOR/2026-201.
- Part I: proposed amendments to records retention schedules.

#### Coming into force

The regulations take effect on 1 January 2027.
";

const CASE_LAW: &str = "\
## September decisions

Courts considered the scope of *legitimate interest* in two decisions. Neither has been reported yet.
";
