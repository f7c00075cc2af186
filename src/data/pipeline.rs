use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use super::model::{LaunchRecord, LaunchTable};

/// Rendered in place of a date that is absent.
pub const MISSING_DATE: &str = "—";

/// Display format for dates in the record listing, e.g. `Jan 02, 2020`.
pub const DISPLAY_DATE_FORMAT: &str = "%b %d, %Y";

/// A borrowed subset of the table produced by one stage.
pub type Slice<'a> = Vec<&'a LaunchRecord>;

// ---------------------------------------------------------------------------
// Aggregate rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryCount {
    pub country: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCount {
    pub status: String,
    pub count: usize,
}

/// One detail card of the record listing. Field names match the card labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Launch Date")]
    pub launch_date: String,
    #[serde(rename = "Flight Ended")]
    pub flight_ended: String,
    #[serde(rename = "NORAD ID")]
    pub norad_id: String,
}

// ---------------------------------------------------------------------------
// Country counts
// ---------------------------------------------------------------------------

/// Count records per owner, most frequent first (ties alphabetical).
pub fn country_counts<'a>(records: impl IntoIterator<Item = &'a LaunchRecord>) -> Vec<CountryCount> {
    count_by_desc(records, |r| r.owner.as_str())
        .into_iter()
        .map(|(country, count)| CountryCount { country, count })
        .collect()
}

pub fn country_slice<'a>(
    records: impl IntoIterator<Item = &'a LaunchRecord>,
    country: &str,
) -> Slice<'a> {
    records.into_iter().filter(|r| r.owner == country).collect()
}

// ---------------------------------------------------------------------------
// Yearly counts
// ---------------------------------------------------------------------------

/// Count records per launch year, ascending. Records without a year are skipped.
pub fn yearly_counts<'a>(records: impl IntoIterator<Item = &'a LaunchRecord>) -> Vec<YearCount> {
    let mut by_year: BTreeMap<i32, usize> = BTreeMap::new();
    for year in records.into_iter().filter_map(LaunchRecord::launch_year) {
        *by_year.entry(year).or_default() += 1;
    }
    by_year
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect()
}

pub fn year_slice<'a>(records: impl IntoIterator<Item = &'a LaunchRecord>, year: i32) -> Slice<'a> {
    records
        .into_iter()
        .filter(|r| r.launch_year() == Some(year))
        .collect()
}

// ---------------------------------------------------------------------------
// Status counts
// ---------------------------------------------------------------------------

/// Count records per status, most frequent first (ties alphabetical).
pub fn status_counts<'a>(records: impl IntoIterator<Item = &'a LaunchRecord>) -> Vec<StatusCount> {
    count_by_desc(records, |r| r.status.as_str())
        .into_iter()
        .map(|(status, count)| StatusCount { status, count })
        .collect()
}

pub fn status_slice<'a>(
    records: impl IntoIterator<Item = &'a LaunchRecord>,
    status: &str,
) -> Slice<'a> {
    records.into_iter().filter(|r| r.status == status).collect()
}

// ---------------------------------------------------------------------------
// Record listing
// ---------------------------------------------------------------------------

pub fn record_listing<'a>(records: impl IntoIterator<Item = &'a LaunchRecord>) -> Vec<RecordRow> {
    records
        .into_iter()
        .map(|r| RecordRow {
            name: r.name.clone(),
            launch_date: format_display_date(r.launch_date),
            flight_ended: format_display_date(r.flight_ended),
            norad_id: r.norad_id.clone(),
        })
        .collect()
}

pub fn format_display_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format(DISPLAY_DATE_FORMAT).to_string(),
        None => MISSING_DATE.to_string(),
    }
}

/// Inverse of [`format_display_date`] for present dates.
#[cfg(test)]
pub fn parse_display_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DISPLAY_DATE_FORMAT).ok()
}

// -- helpers --

fn count_by_desc<'a>(
    records: impl IntoIterator<Item = &'a LaunchRecord>,
    key: impl Fn(&'a LaunchRecord) -> &'a str,
) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for r in records {
        *counts.entry(key(r)).or_default() += 1;
    }
    let mut out: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(k, n)| (k.to_string(), n))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

// ---------------------------------------------------------------------------
// Whole pipeline
// ---------------------------------------------------------------------------

/// The user's current drill-down choices. `None` stops the cascade there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub country: Option<String>,
    pub year: Option<i32>,
    pub status: Option<String>,
}

/// Every view for one interaction. Later stages are empty when an earlier
/// selection is missing or matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineOutput {
    pub country_counts: Vec<CountryCount>,
    pub yearly_counts: Vec<YearCount>,
    pub status_counts: Vec<StatusCount>,
    pub records: Vec<RecordRow>,
}

/// Run country → year → status → listing against the table for one selection.
pub fn run(table: &LaunchTable, selection: &Selection) -> PipelineOutput {
    let mut out = PipelineOutput {
        country_counts: country_counts(table.records()),
        ..Default::default()
    };

    let Some(country) = selection.country.as_deref() else {
        return out;
    };
    let by_country = country_slice(table.records(), country);
    if by_country.is_empty() {
        log::debug!("no records for country {country:?}");
    }
    out.yearly_counts = yearly_counts(by_country.iter().copied());

    let Some(year) = selection.year else {
        return out;
    };
    let by_year = year_slice(by_country, year);
    out.status_counts = status_counts(by_year.iter().copied());

    let Some(status) = selection.status.as_deref() else {
        return out;
    };
    out.records = record_listing(status_slice(by_year, status));

    log::debug!(
        "pipeline {country}/{year}/{status}: {} record(s)",
        out.records.len()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{RawRow, UNKNOWN};

    fn rec(owner: &str, status: &str, launch: &str) -> LaunchRecord {
        LaunchRecord::from_raw(RawRow {
            name: Some(format!("{owner}-{status}-{launch}")),
            owner: Some(owner.into()),
            status: Some(status.into()),
            launch_date: Some(launch.into()),
            flight_ended: None,
            norad_id: Some("1".into()),
        })
    }

    fn sample() -> LaunchTable {
        LaunchTable::from_records(vec![
            rec("France", "Active", "2019-03-01"),
            rec("France", "Decayed", "2019-07-15"),
            rec("France", "Active", "2021-01-01"),
            rec("France", "Active", "not-a-date"),
            rec("US", "Active", "2019-01-01"),
            rec("US", "Active", "2020-01-01"),
            rec("US", "Decayed", "1990-01-01"),
            rec("US", "Decayed", "1991-01-01"),
            rec("", "", "2005-05-05"),
        ])
    }

    fn select(country: &str, year: i32, status: &str) -> Selection {
        Selection {
            country: Some(country.into()),
            year: Some(year),
            status: Some(status.into()),
        }
    }

    #[test]
    fn test_country_counts_partition_table() {
        let table = sample();
        let counts = country_counts(table.records());
        let total: usize = counts.iter().map(|c| c.count).sum();
        assert_eq!(total, table.len());
        assert!(counts.iter().any(|c| c.country == UNKNOWN && c.count == 1));
    }

    #[test]
    fn test_country_counts_order() {
        let counts = country_counts(sample().records());
        let order: Vec<&str> = counts.iter().map(|c| c.country.as_str()).collect();
        assert_eq!(order, vec!["France", "US", UNKNOWN]);
    }

    #[test]
    fn test_yearly_counts_never_exceed_country_count() {
        let table = sample();
        for cc in country_counts(table.records()) {
            let slice = country_slice(table.records(), &cc.country);
            let yearly: usize = yearly_counts(slice.iter().copied()).iter().map(|y| y.count).sum();
            assert!(yearly <= cc.count, "{}", cc.country);
        }
    }

    #[test]
    fn test_yearly_counts_ascending_and_skip_undated() {
        let table = sample();
        let france = country_slice(table.records(), "France");
        assert_eq!(
            yearly_counts(france.iter().copied()),
            vec![
                YearCount { year: 2019, count: 2 },
                YearCount { year: 2021, count: 1 },
            ]
        );
    }

    #[test]
    fn test_two_statuses_in_one_year() {
        let out = run(&sample(), &select("France", 2019, "Active"));
        assert_eq!(out.status_counts.len(), 2);
        assert_eq!(out.status_counts.iter().map(|s| s.count).sum::<usize>(), 2);
        assert_eq!(out.records.len(), 1);
    }

    #[test]
    fn test_status_counts_order() {
        let table = sample();
        let counts = status_counts(table.records());
        assert_eq!(counts[0].status, "Active");
        assert_eq!(counts[0].count, 5);
        assert_eq!(counts.last().map(|s| s.status.as_str()), Some(UNKNOWN));
    }

    #[test]
    fn test_unknown_scenario() {
        let table = LaunchTable::from_records(vec![LaunchRecord::from_raw(RawRow {
            name: Some("SAT".into()),
            owner: Some(String::new()),
            status: None,
            launch_date: Some("2020-01-02".into()),
            flight_ended: Some(String::new()),
            norad_id: Some("123".into()),
        })]);

        let out = run(&table, &select(UNKNOWN, 2020, UNKNOWN));
        assert_eq!(
            out.records,
            vec![RecordRow {
                name: "SAT".into(),
                launch_date: "Jan 02, 2020".into(),
                flight_ended: "—".into(),
                norad_id: "123".into(),
            }]
        );
    }

    #[test]
    fn test_undated_record_counts_only_in_stage_a() {
        let table = LaunchTable::from_records(vec![rec("Chile", "Active", "not-a-date")]);
        let out = run(
            &table,
            &Selection {
                country: Some("Chile".into()),
                ..Default::default()
            },
        );
        assert_eq!(
            out.country_counts,
            vec![CountryCount { country: "Chile".into(), count: 1 }]
        );
        assert!(out.yearly_counts.is_empty());
        assert!(out.status_counts.is_empty());
    }

    #[test]
    fn test_cascade_stops_at_missing_selection() {
        let table = sample();
        let out = run(&table, &Selection::default());
        assert!(!out.country_counts.is_empty());
        assert!(out.yearly_counts.is_empty());

        let out = run(
            &table,
            &Selection {
                country: Some("US".into()),
                year: Some(2019),
                status: None,
            },
        );
        assert_eq!(out.status_counts.len(), 1);
        assert!(out.records.is_empty());
    }

    #[test]
    fn test_out_of_domain_selection_is_empty() {
        let table = sample();
        let out = run(&table, &select("Atlantis", 2019, "Active"));
        assert!(out.yearly_counts.is_empty());
        assert!(out.status_counts.is_empty());
        assert!(out.records.is_empty());

        let out = run(&table, &select("France", 1850, "Active"));
        assert!(!out.yearly_counts.is_empty());
        assert!(out.status_counts.is_empty());
        assert!(out.records.is_empty());
    }

    #[test]
    fn test_empty_table() {
        let out = run(&LaunchTable::default(), &select("France", 2019, "Active"));
        assert_eq!(out, PipelineOutput::default());
    }

    #[test]
    fn test_display_date_round_trip() {
        let mut d = NaiveDate::from_ymd_opt(1957, 10, 4).unwrap();
        let end = NaiveDate::from_ymd_opt(2030, 12, 31).unwrap();
        while d <= end {
            assert_eq!(parse_display_date(&format_display_date(Some(d))), Some(d));
            d += chrono::Duration::days(97);
        }
        assert_eq!(format_display_date(None), MISSING_DATE);
        assert_eq!(parse_display_date(MISSING_DATE), None);
    }
}
