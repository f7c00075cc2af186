use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

/// Substitute for a missing `owner` or `status`.
pub const UNKNOWN: &str = "Unknown";

/// Text markers that count as a missing cell, in addition to blank cells.
const NULL_MARKERS: &[&str] = &[
    "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "null", "NULL", "None", "<NA>", "#N/A",
    "#N/A N/A", "#NA", "1.#IND", "-1.#IND", "1.#QNAN", "-1.#QNAN",
];

// ---------------------------------------------------------------------------
// RawRow – one source row before normalisation
// ---------------------------------------------------------------------------

/// The required columns exactly as they come out of the source file.
/// `None` means the cell was absent or empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRow {
    pub name: Option<String>,
    pub owner: Option<String>,
    pub status: Option<String>,
    pub launch_date: Option<String>,
    pub flight_ended: Option<String>,
    pub norad_id: Option<String>,
}

/// Column names every source must provide.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "name",
    "owner",
    "status",
    "launch_date",
    "flight_ended",
    "norad_id",
];

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single satellite launch after loading.
///
/// `owner` and `status` are never empty; dates that did not parse are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRecord {
    pub name: String,
    pub owner: String,
    pub status: String,
    pub launch_date: Option<NaiveDate>,
    pub flight_ended: Option<NaiveDate>,
    /// Opaque identifier, kept verbatim.
    pub norad_id: String,
}

impl LaunchRecord {
    /// Normalise a raw row: fill categoricals, parse dates per cell.
    pub fn from_raw(raw: RawRow) -> Self {
        LaunchRecord {
            name: present(raw.name).unwrap_or_default(),
            owner: present(raw.owner).unwrap_or_else(|| UNKNOWN.to_string()),
            status: present(raw.status).unwrap_or_else(|| UNKNOWN.to_string()),
            launch_date: present(raw.launch_date).as_deref().and_then(parse_date),
            flight_ended: present(raw.flight_ended).as_deref().and_then(parse_date),
            norad_id: present(raw.norad_id).unwrap_or_default(),
        }
    }

    /// Calendar year of `launch_date`.
    pub fn launch_year(&self) -> Option<i32> {
        self.launch_date.map(|d| d.year())
    }
}

/// Trim a cell and drop it if it is blank or a null marker.
fn present(cell: Option<String>) -> Option<String> {
    let cell = cell?;
    let trimmed = cell.trim();
    if trimmed.is_empty() || NULL_MARKERS.contains(&trimmed) {
        return None;
    }
    if trimmed.len() == cell.len() {
        Some(cell)
    } else {
        Some(trimmed.to_string())
    }
}

// ---------------------------------------------------------------------------
// Date parsing
// ---------------------------------------------------------------------------

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d %b %Y", "%b %d, %Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse a date cell leniently. Returns `None` for anything unrecognised.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.date_naive())
}

// ---------------------------------------------------------------------------
// LaunchTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full, immutable record set. Shared behind an `Arc` once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchTable {
    records: Vec<LaunchRecord>,
}

impl LaunchTable {
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        LaunchTable { records }
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
