use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::path::Path;

use arrow::array::Array;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::{LaunchRecord, LaunchTable, RawRow, REQUIRED_COLUMNS};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`             – comma-delimited text with a header row
/// * `.tsv` / `.tab`    – tab-delimited text with a header row
/// * `.json`            – `[{ "name": ..., "owner": ..., ... }, ...]`
/// * `.parquet` / `.pq` – any column types; cells are read as text
///
/// A missing file or missing required columns fail the whole load.
/// Bad date cells only blank that cell.
pub fn load_file(path: &Path) -> Result<LaunchTable, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "csv" => load_delimited(path, b',')?,
        "tsv" | "tab" => load_delimited(path, b'\t')?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    Ok(normalise(rows))
}

fn normalise(rows: Vec<RawRow>) -> LaunchTable {
    let mut bad_launch = 0usize;
    let mut bad_ended = 0usize;

    let records: Vec<LaunchRecord> = rows
        .into_iter()
        .map(|raw| {
            let had_launch = has_text(&raw.launch_date);
            let had_ended = has_text(&raw.flight_ended);
            let rec = LaunchRecord::from_raw(raw);
            if had_launch && rec.launch_date.is_none() {
                bad_launch += 1;
            }
            if had_ended && rec.flight_ended.is_none() {
                bad_ended += 1;
            }
            rec
        })
        .collect();

    if bad_launch + bad_ended > 0 {
        log::debug!(
            "{bad_launch} launch_date and {bad_ended} flight_ended cells did not parse as dates"
        );
    }
    LaunchTable::from_records(records)
}

fn has_text(cell: &Option<String>) -> bool {
    cell.as_deref().is_some_and(|s| !s.trim().is_empty())
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Error out with every required column not found in `present`.
fn check_columns<'a>(present: impl IntoIterator<Item = &'a str>) -> Result<(), LoadError> {
    let present: BTreeSet<&str> = present.into_iter().map(str::trim).collect();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !present.contains(*col))
        .map(|col| col.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(LoadError::MissingColumns { missing })
    }
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

/// Header row required; extra columns are ignored.
fn load_delimited(path: &Path, delimiter: u8) -> Result<Vec<RawRow>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(open(path)?);

    let headers = reader.headers()?.clone();
    check_columns(headers.iter())?;

    let mut ragged = 0usize;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() != headers.len() {
            ragged += 1;
        }
        rows.push(record.deserialize::<RawRow>(Some(&headers))?);
    }

    if ragged > 0 {
        log::debug!(
            "{ragged} row(s) did not have {} fields; absent fields read as missing",
            headers.len()
        );
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, as `df.to_json(orient='records')`
/// writes it):
///
/// ```json
/// [
///   { "name": "VANGUARD 1", "owner": "US", "status": "Decayed",
///     "launch_date": "1958-03-17", "flight_ended": null, "norad_id": 5 },
///   ...
/// ]
/// ```
///
/// A column counts as present if at least one record carries the key.
/// Keys are matched after trimming whitespace.
fn load_json(path: &Path) -> Result<Vec<RawRow>, LoadError> {
    let root: JsonValue = serde_json::from_reader(std::io::BufReader::new(open(path)?))?;

    let records = root
        .as_array()
        .ok_or_else(|| LoadError::MalformedJson("expected a top-level array".into()))?;

    let mut objects: Vec<BTreeMap<&str, &JsonValue>> = Vec::with_capacity(records.len());
    let mut keys: BTreeSet<&str> = BTreeSet::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| LoadError::MalformedJson(format!("row {i} is not an object")))?;
        let trimmed: BTreeMap<&str, &JsonValue> =
            obj.iter().map(|(k, v)| (k.trim(), v)).collect();
        keys.extend(trimmed.keys().copied());
        objects.push(trimmed);
    }
    check_columns(keys)?;

    Ok(objects
        .into_iter()
        .map(|obj| {
            let cell = |key: &str| obj.get(key).and_then(|v| json_to_text(v));
            RawRow {
                name: cell("name"),
                owner: cell("owner"),
                status: cell("status"),
                launch_date: cell("launch_date"),
                flight_ended: cell("flight_ended"),
                norad_id: cell("norad_id"),
            }
        })
        .collect())
}

fn json_to_text(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Every required column is rendered to text with Arrow's display
/// formatter, so strings, integers and `Date32`/timestamp columns all work.
fn load_parquet(path: &Path) -> Result<Vec<RawRow>, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    check_columns(
        builder
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().as_str()),
    )?;
    let reader = builder.build()?;

    let options = FormatOptions::default();
    let mut rows = Vec::new();

    for batch in reader {
        let batch = batch?;
        let schema = batch.schema();

        let mut columns = Vec::with_capacity(REQUIRED_COLUMNS.len());
        for name in REQUIRED_COLUMNS {
            let idx = schema
                .fields()
                .iter()
                .position(|f| f.name().trim() == name)
                .ok_or_else(|| LoadError::MissingColumns {
                    missing: vec![name.to_string()],
                })?;
            columns.push(batch.column(idx).clone());
        }
        let formatters = columns
            .iter()
            .map(|col| ArrayFormatter::try_new(col.as_ref(), &options))
            .collect::<Result<Vec<_>, _>>()?;

        let cell = |c: usize, row: usize| -> Option<String> {
            if columns[c].is_null(row) {
                None
            } else {
                Some(formatters[c].value(row).to_string())
            }
        };

        for row in 0..batch.num_rows() {
            rows.push(RawRow {
                name: cell(0, row),
                owner: cell(1, row),
                status: cell(2, row),
                launch_date: cell(3, row),
                flight_ended: cell(4, row),
                norad_id: cell(5, row),
            });
        }
    }

    Ok(rows)
}
