use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Date32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// Owners weighted roughly by how busy they are.
const OWNERS: [(&str, usize); 8] = [
    ("United States", 40),
    ("Russia", 20),
    ("China", 15),
    ("Japan", 6),
    ("France", 5),
    ("India", 5),
    ("United Kingdom", 3),
    ("Brazil", 1),
];

const STATUSES: [&str; 4] = ["Active", "Decayed", "Inactive", "Lost"];

#[derive(Serialize)]
struct SampleRow {
    name: String,
    owner: String,
    status: String,
    launch_date: String,
    flight_ended: String,
    norad_id: String,
}

fn pick_owner(rng: &mut SimpleRng) -> &'static str {
    let total: usize = OWNERS.iter().map(|(_, w)| w).sum();
    let mut roll = rng.below(total);
    for (owner, weight) in OWNERS {
        if roll < weight {
            return owner;
        }
        roll -= weight;
    }
    OWNERS[0].0
}

fn generate(n: usize, rng: &mut SimpleRng) -> Result<Vec<SampleRow>> {
    let epoch = NaiveDate::from_ymd_opt(1957, 10, 4).context("epoch date")?;
    let span_days = 67 * 365;

    let mut rows = Vec::with_capacity(n);
    for i in 0..n {
        let launch = epoch + chrono::Duration::days(rng.below(span_days) as i64);
        let status = STATUSES[rng.below(STATUSES.len())];

        let flight_ended = if status == "Decayed" || status == "Lost" {
            let end = launch + chrono::Duration::days(30 + rng.below(3650) as i64);
            end.format("%Y-%m-%d").to_string()
        } else {
            String::new()
        };

        // A few dirty cells so the loader's fallbacks have something to do.
        let owner = if rng.chance(0.02) { "" } else { pick_owner(rng) };
        let status = if rng.chance(0.03) { "" } else { status };
        let launch_date = if rng.chance(0.01) {
            "unknown".to_string()
        } else {
            launch.format("%Y-%m-%d").to_string()
        };

        rows.push(SampleRow {
            name: format!("SAT-{:05}", i + 1),
            owner: owner.to_string(),
            status: status.to_string(),
            launch_date,
            flight_ended,
            norad_id: format!("{:05}", 1000 + i),
        });
    }
    Ok(rows)
}

fn write_csv(path: &str, rows: &[SampleRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &str, rows: &[SampleRow]) -> Result<()> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).context("unix epoch")?;
    let to_days = |s: &str| {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .map(|d| (d - epoch).num_days() as i32)
    };
    let text = |s: &str| if s.is_empty() { None } else { Some(s.to_string()) };

    let schema = Arc::new(Schema::new(vec![
        Field::new("name", DataType::Utf8, false),
        Field::new("owner", DataType::Utf8, true),
        Field::new("status", DataType::Utf8, true),
        Field::new("launch_date", DataType::Date32, true),
        Field::new("flight_ended", DataType::Date32, true),
        Field::new("norad_id", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| &r.name))),
            Arc::new(StringArray::from_iter(rows.iter().map(|r| text(&r.owner)))),
            Arc::new(StringArray::from_iter(rows.iter().map(|r| text(&r.status)))),
            Arc::new(Date32Array::from_iter(rows.iter().map(|r| to_days(&r.launch_date)))),
            Arc::new(Date32Array::from_iter(rows.iter().map(|r| to_days(&r.flight_ended)))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| &r.norad_id))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate(2_000, &mut rng)?;

    let csv_path = "satellite launches.csv";
    let parquet_path = "satellite_launches.parquet";
    write_csv(csv_path, &rows)?;
    write_parquet(parquet_path, &rows)?;

    println!(
        "Wrote {} launch records to {csv_path} and {parquet_path}",
        rows.len()
    );
    Ok(())
}
