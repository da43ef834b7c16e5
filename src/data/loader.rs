use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{LaunchRecord, LaunchTable, OutcomeClass};

/// Column names shared by every supported format.
pub mod columns {
    pub const FLIGHT_NUMBER: &str = "Flight Number";
    pub const LAUNCH_SITE: &str = "Launch Site";
    pub const MISSION_OUTCOME: &str = "Mission Outcome";
    pub const CLASS: &str = "class";
    pub const PAYLOAD_MASS: &str = "Payload Mass (kg)";
    pub const BOOSTER_VERSION: &str = "Booster Version";
    pub const BOOSTER_CATEGORY: &str = "Booster Version Category";
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the launch columns (extra columns ignored)
/// * `.json`    – `[{ "Launch Site": "...", "class": 1, ... }, ...]`
/// * `.parquet` – same column names, string / integer / float typed
pub fn load_file(path: &Path) -> Result<LaunchTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} launches from {} ({} sites)",
        table.len(),
        path.display(),
        table.sites.len()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one launch per row.
/// Empty `Payload Mass (kg)` cells load as missing masses.
fn load_csv(path: &Path) -> Result<LaunchTable> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<LaunchTable> {
    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<LaunchRecord>().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }
    Ok(LaunchTable::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`:
///
/// ```json
/// [
///   { "Launch Site": "CCAFS LC-40", "class": 0, "Payload Mass (kg)": 0.0,
///     "Booster Version Category": "v1.0" },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<LaunchTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let records: Vec<LaunchRecord> = serde_json::from_str(&text).context("parsing JSON")?;
    Ok(LaunchTable::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of launches.
///
/// `Launch Site`, `class` and `Booster Version Category` are required; the
/// remaining launch columns are optional. Works with files written by both
/// **Pandas** (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<LaunchTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        read_batch(&batch, records.len(), &mut records)?;
    }

    Ok(LaunchTable::from_records(records))
}

fn read_batch(batch: &RecordBatch, row_offset: usize, out: &mut Vec<LaunchRecord>) -> Result<()> {
    let required = |name: &str| {
        batch
            .column_by_name(name)
            .ok_or_else(|| anyhow!("Parquet file missing '{name}' column"))
    };
    let site_col = required(columns::LAUNCH_SITE)?;
    let class_col = required(columns::CLASS)?;
    let category_col = required(columns::BOOSTER_CATEGORY)?;

    let flight_col = batch.column_by_name(columns::FLIGHT_NUMBER);
    let outcome_col = batch.column_by_name(columns::MISSION_OUTCOME);
    let payload_col = batch.column_by_name(columns::PAYLOAD_MASS);
    let version_col = batch.column_by_name(columns::BOOSTER_VERSION);

    for row in 0..batch.num_rows() {
        let row_no = row_offset + row;
        let site = extract_string(site_col, row)
            .with_context(|| format!("Row {row_no}: missing '{}'", columns::LAUNCH_SITE))?;
        let class = extract_i64(class_col, row)
            .with_context(|| format!("Row {row_no}: missing '{}'", columns::CLASS))?;
        let class = OutcomeClass::try_from(class).map_err(|e| anyhow!("Row {row_no}: {e}"))?;
        let booster_category = extract_string(category_col, row)
            .with_context(|| format!("Row {row_no}: missing '{}'", columns::BOOSTER_CATEGORY))?;

        out.push(LaunchRecord {
            flight_number: flight_col
                .and_then(|c| extract_i64(c, row))
                .and_then(|n| u32::try_from(n).ok()),
            site,
            mission_outcome: outcome_col.and_then(|c| extract_string(c, row)),
            class,
            payload_mass_kg: payload_col.and_then(|c| extract_f64(c, row)),
            booster_version: version_col.and_then(|c| extract_string(c, row)),
            booster_category,
        });
    }
    Ok(())
}

// -- Arrow helpers --

fn extract_string(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => Some(col.as_string_opt::<i32>()?.value(row).to_string()),
        DataType::LargeUtf8 => Some(col.as_string_opt::<i64>()?.value(row).to_string()),
        _ => None,
    }
}

fn extract_i64(col: &Arc<dyn Array>, row: usize) -> Option<i64> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Int32 => Some(col.as_primitive_opt::<Int32Type>()?.value(row) as i64),
        DataType::Int64 => Some(col.as_primitive_opt::<Int64Type>()?.value(row)),
        // Pandas writes integer columns with missing values as floats.
        DataType::Float64 => {
            let v = col.as_primitive_opt::<Float64Type>()?.value(row);
            (v.fract() == 0.0).then_some(v as i64)
        }
        _ => None,
    }
}

fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    let value = match col.data_type() {
        DataType::Float64 => col.as_primitive_opt::<Float64Type>()?.value(row),
        DataType::Float32 => col.as_primitive_opt::<Float32Type>()?.value(row) as f64,
        DataType::Int32 | DataType::Int64 => extract_i64(col, row)? as f64,
        _ => return None,
    };
    (!value.is_nan()).then_some(value)
}
