//! CSV instance loading.
//!
//! Expects a header row with `Feature`, `Instance` and either `X`/`Y` or
//! `LocX`/`LocY` coordinate columns (the short names win when both are
//! present). Instance ids are composed as feature + instance number
//! ("A" + 1 → "A1").

use std::path::Path;

use log::{debug, info};

use crate::core::SpatialInstance;
use crate::error::{LoadError, LoadResult};

pub fn load_csv(path: &Path) -> LoadResult<Vec<SpatialInstance>> {
    info!("Loading instances from {}", path.display());

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let find = |name: &str| headers.iter().position(|h| h == name);

    let feature_col = find("Feature").ok_or_else(|| LoadError::MissingColumn {
        name: "Feature".into(),
    })?;
    let instance_col = find("Instance").ok_or_else(|| LoadError::MissingColumn {
        name: "Instance".into(),
    })?;
    let x_col = find("X")
        .or_else(|| find("LocX"))
        .ok_or_else(|| LoadError::MissingColumn { name: "X|LocX".into() })?;
    let y_col = find("Y")
        .or_else(|| find("LocY"))
        .ok_or_else(|| LoadError::MissingColumn { name: "Y|LocY".into() })?;

    let mut instances = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        // Header is row 1 in the file, first record row 2.
        let row = idx + 2;

        let feature = field(&record, feature_col, "Feature", row)?;
        let number: i64 = field(&record, instance_col, "Instance", row)?
            .parse()
            .map_err(|_| invalid(&record, instance_col, "Instance", row))?;
        let x: f64 = field(&record, x_col, "X", row)?
            .parse()
            .map_err(|_| invalid(&record, x_col, "X", row))?;
        let y: f64 = field(&record, y_col, "Y", row)?
            .parse()
            .map_err(|_| invalid(&record, y_col, "Y", row))?;

        instances.push(SpatialInstance::numbered(feature, number, x, y));
    }

    debug!("Loaded {} instances", instances.len());
    Ok(instances)
}

fn field<'r>(
    record: &'r csv::StringRecord,
    col: usize,
    column: &'static str,
    row: usize,
) -> LoadResult<&'r str> {
    record.get(col).ok_or(LoadError::InvalidField {
        row,
        column,
        value: String::new(),
    })
}

fn invalid(record: &csv::StringRecord, col: usize, column: &'static str, row: usize) -> LoadError {
    LoadError::InvalidField {
        row,
        column,
        value: record.get(col).unwrap_or_default().to_string(),
    }
}
