use anyhow::{anyhow, bail, Context, Result};
use csv::{ReaderBuilder, StringRecord};
use std::{fs::File, io::BufReader, path::Path};
use tracing::debug;

use super::{RaceQuery, RaceResult};

fn column_index(headers: &StringRecord, column: &str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| anyhow!("column {:?} not found in {}", column, path.display()))
}

/// Read every row of a race file into memory, in file order.
pub fn load_results(path: &Path, query: &RaceQuery) -> Result<Vec<RaceResult>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b',')
        .from_reader(BufReader::new(file));

    let headers = rdr
        .headers()
        .with_context(|| format!("reading CSV header of {}", path.display()))?
        .clone();
    let name_idx = column_index(&headers, query.name_column(), path)?;
    let time_idx = column_index(&headers, query.time_column(), path)?;

    let mut results = Vec::new();
    for (idx, row) in rdr.records().enumerate() {
        let row =
            row.with_context(|| format!("CSV parse error in {} at record {}", path.display(), idx))?;
        let name = row.get(name_idx).unwrap_or_default().to_string();
        let raw_time = row.get(time_idx).unwrap_or_default();
        let finish_time: f64 = raw_time.parse().with_context(|| {
            format!(
                "record {} of {}: {:?} is not a number",
                idx,
                path.display(),
                raw_time
            )
        })?;
        results.push(RaceResult { name, finish_time });
    }

    debug!(rows = results.len(), "loaded race results");
    Ok(results)
}

pub(crate) fn fastest_runner(path: &Path, query: &RaceQuery) -> Result<String> {
    let results = load_results(path, query)?;
    // min_by keeps the first of equal elements
    let fastest = results
        .into_iter()
        .min_by(|a, b| a.finish_time.total_cmp(&b.finish_time));
    match fastest {
        Some(r) => Ok(r.name),
        None => bail!("no race results in {}", path.display()),
    }
}

pub(crate) fn mean_finish_time(path: &Path, query: &RaceQuery) -> Result<f64> {
    let results = load_results(path, query)?;
    if results.is_empty() {
        bail!("no race results in {}", path.display());
    }
    let total: f64 = results.iter().map(|r| r.finish_time).sum();
    Ok(total / results.len() as f64)
}
