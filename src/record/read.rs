use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::{fs::File, io::BufReader, path::Path};
use tracing::debug;

use super::{Record, Value};

/// Read a headed CSV table back into records, one per data row.
///
/// Keys follow the header order and each cell goes through [`Value::infer`].
#[tracing::instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b',')
        .from_reader(BufReader::new(file));

    let headers = rdr
        .headers()
        .with_context(|| format!("reading CSV header of {}", path.display()))?
        .clone();

    let mut records = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let row = result
            .with_context(|| format!("CSV parse error in {} at record {}", path.display(), idx))?;
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(k, v)| (k, Value::infer(v)))
            .collect();
        records.push(record);
    }

    debug!(rows = records.len(), columns = headers.len(), "read CSV table");
    Ok(records)
}
