use anyhow::{anyhow, bail, Context, Result};
use arrow::{
    array::{Array, Float64Array, StringArray},
    compute,
    csv::{reader::Format, ReaderBuilder},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use std::{
    fs::File,
    io::{BufReader, Seek, SeekFrom},
    path::Path,
    sync::Arc,
};
use tracing::debug;

use super::RaceQuery;

/// Header-derived schema: the time column as Float64, everything else as Utf8.
fn race_schema(file: &mut File, path: &Path, query: &RaceQuery) -> Result<Arc<Schema>> {
    let (inferred, _) = Format::default()
        .with_header(true)
        .infer_schema(&mut *file, Some(0))
        .with_context(|| format!("reading CSV header of {}", path.display()))?;
    file.seek(SeekFrom::Start(0))
        .with_context(|| format!("rewinding {}", path.display()))?;

    for column in [query.name_column(), query.time_column()] {
        if inferred.field_with_name(column).is_err() {
            bail!("column {:?} not found in {}", column, path.display());
        }
    }

    let fields: Vec<Field> = inferred
        .fields()
        .iter()
        .map(|f| {
            let ty = if f.name() == query.time_column() {
                DataType::Float64
            } else {
                DataType::Utf8
            };
            Field::new(f.name(), ty, true)
        })
        .collect();
    Ok(Arc::new(Schema::new(fields)))
}

/// Load the whole race file as Arrow record batches.
pub fn load_batches(path: &Path, query: &RaceQuery) -> Result<Vec<RecordBatch>> {
    let mut file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let schema = race_schema(&mut file, path, query)?;

    let reader = ReaderBuilder::new(schema)
        .with_header(true)
        .with_delimiter(b',')
        .with_quote(b'"')
        .build(BufReader::new(file))
        .context("creating CSV reader")?;

    let batches = reader
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("reading CSV batches from {}", path.display()))?;
    debug!(
        batches = batches.len(),
        rows = batches.iter().map(|b| b.num_rows()).sum::<usize>(),
        "loaded race batches"
    );
    Ok(batches)
}

/// Blank time cells come back as nulls; reject them, naming the data row.
fn reject_missing_times(times: &Float64Array, first_row: usize, path: &Path) -> Result<()> {
    if times.null_count() == 0 {
        return Ok(());
    }
    match (0..times.len()).find(|&i| times.is_null(i)) {
        Some(i) => bail!(
            "record {} of {}: \"\" is not a number",
            first_row + i,
            path.display()
        ),
        None => Ok(()),
    }
}

fn typed_column<'a, T: 'static>(batch: &'a RecordBatch, name: &str) -> Result<&'a T> {
    batch
        .column_by_name(name)
        .and_then(|col| col.as_any().downcast_ref::<T>())
        .ok_or_else(|| anyhow!("column {:?} missing or mistyped in batch", name))
}

pub(crate) fn fastest_runner(path: &Path, query: &RaceQuery) -> Result<String> {
    let batches = load_batches(path, query)?;

    let mut best: Option<(f64, String)> = None;
    let mut first_row = 0;
    for batch in &batches {
        let times: &Float64Array = typed_column(batch, query.time_column())?;
        reject_missing_times(times, first_row, path)?;
        first_row += batch.num_rows();
        let Some(batch_min) = compute::min(times) else {
            continue;
        };
        // strictly smaller, so an earlier batch wins a tie
        if best.as_ref().is_some_and(|(t, _)| batch_min >= *t) {
            continue;
        }
        let Some(row) = times.iter().position(|v| v == Some(batch_min)) else {
            continue;
        };
        let names: &StringArray = typed_column(batch, query.name_column())?;
        best = Some((batch_min, names.value(row).to_string()));
    }

    match best {
        Some((_, name)) => Ok(name),
        None => bail!("no race results in {}", path.display()),
    }
}

pub(crate) fn mean_finish_time(path: &Path, query: &RaceQuery) -> Result<f64> {
    let batches = load_batches(path, query)?;

    let mut total = 0.0;
    let mut count = 0usize;
    for batch in &batches {
        let times: &Float64Array = typed_column(batch, query.time_column())?;
        reject_missing_times(times, count, path)?;
        if let Some(s) = compute::sum(times) {
            total += s;
        }
        count += times.len() - times.null_count();
    }

    if count == 0 {
        bail!("no race results in {}", path.display());
    }
    Ok(total / count as f64)
}
