use anyhow::{bail, Context, Result};
use csv::{Terminator, WriterBuilder};
use std::path::Path;
use tracing::debug;

use super::Record;
use crate::fsutil::replace_file;

/// Lay out every record's values in `header` order.
///
/// Each record must carry exactly the header's keys, in any order.
fn rows_in_header_order(header: &[&str], records: &[Record]) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        if record.len() != header.len() {
            bail!(
                "record {} has {} fields, header has {} ({})",
                idx,
                record.len(),
                header.len(),
                header.join(",")
            );
        }
        let row = header
            .iter()
            .map(|key| match record.get(key) {
                Some(v) => Ok(v.to_string()),
                None => bail!("record {} is missing field {:?}", idx, key),
            })
            .collect::<Result<Vec<String>>>()?;
        rows.push(row);
    }
    Ok(rows)
}

/// Write `records` to `path` as CSV. The header is the first record's keys;
/// every line ends in `\n`.
///
/// Fails without touching `path` if `records` is empty or the records do not
/// all share one key set.
#[tracing::instrument(level = "debug", skip(path, records), fields(path = %path.as_ref().display(), records = records.len()))]
pub fn record_data<P: AsRef<Path>>(path: P, records: &[Record]) -> Result<()> {
    let path = path.as_ref();
    let Some(first) = records.first() else {
        bail!(
            "no records to write to {}: need at least one to derive a header",
            path.display()
        );
    };
    let header: Vec<&str> = first.keys().collect();
    let rows = rows_in_header_order(&header, records)?;

    replace_file(path, |w| {
        let mut writer = WriterBuilder::new()
            .delimiter(b',')
            .terminator(Terminator::Any(b'\n'))
            .from_writer(w);
        writer
            .write_record(&header)
            .context("writing CSV header")?;
        for (idx, row) in rows.iter().enumerate() {
            writer
                .write_record(row)
                .with_context(|| format!("writing CSV row {}", idx))?;
        }
        writer.flush().context("flushing CSV writer")?;
        Ok(())
    })?;

    debug!(columns = header.len(), "wrote CSV table");
    Ok(())
}
