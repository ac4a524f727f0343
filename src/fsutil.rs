use anyhow::{Context, Result};
use std::{
    ffi::OsString,
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// `<dir>/.<file name>.tmp`, next to `path` so the final rename stays on one filesystem.
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_else(|| path.as_os_str()));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write a whole file through a sibling temp file, then rename it over `path`.
///
/// `fill` gets a buffered writer on the temp file. If it (or the flush) fails the
/// temp file is removed and `path` is left as it was.
pub fn replace_file<P, F>(path: P, fill: F) -> Result<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let path = path.as_ref();
    let tmp_path = tmp_path_for(path);

    let written = (|| -> Result<()> {
        let tmp = File::create(&tmp_path)
            .with_context(|| format!("creating {}", tmp_path.display()))?;
        let mut writer = BufWriter::new(tmp);
        fill(&mut writer)?;
        writer
            .flush()
            .with_context(|| format!("flushing {}", tmp_path.display()))?;
        Ok(())
    })();

    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    fs::rename(&tmp_path, path).with_context(|| {
        format!(
            "renaming {} -> {}",
            tmp_path.display(),
            path.display()
        )
    })
}
