use anyhow::{Context, Result};
use std::{
    fs::{self, File},
    io::Write,
    path::Path,
};
use tracing::debug;

use crate::fsutil::replace_file;

/// Create or truncate `path` and write `text` verbatim (no trailing newline).
#[tracing::instrument(level = "debug", skip(path, text), fields(path = %path.as_ref().display(), len = text.len()))]
pub fn write_text_to_file<P: AsRef<Path>>(path: P, text: &str) -> Result<()> {
    let path = path.as_ref();
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    file.write_all(text.as_bytes())
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Insert a lowercase `t` right after the first `a` or `A`.
/// Returns `None` if `text` has neither.
pub fn insert_t_after_first_a(text: &str) -> Option<String> {
    let idx = text.find(|c: char| c == 'a' || c == 'A')?;
    let mut out = String::with_capacity(text.len() + 1);
    out.push_str(&text[..=idx]);
    out.push('t');
    out.push_str(&text[idx + 1..]);
    Some(out)
}

/// Rewrite `path` with a `t` inserted after its first `a`/`A`.
/// A file without any `a` is not touched.
#[tracing::instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
pub fn write_t_after_first_a<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;

    let Some(updated) = insert_t_after_first_a(&content) else {
        debug!("no 'a' found; leaving file as is");
        return Ok(());
    };

    replace_file(path, |w| {
        w.write_all(updated.as_bytes())
            .with_context(|| format!("writing {}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::init_test_logging;
    use std::io;
    use tempfile::tempdir;

    fn mutate_fresh_file(text: &str) -> Result<String> {
        let dir = tempdir()?;
        let path = dir.path().join("mutate.txt");
        fs::write(&path, text)?;
        write_t_after_first_a(&path)?;
        Ok(fs::read_to_string(&path)?)
    }

    #[test]
    fn written_text_reads_back_exactly() -> Result<()> {
        init_test_logging();
        let dir = tempdir()?;
        for (name, text) in [
            ("a.txt", "The wheels on the bus go round and round"),
            (
                "b.txt",
                "The Antikythera mechanism is believed to be the earliest known mechanical analog computer",
            ),
            ("c.txt", "None"),
            ("d.txt", ""),
        ] {
            let path = dir.path().join(name);
            write_text_to_file(&path, text)?;
            assert_eq!(fs::read_to_string(&path)?, text);
        }
        Ok(())
    }

    #[test]
    fn write_truncates_and_is_idempotent() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("out.txt");
        fs::write(&path, "a much longer piece of existing text")?;

        write_text_to_file(&path, "short")?;
        write_text_to_file(&path, "short")?;

        assert_eq!(fs::read_to_string(&path)?, "short");
        Ok(())
    }

    #[test]
    fn t_goes_after_first_a() -> Result<()> {
        init_test_logging();
        assert_eq!(mutate_fresh_file("Apple")?, "Atpple");
        assert_eq!(mutate_fresh_file("Congraulations")?, "Congratulations");
        assert_eq!(mutate_fresh_file("banana")?, "batnana");
        Ok(())
    }

    #[test]
    fn no_a_leaves_text_unchanged() -> Result<()> {
        assert_eq!(mutate_fresh_file("None")?, "None");
        assert_eq!(mutate_fresh_file("")?, "");
        assert_eq!(insert_t_after_first_a("xyz"), None);
        Ok(())
    }

    #[test]
    fn multibyte_text_before_the_a() {
        assert_eq!(
            insert_t_after_first_a("ünïcödé bar").as_deref(),
            Some("ünïcödé batr")
        );
    }

    #[test]
    fn mutating_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let err = write_t_after_first_a(dir.path().join("missing.txt")).unwrap_err();
        let io_err = err.downcast_ref::<io::Error>().expect("io error");
        assert_eq!(io_err.kind(), io::ErrorKind::NotFound);
    }
}
