use anyhow::{Context, Result};
use std::{fs, path::Path};
use tracing::debug;

/// Count whitespace-separated tokens equal to `word`, ignoring case.
/// Punctuation stays attached to its token, so `"round."` does not match `"round"`.
pub fn count_word(text: &str, word: &str) -> usize {
    let needle = word.to_lowercase();
    text.split_whitespace()
        .filter(|token| token.to_lowercase() == needle)
        .count()
}

/// Read `path` and count the occurrences of `word` in it (see [`count_word`]).
#[tracing::instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
pub fn count_instances_of_word_in_file<P: AsRef<Path>>(path: P, word: &str) -> Result<usize> {
    let content = fs::read_to_string(&path)
        .with_context(|| format!("reading {}", path.as_ref().display()))?;
    let count = count_word(&content, word);
    debug!(count, "counted word");
    Ok(count)
}
