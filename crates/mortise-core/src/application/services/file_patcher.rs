//! Patch-mode writes: insert text after marker lines of an existing file.
//!
//! ## Algorithm
//!
//! 1. Fail with `DirectoryNotFound` / `FileNotFound` before touching anything.
//! 2. Stream the file line by line, terminators preserved. For each line,
//!    every rule is checked in order; each rule whose marker occurs in the
//!    line appends its insertion right after the (unchanged) line.
//! 3. When the whole source has been consumed, write the result to a temp
//!    file next to the original, delete the original and rename the temp
//!    file over it.
//!
//! A rule that matches no line is a no-op reported through `warn!` and
//! [`PatchOutcome::unmatched`]. If no rule matches at all the file is left
//! byte-identical and no temp file is written.

use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        ports::{FileSystem, PatchOutcome, Patcher},
    },
    domain::MarkerRule,
    error::MortiseResult,
};

/// Substring-matching [`Patcher`].
#[derive(Clone)]
pub struct MarkerPatcher {
    fs: Arc<dyn FileSystem>,
}

impl MarkerPatcher {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    fn check_target(&self, path: &Path) -> MortiseResult<()> {
        if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !self.fs.exists(dir) {
                return Err(ApplicationError::DirectoryNotFound {
                    path: dir.to_path_buf(),
                }
                .into());
            }
        }
        if !self.fs.exists(path) {
            return Err(ApplicationError::FileNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        Ok(())
    }

    /// Swap `content` in for `path` via a sibling temp file.
    fn replace(&self, path: &Path, content: &str) -> MortiseResult<()> {
        let temp = temp_path(path);
        self.fs.create_atomic(&temp, content)?;
        self.fs.remove_file(path)?;
        self.fs.rename(&temp, path)
    }
}

impl Patcher for MarkerPatcher {
    #[instrument(skip(self, rules), fields(path = %path.display(), rules = rules.len()))]
    fn patch(&self, path: &Path, rules: &[MarkerRule]) -> MortiseResult<PatchOutcome> {
        self.check_target(path)?;

        let reader = self.fs.open_read(path)?;
        let (output, hits) = apply_rules(reader, rules)
            .map_err(|e| ApplicationError::filesystem(path, e))?;

        let unmatched: Vec<String> = rules
            .iter()
            .zip(&hits)
            .filter(|(_, count)| **count == 0)
            .map(|(rule, _)| rule.marker().to_string())
            .collect();
        for marker in &unmatched {
            warn!(marker = %marker, "Marker not found; nothing inserted for this rule");
        }

        let inserted = hits.iter().sum();
        if inserted > 0 {
            self.replace(path, &output)?;
            info!(inserted, "Patched file");
        }

        Ok(PatchOutcome {
            path: path.to_path_buf(),
            inserted,
            unmatched,
        })
    }
}

impl std::fmt::Debug for MarkerPatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkerPatcher").finish_non_exhaustive()
    }
}

/// Stream `reader` through `rules`. Returns the new content and the number
/// of lines each rule fired on.
fn apply_rules(
    mut reader: Box<dyn BufRead + Send>,
    rules: &[MarkerRule],
) -> std::io::Result<(String, Vec<usize>)> {
    let mut output = String::new();
    let mut hits = vec![0usize; rules.len()];
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }

        let (content, terminator) = split_terminator(&line);
        output.push_str(&line);

        for (rule, count) in rules.iter().zip(hits.iter_mut()) {
            if !rule.matches(content) {
                continue;
            }
            *count += 1;
            let insertion = rule.insertion_for(content);
            if terminator.is_empty() {
                // Marker on a final line without newline.
                output.push('\n');
                output.push_str(&insertion);
            } else {
                output.push_str(&insertion);
                output.push_str(terminator);
            }
        }
    }

    Ok((output, hits))
}

fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(content) = line.strip_suffix("\r\n") {
        (content, "\r\n")
    } else if let Some(content) = line.strip_suffix('\n') {
        (content, "\n")
    } else {
        (line, "")
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.{}.tmp", Uuid::new_v4().simple()))
}
