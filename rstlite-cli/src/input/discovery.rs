//! Input discovery
//!
//! The `--in` argument is interpreted in this order: `-` is standard input,
//! a directory is searched recursively for text files, a file whose
//! non-empty lines all name existing paths is a list of inputs, any other
//! file is a single text, and anything else is a glob pattern.

use super::file_reader::FileReader;
use crate::error::CliError;
use anyhow::{Context, Result};
use glob::{glob, Pattern};
use std::path::{Path, PathBuf};

/// Extensions picked up when walking a directory
pub const TEXT_EXTENSIONS: [&str; 2] = ["txt", "md"];

/// One text to analyze
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDoc {
    /// Short display name
    pub name: String,
    /// Source file, `None` for stdin
    pub path: Option<PathBuf>,
    /// Raw content
    pub text: String,
}

impl InputDoc {
    fn from_file(path: &Path, text: String) -> Self {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            name,
            path: Some(path.to_path_buf()),
            text,
        }
    }

    fn stdin(text: String) -> Self {
        Self {
            name: "stdin".to_string(),
            path: None,
            text,
        }
    }
}

/// Resolve `input` to the texts it names, in a stable order
pub fn discover(input: &str) -> Result<Vec<InputDoc>> {
    if input == "-" {
        return Ok(vec![InputDoc::stdin(FileReader::read_stdin()?)]);
    }

    let path = Path::new(input);
    let paths = if path.is_dir() {
        walk_dir(path)?
    } else if path.is_file() {
        let text = FileReader::read_text(path)?;
        match list_entries(&text) {
            Some(listed) => {
                log::info!("{} is a list of {} inputs", path.display(), listed.len());
                expand_all(&listed)?
            }
            None => return Ok(vec![InputDoc::from_file(path, text)]),
        }
    } else {
        resolve_patterns(&[input.to_string()])?
    };

    read_all(&paths)
}

/// Paths named by a list file, if `content` is one
///
/// A list file has more than one non-empty line and every such line is an
/// existing path.
fn list_entries(content: &str) -> Option<Vec<PathBuf>> {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if lines.len() < 2 || !lines.iter().all(|line| Path::new(line).exists()) {
        return None;
    }
    Some(lines.into_iter().map(PathBuf::from).collect())
}

fn expand_all(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            files.extend(walk_dir(path)?);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

/// Text files under `dir`, recursively, sorted
pub fn walk_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let root = Pattern::escape(&dir.to_string_lossy());
    let patterns: Vec<String> = TEXT_EXTENSIONS
        .iter()
        .map(|ext| format!("{root}/**/*.{ext}"))
        .collect();

    resolve_patterns(&patterns).map_err(|_| {
        CliError::InputNotFound(format!("no .txt or .md files under {}", dir.display())).into()
    })
}

/// Resolve file patterns to actual file paths
pub fn resolve_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        let paths = glob(pattern).map_err(|_| CliError::InvalidPattern(pattern.clone()))?;
        for path_result in paths {
            let path =
                path_result.with_context(|| format!("Error resolving pattern: {pattern}"))?;
            if path.is_file() {
                files.push(path);
            }
        }
    }

    if files.is_empty() {
        return Err(CliError::InputNotFound(patterns.join(", ")).into());
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn read_all(paths: &[PathBuf]) -> Result<Vec<InputDoc>> {
    paths
        .iter()
        .map(|path| Ok(InputDoc::from_file(path, FileReader::read_text(path)?)))
        .collect()
}
