//! Output path resolution
//! Turns a filename template into a concrete write location under the output
//! root, scanning the destination for the next free numeric counter.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::error::{Result, SaverError};
use crate::template;

/// A resolved output location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Absolute directory the file will be written into.
    pub directory: PathBuf,
    /// Basename portion of the expanded template.
    pub prefix: String,
    /// Next free numeric suffix for `prefix` inside `directory`.
    pub counter: u32,
    /// Directory portion of the expanded template, relative to the output root.
    pub subfolder: String,
    /// The fully expanded template.
    pub expanded: String,
}

/// Resolve `template` to a write location under `output_root`.
///
/// Expands the template, splits it into subfolder and prefix, verifies the
/// candidate directory stays inside `output_root` and scans it for the next
/// free counter. A missing directory is created with all parents and starts
/// the sequence at 1. Nothing is created when the containment check fails.
pub fn resolve(
    template: &str,
    output_root: &Path,
    width: u32,
    height: u32,
    seed: u64,
) -> Result<ResolvedPath> {
    let expanded = template::expand(template, width, height, seed);

    let expanded_path = Path::new(&expanded);
    let prefix = expanded_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let subfolder = expanded_path
        .parent()
        .map(|dir| dir.to_string_lossy().into_owned())
        .unwrap_or_default();

    let root = normalize(&absolutize(output_root)?);
    let directory = normalize(&root.join(&subfolder));

    if !directory.starts_with(&root) {
        return Err(SaverError::PathEscape {
            root,
            candidate: directory,
        });
    }

    let counter = next_counter(&directory, &prefix)?;

    Ok(ResolvedPath {
        directory,
        prefix,
        counter,
        subfolder,
        expanded,
    })
}

/// Highest `<prefix>_<number>` suffix among the directory entries, plus one.
///
/// Matching is case-insensitive. The number is the segment between the first
/// underscore after the prefix and the following underscore; a segment that
/// does not parse counts as 0. A missing directory is created and starts the
/// sequence at 1.
fn next_counter(directory: &Path, prefix: &str) -> Result<u32> {
    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            fs::create_dir_all(directory)?;
            return Ok(1);
        }
        Err(err) => return Err(err.into()),
    };

    let needle = format!("{}_", prefix.to_lowercase());
    let mut max_seen: Option<u32> = None;
    for entry in entries {
        let name = entry?.file_name().to_string_lossy().to_lowercase();
        let tail = match name.strip_prefix(&needle) {
            Some(tail) => tail,
            None => continue,
        };
        let number = tail
            .split('_')
            .next()
            .and_then(|segment| segment.parse::<u32>().ok())
            .unwrap_or(0);
        max_seen = Some(max_seen.map_or(number, |seen| seen.max(number)));
    }

    Ok(max_seen.map_or(1, |seen| seen + 1))
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Lexically normalize a path: `.` components are dropped, `..` pops the
/// previous component without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => normalized.push(prefix.as_os_str()),
            Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Normal(part) => normalized.push(part),
        }
    }
    normalized
}
