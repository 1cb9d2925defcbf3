// ABOUTME: Exercise catalog persisted as a single-column CSV under the reference directory
// ABOUTME: Lists names alphabetically and adds new names with case-insensitive duplicate detection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

use std::cmp::Ordering;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::info;

use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::EXERCISE_COLUMN;

/// Exercise names known to the coach
pub struct ExerciseCatalog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ExerciseCatalog {
    /// Catalog stored at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All exercise names, alphabetical. A missing file lists as empty.
    ///
    /// # Errors
    ///
    /// `StorageError` when the file cannot be read, `InvalidFormat` when it is not a catalog
    pub async fn list(&self) -> AppResult<Vec<String>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(AppError::storage(format!(
                    "Cannot read {}: {e}",
                    self.path.display()
                )))
            }
        };
        let mut names = parse_catalog(&content)?;
        sort_names(&mut names);
        Ok(names)
    }

    /// Add an exercise and persist the catalog sorted
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an empty name, `ResourceAlreadyExists` when the name
    /// is already present in any letter case, `StorageError` on write failure
    pub async fn add(&self, name: &str) -> AppResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::invalid_input("Exercise name cannot be empty."));
        }

        let _guard = self.write_lock.lock().await;
        let mut names = self.list().await?;
        let wanted = name.to_lowercase();
        if names.iter().any(|n| n.to_lowercase() == wanted) {
            return Err(AppError::already_exists(format!(
                "Exercise '{name}' already exists."
            )));
        }

        names.push(name.to_owned());
        sort_names(&mut names);
        let content = render_catalog(&names)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::storage(format!("Cannot create {}: {e}", parent.display()))
            })?;
        }
        fs::write(&self.path, content).await.map_err(|e| {
            AppError::storage(format!("Cannot write {}: {e}", self.path.display()))
        })?;

        info!(exercise = %name, total = names.len(), "exercise added to catalog");
        Ok(name.to_owned())
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn sort_names(names: &mut [String]) {
    names.sort_by(|a, b| compare_names(a, b));
}

fn parse_catalog(content: &str) -> AppResult<Vec<String>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());
    let headers = reader
        .headers()
        .map_err(|e| AppError::new(ErrorCode::InvalidFormat, e.to_string()))?;
    let column = headers
        .iter()
        .position(|h| h.trim() == EXERCISE_COLUMN)
        .ok_or_else(|| {
            AppError::new(
                ErrorCode::InvalidFormat,
                format!("Exercise catalog has no '{EXERCISE_COLUMN}' column"),
            )
        })?;

    let mut names = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| AppError::new(ErrorCode::InvalidFormat, e.to_string()))?;
        if let Some(name) = record.get(column).map(str::trim).filter(|n| !n.is_empty()) {
            names.push(name.to_owned());
        }
    }
    Ok(names)
}

fn render_catalog(names: &[String]) -> AppResult<Vec<u8>> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    let write_err = |e: csv::Error| AppError::internal(format!("Cannot encode catalog: {e}"));
    writer.write_record([EXERCISE_COLUMN]).map_err(write_err)?;
    for name in names {
        writer.write_record([name.as_str()]).map_err(write_err)?;
    }
    writer
        .into_inner()
        .map_err(|e| AppError::internal(format!("Cannot encode catalog: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_case_insensitively_with_raw_tiebreak() {
        let mut names = vec![
            "squat".to_owned(),
            "Bench Press".to_owned(),
            "Squat".to_owned(),
            "barbell row".to_owned(),
        ];
        sort_names(&mut names);
        assert_eq!(names, ["barbell row", "Bench Press", "Squat", "squat"]);
    }

    #[test]
    fn parses_names_with_commas_and_skips_blanks() {
        let names = parse_catalog("Exercise\n\"Curl, hammer\"\n\nDeadlift\n").unwrap();
        assert_eq!(names, ["Curl, hammer", "Deadlift"]);
    }

    #[test]
    fn rendered_catalog_reads_back() {
        let names = vec!["Curl, hammer".to_owned(), "Dip".to_owned()];
        let bytes = render_catalog(&names).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("Exercise\n"));
        assert_eq!(parse_catalog(&text).unwrap(), names);
    }

    #[test]
    fn catalog_without_header_is_invalid() {
        let err = parse_catalog("Name\nSquat\n").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
    }
}
