// ABOUTME: Athlete contact directory read from the reference emails CSV
// ABOUTME: Resolves an athlete name to the address that receives completion notifications
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

use std::io::ErrorKind;
use std::path::PathBuf;

use csv::ReaderBuilder;
use tokio::fs;
use tracing::warn;

use crate::errors::{AppError, AppResult};

/// Name to email lookup over `name,email` rows
pub struct AthleteDirectory {
    path: PathBuf,
}

impl AthleteDirectory {
    /// Directory backed by the CSV at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Address of `athlete`, first case-insensitive match wins.
    ///
    /// The file is re-read on every call. A missing file has no addresses.
    ///
    /// # Errors
    ///
    /// `StorageError` when the file exists but cannot be read
    pub async fn email_for(&self, athlete: &str) -> AppResult<Option<String>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::storage(format!(
                    "Cannot read {}: {e}",
                    self.path.display()
                )))
            }
        };
        Ok(find_email(&content, athlete))
    }
}

fn find_email(content: &str, athlete: &str) -> Option<String> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let wanted = athlete.trim().to_lowercase();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "skipping malformed contact row");
                continue;
            }
        };
        let (Some(name), Some(email)) = (record.get(0), record.get(1)) else {
            continue;
        };
        if name.trim().to_lowercase() == wanted {
            let email = email.trim();
            if !email.is_empty() {
                return Some(email.to_owned());
            }
        }
    }
    None
}
