// ABOUTME: CSV reader for workout records, extracting exercise, reps and weight per row
// ABOUTME: Missing or malformed numeric cells coerce to zero; other columns are ignored
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

use csv::{ReaderBuilder, StringRecord};

use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{WorkoutRow, ACTUAL_REPS_COLUMN, ACTUAL_WEIGHT_COLUMN, EXERCISE_COLUMN};

/// Column positions of the interpreted fields
struct ColumnIndex {
    exercise: usize,
    reps: Option<usize>,
    weight: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> AppResult<Self> {
        let position = |name: &str| headers.iter().position(|h| h.trim() == name);
        let exercise = position(EXERCISE_COLUMN).ok_or_else(|| {
            AppError::new(ErrorCode::InvalidFormat, format!("Missing '{EXERCISE_COLUMN}' column"))
        })?;
        Ok(Self {
            exercise,
            reps: position(ACTUAL_REPS_COLUMN),
            weight: position(ACTUAL_WEIGHT_COLUMN),
        })
    }
}

/// Parse workout CSV content into rows.
///
/// Rows with a blank exercise cell are dropped. Short rows are tolerated;
/// absent cells count as missing numbers.
///
/// # Errors
///
/// `InvalidFormat` when the header has no `Exercise` column or the CSV is malformed
pub fn parse_workout_rows(content: &str) -> AppResult<Vec<WorkoutRow>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(ErrorCode::InvalidFormat, e.to_string()))?
        .clone();
    let columns = ColumnIndex::from_headers(&headers)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| AppError::new(ErrorCode::InvalidFormat, e.to_string()))?;
        let Some(exercise) = record.get(columns.exercise).filter(|e| !e.trim().is_empty()) else {
            continue;
        };
        rows.push(WorkoutRow::from_cells(
            exercise,
            columns.reps.and_then(|i| record.get(i)),
            columns.weight.and_then(|i| record.get(i)),
        ));
    }
    Ok(rows)
}
