// ABOUTME: Column decoding helpers shared by every entity store
// ABOUTME: Ids, timestamps, and dates are stored as TEXT and parsed back into typed values

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! SQL row to typed value helpers
//!
//! Every column read goes through these functions so decode failures carry the
//! column name in the error message.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Date format for `scheduled_date` columns; sorts lexicographically
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Read a required TEXT column
///
/// # Errors
///
/// Returns an error if the column is missing or not text
pub fn get_string(row: &SqliteRow, column: &str) -> AppResult<String> {
    row.try_get(column)
        .map_err(|e| AppError::database(format!("Failed to get column '{column}': {e}")))
}

/// Read a nullable TEXT column
///
/// # Errors
///
/// Returns an error if the column is missing or not text
pub fn get_optional_string(row: &SqliteRow, column: &str) -> AppResult<Option<String>> {
    row.try_get(column)
        .map_err(|e| AppError::database(format!("Failed to get column '{column}': {e}")))
}

/// Read a UUID stored as TEXT
///
/// # Errors
///
/// Returns an error if the column is missing or not a valid UUID
pub fn get_uuid(row: &SqliteRow, column: &str) -> AppResult<Uuid> {
    let raw = get_string(row, column)?;
    Uuid::parse_str(&raw)
        .map_err(|e| AppError::database(format!("Invalid UUID in column '{column}': {e}")))
}

/// Read a nullable UUID stored as TEXT
///
/// # Errors
///
/// Returns an error if the column is missing or holds an invalid UUID
pub fn get_optional_uuid(row: &SqliteRow, column: &str) -> AppResult<Option<Uuid>> {
    get_optional_string(row, column)?
        .map(|raw| {
            Uuid::parse_str(&raw)
                .map_err(|e| AppError::database(format!("Invalid UUID in column '{column}': {e}")))
        })
        .transpose()
}

/// Read an RFC 3339 timestamp
///
/// # Errors
///
/// Returns an error if the column is missing or not a valid timestamp
pub fn get_timestamp(row: &SqliteRow, column: &str) -> AppResult<DateTime<Utc>> {
    let raw = get_string(row, column)?;
    parse_timestamp(&raw, column)
}

/// Read a nullable RFC 3339 timestamp
///
/// # Errors
///
/// Returns an error if the column is missing or holds an invalid timestamp
pub fn get_optional_timestamp(row: &SqliteRow, column: &str) -> AppResult<Option<DateTime<Utc>>> {
    get_optional_string(row, column)?
        .map(|raw| parse_timestamp(&raw, column))
        .transpose()
}

/// Read a `YYYY-MM-DD` date
///
/// # Errors
///
/// Returns an error if the column is missing or not a valid date
pub fn get_date(row: &SqliteRow, column: &str) -> AppResult<NaiveDate> {
    let raw = get_string(row, column)?;
    parse_date(&raw, column)
}

/// Read a nullable `YYYY-MM-DD` date
///
/// # Errors
///
/// Returns an error if the column is missing or holds an invalid date
pub fn get_optional_date(row: &SqliteRow, column: &str) -> AppResult<Option<NaiveDate>> {
    get_optional_string(row, column)?
        .map(|raw| parse_date(&raw, column))
        .transpose()
}

/// Read an INTEGER flag column as a bool
///
/// # Errors
///
/// Returns an error if the column is missing or not an integer
pub fn get_bool(row: &SqliteRow, column: &str) -> AppResult<bool> {
    let value: i64 = row
        .try_get(column)
        .map_err(|e| AppError::database(format!("Failed to get column '{column}': {e}")))?;
    Ok(value == 1)
}

/// Read a non-negative INTEGER column
///
/// # Errors
///
/// Returns an error if the column is missing, negative, or too large
pub fn get_u32(row: &SqliteRow, column: &str) -> AppResult<u32> {
    let value: i64 = row
        .try_get(column)
        .map_err(|e| AppError::database(format!("Failed to get column '{column}': {e}")))?;
    u32::try_from(value)
        .map_err(|e| AppError::database(format!("Out of range value in column '{column}': {e}")))
}

/// Read a nullable non-negative INTEGER column
///
/// # Errors
///
/// Returns an error if the column is missing, negative, or too large
pub fn get_optional_u32(row: &SqliteRow, column: &str) -> AppResult<Option<u32>> {
    let value: Option<i64> = row
        .try_get(column)
        .map_err(|e| AppError::database(format!("Failed to get column '{column}': {e}")))?;
    value
        .map(|v| {
            u32::try_from(v).map_err(|e| {
                AppError::database(format!("Out of range value in column '{column}': {e}"))
            })
        })
        .transpose()
}

/// Format a date for storage
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Convert a bool to the stored INTEGER flag
#[must_use]
pub const fn flag(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

fn parse_timestamp(raw: &str, column: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("Invalid timestamp in column '{column}': {e}")))
}

fn parse_date(raw: &str, column: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| AppError::database(format!("Invalid date in column '{column}': {e}")))
}
