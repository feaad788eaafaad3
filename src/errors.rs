//! Unified application error type.
//! All modules (db, core, cli, export) return AppError so error handling
//! stays consistent across the crate.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid goal type: {0}")]
    InvalidGoalType(String),

    #[error("Invalid exam goal status: {0}")]
    InvalidStatus(String),

    // ---------------------------
    // Validation errors
    // ---------------------------
    #[error("Subject must not be empty")]
    EmptySubject,

    #[error("Minutes must be a positive integer, got {0}")]
    InvalidMinutes(i64),

    #[error("Target minutes must be a positive integer, got {0}")]
    InvalidTarget(i64),

    #[error("Target score must be a positive integer, got {0}")]
    InvalidScore(i64),

    // ---------------------------
    // Timer errors
    // ---------------------------
    #[error("Timer error: {0}")]
    Timer(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
