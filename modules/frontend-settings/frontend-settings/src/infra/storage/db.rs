use sea_orm::{DbErr, SqlErr};

use crate::domain::error::DomainError;

pub const DUPLICATE_KEY: &str = "duplicate key value violates unique constraint";
pub const NULL_VALUE: &str = "null value in column";

/// Largest number of bind parameters one statement may carry.
pub const MAX_BIND_PARAMS: usize = 32_000;

#[allow(clippy::needless_pass_by_value)] // used as `.map_err(db_err)`
pub fn db_err(e: DbErr) -> DomainError {
    DomainError::from(e)
}

/// Translates write failures: unique violations become `duplicate`,
/// missing required values a generic conflict, the rest a database error.
pub fn write_err(e: DbErr, duplicate: &str) -> DomainError {
    if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        return DomainError::conflict(duplicate);
    }
    let text = e.to_string();
    if text.contains("NOT NULL constraint failed") || text.contains(NULL_VALUE) {
        return DomainError::conflict(NULL_VALUE);
    }
    DomainError::from(e)
}

/// Rows per multi-row insert for a table with `columns` columns.
#[must_use]
pub fn rows_per_insert(columns: usize) -> usize {
    (MAX_BIND_PARAMS / columns.max(1)).max(1)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn not_null_failures_are_conflicts() {
        let e = write_err(
            DbErr::Custom("NOT NULL constraint failed: color_range.name".to_owned()),
            DUPLICATE_KEY,
        );
        assert!(matches!(e, DomainError::Conflict { ref message } if message == NULL_VALUE));
    }

    #[test]
    fn other_failures_stay_database_errors() {
        let e = write_err(DbErr::Custom("connection reset".to_owned()), DUPLICATE_KEY);
        assert!(matches!(e, DomainError::Database(_)));
    }

    #[test]
    fn insert_batches_respect_bind_limit() {
        assert_eq!(rows_per_insert(2), 16_000);
        assert_eq!(rows_per_insert(7), 4_571);
        assert_eq!(rows_per_insert(0), MAX_BIND_PARAMS);
    }
}
