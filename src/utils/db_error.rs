//! Classification of PostgreSQL constraint violations.

/// Returns true if `e` is a unique-constraint violation.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

/// Returns true if `e` is a CHECK-constraint violation.
pub fn is_check_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db_err| db_err.is_check_violation())
}
