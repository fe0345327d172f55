//! Backend error classification shared by the storage engines.

use mongodb::error::{ErrorKind, WriteFailure};

/// MongoDB server code for a unique index violation.
const MONGO_DUPLICATE_KEY: i32 = 11000;

/// Whether a sqlx error is a unique violation on the redirect key.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    db_err.is_unique_violation()
}

/// Whether a MongoDB error is a duplicate key write error.
pub fn is_duplicate_key(e: &mongodb::error::Error) -> bool {
    matches!(
        e.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == MONGO_DUPLICATE_KEY
    )
}
