pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod queries;
pub mod stats;
pub mod store;

use crate::errors::AppError;
use rusqlite::ErrorCode;

/// Map SQLite failures to application errors: a busy or locked database is
/// a transient condition the caller may retry.
pub fn classify(e: rusqlite::Error) -> AppError {
    if let rusqlite::Error::SqliteFailure(err, _) = &e
        && matches!(
            err.code,
            ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked
        )
    {
        return AppError::TransientFetch(e.to_string());
    }
    AppError::Db(e)
}

/// Re-map database errors already wrapped in `AppError::Db`.
pub fn reclassify(err: AppError) -> AppError {
    match err {
        AppError::Db(e) => classify(e),
        other => other,
    }
}
