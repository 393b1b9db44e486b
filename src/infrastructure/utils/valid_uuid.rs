use uuid::Uuid;

use crate::errors::AppError;

/// Parses a project id from a path segment.
///
/// A malformed id is reported like any other store failure: callers cannot
/// tell it apart from a missing row.
pub fn valid_uuid(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id.trim())
        .map_err(|_| AppError::StoreError(format!("Invalid project id: {}", id)))
}
