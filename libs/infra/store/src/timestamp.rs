// [libs/infra/store/src/timestamp.rs]
use chrono::{DateTime, Utc};

use crate::errors::StoreError;

pub fn parse(raw: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::MappingError(e.to_string()))
}
