//! Serializable views of stored records.
//!
//! Each entity exposes a fixed field set through [`AsRecord`]; the JSON API
//! and the pages read from these instead of the raw row types.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

pub mod contact;
pub mod project;
pub mod user;

pub use contact::ContactMessageRecord;
pub use project::ProjectRecord;
pub use user::UserRecord;

pub trait AsRecord {
    type Record: Serialize;

    fn as_record(&self) -> Self::Record;

    fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.as_record())
    }
}

/// RFC 3339 in UTC with microseconds, e.g. `2025-06-01T12:30:00.000123Z`.
#[must_use]
pub fn iso8601(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}
