use chrono::{SecondsFormat, Utc};

/// RFC3339 UTC stamp recorded inside a report.
pub fn generated_at() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Compact stamp used in artifact file names.
pub fn artifact_stamp() -> String {
    Utc::now().format("%Y%m%d_%H%M%S").to_string()
}
