use chrono::{DateTime, Utc};

/// Minimal child reference needed by attendance: existence checks and the
/// roster used to derive absences. Profile fields live elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct Child {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

