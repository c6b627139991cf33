use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Timelike, Utc};
use shared::AttendanceStatus;

/// Check-ins after 09:00 site time are late.
pub const DEFAULT_LATE_CUTOFF_MINUTES: u32 = 9 * 60;

#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceRecord {
    pub id: i64,
    pub child_id: String,
    pub status: AttendanceStatus,
    pub check_in_time: Option<DateTime<Utc>>,
    pub check_out_time: Option<DateTime<Utc>>,
    pub brought_by: Option<String>,
    pub taken_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A classified check-in waiting to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewAttendanceRecord {
    pub child_id: String,
    pub status: AttendanceStatus,
    pub check_in_time: DateTime<Utc>,
    pub brought_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Site policy deciding what "late" and "today" mean for attendance.
///
/// Timestamps are stored in UTC; the cutoff and day boundaries are evaluated
/// against the wall clock at the site's fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttendancePolicy {
    late_cutoff_minutes: u32,
    site_offset: FixedOffset,
}

impl Default for AttendancePolicy {
    fn default() -> Self {
        Self {
            late_cutoff_minutes: DEFAULT_LATE_CUTOFF_MINUTES,
            site_offset: Utc.fix(),
        }
    }
}

impl AttendancePolicy {
    pub fn new(late_cutoff_minutes: u32, site_offset: FixedOffset) -> Self {
        Self {
            late_cutoff_minutes,
            site_offset,
        }
    }

    pub fn late_cutoff_minutes(&self) -> u32 {
        self.late_cutoff_minutes
    }

    pub fn site_offset(&self) -> FixedOffset {
        self.site_offset
    }

    /// Classify a check-in. Exactly on the cutoff is still on time; any
    /// second past it is late.
    pub fn classify(&self, check_in_time: DateTime<Utc>) -> AttendanceStatus {
        let local = check_in_time.with_timezone(&self.site_offset);
        let seconds_since_midnight = local.num_seconds_from_midnight();

        if seconds_since_midnight > self.late_cutoff_minutes * 60 {
            AttendanceStatus::Late
        } else {
            AttendanceStatus::Present
        }
    }

    /// Site-local calendar date of a timestamp
    pub fn local_date(&self, timestamp: DateTime<Utc>) -> NaiveDate {
        timestamp.with_timezone(&self.site_offset).date_naive()
    }

    /// UTC half-open range `[start, end)` covering a site-local calendar date
    pub fn day_bounds(&self, date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
        let local_midnight = date.and_time(NaiveTime::default());
        let utc_midnight =
            local_midnight - Duration::seconds(i64::from(self.site_offset.local_minus_utc()));
        let start = Utc.from_utc_datetime(&utc_midnight);
        (start, start + Duration::days(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, h, m, s).unwrap()
    }

    #[test]
    fn test_late_boundary() {
        let policy = AttendancePolicy::default();

        assert_eq!(policy.classify(at(8, 59, 59)), AttendanceStatus::Present);
        assert_eq!(policy.classify(at(9, 0, 0)), AttendanceStatus::Present);
        assert_eq!(policy.classify(at(9, 0, 1)), AttendanceStatus::Late);
        assert_eq!(policy.classify(at(9, 15, 0)), AttendanceStatus::Late);
    }

    #[test]
    fn test_early_morning_and_late_evening() {
        let policy = AttendancePolicy::default();

        assert_eq!(policy.classify(at(0, 0, 0)), AttendanceStatus::Present);
        assert_eq!(policy.classify(at(23, 59, 59)), AttendanceStatus::Late);
    }

    #[test]
    fn test_cutoff_is_evaluated_in_site_time() {
        // UTC-5: 13:30 UTC is 08:30 on site
        let policy = AttendancePolicy::new(540, FixedOffset::west_opt(5 * 3600).unwrap());

        assert_eq!(policy.classify(at(13, 30, 0)), AttendanceStatus::Present);
        assert_eq!(policy.classify(at(14, 0, 1)), AttendanceStatus::Late);
    }

    #[test]
    fn test_custom_cutoff() {
        let policy = AttendancePolicy::new(8 * 60 + 30, FixedOffset::east_opt(0).unwrap());

        assert_eq!(policy.classify(at(8, 30, 0)), AttendanceStatus::Present);
        assert_eq!(policy.classify(at(8, 45, 0)), AttendanceStatus::Late);
    }

    #[test]
    fn test_day_bounds_follow_site_offset() {
        let policy = AttendancePolicy::new(540, FixedOffset::east_opt(2 * 3600).unwrap());
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

        let (start, end) = policy.day_bounds(date);
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 3, 9, 22, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 3, 10, 22, 0, 0).unwrap());

        assert_eq!(policy.local_date(start), date);
        assert_eq!(policy.local_date(end), NaiveDate::from_ymd_opt(2025, 3, 11).unwrap());
    }
}
