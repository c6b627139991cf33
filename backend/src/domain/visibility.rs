//! Announcement visibility rules.
//!
//! Age is counted in whole elapsed days since creation. An announcement with a
//! window of `N` days is visible while its age is at most `N`, so it
//! disappears once `N + 1` full days have passed.

use chrono::{DateTime, Utc};

use crate::domain::models::announcement::Announcement;

const SECONDS_PER_DAY: i64 = 86_400;

/// Whole days elapsed between `created_at` and `now`, rounded down.
/// Negative when `created_at` lies in the future.
pub fn age_days(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - created_at).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// True once a windowed announcement has outlived its window. Permanent
/// announcements never expire.
pub fn is_expired(announcement: &Announcement, now: DateTime<Utc>) -> bool {
    match announcement.visibility_days {
        Some(days) => age_days(announcement.created_at, now) > days,
        None => false,
    }
}

pub fn is_visible(announcement: &Announcement, now: DateTime<Utc>) -> bool {
    announcement.is_active && !is_expired(announcement, now)
}

/// Ids of the announcements that should be deleted at `now`
pub fn sweep_expired(announcements: &[Announcement], now: DateTime<Utc>) -> Vec<i64> {
    let mut expired: Vec<i64> = announcements
        .iter()
        .filter(|a| is_expired(a, now))
        .map(|a| a.id)
        .collect();
    expired.sort_unstable();
    expired.dedup();
    expired
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use shared::AnnouncementType;

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
    }

    fn announcement(id: i64, visibility_days: Option<i64>) -> Announcement {
        Announcement {
            id,
            title: "Notice".to_string(),
            content: "Body".to_string(),
            announcement_type: AnnouncementType::General,
            is_active: true,
            visibility_days,
            created_at: created(),
        }
    }

    #[test]
    fn test_age_days_rounds_down() {
        let t = created();
        assert_eq!(age_days(t, t), 0);
        assert_eq!(age_days(t, t + Duration::hours(23)), 0);
        assert_eq!(age_days(t, t + Duration::days(1)), 1);
        assert_eq!(age_days(t, t + Duration::days(3) - Duration::seconds(1)), 2);
        assert_eq!(age_days(t, t - Duration::seconds(1)), -1);
    }

    #[test]
    fn test_visibility_boundary() {
        let a = announcement(1, Some(3));
        let t = created();

        assert!(is_visible(&a, t + Duration::days(3) - Duration::seconds(1)));
        assert!(is_visible(&a, t + Duration::days(3)));
        assert!(is_visible(&a, t + Duration::days(4) - Duration::seconds(1)));
        assert!(!is_visible(&a, t + Duration::days(4)));
    }

    #[test]
    fn test_zero_day_window_lasts_one_day() {
        let a = announcement(1, Some(0));
        let t = created();

        assert!(is_visible(&a, t + Duration::hours(23)));
        assert!(!is_visible(&a, t + Duration::days(1)));
    }

    #[test]
    fn test_permanent_announcement_never_expires() {
        let a = announcement(1, None);
        let ten_years = created() + Duration::days(3653);

        assert!(is_visible(&a, ten_years));
        assert!(!is_expired(&a, ten_years));
    }

    #[test]
    fn test_inactive_announcement_is_hidden_but_not_expired() {
        let mut a = announcement(1, None);
        a.is_active = false;

        assert!(!is_visible(&a, created()));
        assert!(!is_expired(&a, created()));
    }

    #[test]
    fn test_future_dated_announcement_is_visible() {
        let a = announcement(1, Some(0));
        assert!(is_visible(&a, created() - Duration::days(2)));
    }

    #[test]
    fn test_sweep_selects_only_expired_windowed() {
        let now = created() + Duration::days(5);
        let announcements = vec![
            announcement(1, Some(3)),
            announcement(2, None),
            announcement(3, Some(10)),
            announcement(4, Some(4)),
            announcement(5, Some(0)),
        ];

        assert_eq!(sweep_expired(&announcements, now), vec![1, 4, 5]);
    }

    #[test]
    fn test_sweep_nothing_expired() {
        assert!(sweep_expired(&[announcement(1, None)], created() + Duration::days(10_000)).is_empty());
        assert!(sweep_expired(&[], created()).is_empty());
    }
}
