use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::prelude::{FromRow, Type};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, Default)]
#[sqlx(type_name = "job_action", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    #[default]
    Applied,
    Ignored,
}

/// One ledger row: a user's disposition toward a single job. At most one row
/// per (user_id, job_id), enforced by the unique index.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserActionEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_id: Uuid,
    pub action: ActionKind,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AppliedCounts {
    pub applied_today: i64,
    pub applied_last_week: i64,
    pub applied_last_month: i64,
}

/// Bucket boundaries relative to a calendar day, cut at midnight. The three
/// windows partition [today - 30d, tomorrow): today, the 7 days before it,
/// and the 23 days before those. "Last month" is days 8-30, not a rolling 30.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketWindows {
    pub today_start: NaiveDateTime,
    pub week_start: NaiveDateTime,
    pub month_start: NaiveDateTime,
}

impl BucketWindows {
    pub fn at(today: NaiveDate) -> Self {
        let today_start = today.and_time(NaiveTime::MIN);
        BucketWindows {
            today_start,
            week_start: today_start - Duration::days(7),
            month_start: today_start - Duration::days(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn windows() -> BucketWindows {
        BucketWindows::at(NaiveDate::from_ymd_opt(2025, 7, 15).unwrap())
    }

    #[test]
    fn windows_are_cut_at_midnight() {
        let w = windows();
        assert_eq!(
            w.today_start,
            NaiveDate::from_ymd_opt(2025, 7, 15)
                .unwrap()
                .and_time(NaiveTime::MIN)
        );
    }

    #[test]
    fn week_window_is_seven_days_ending_at_today_start() {
        let w = windows();
        assert_eq!(w.today_start - w.week_start, Duration::days(7));
    }

    #[test]
    fn month_window_is_the_23_days_before_the_week_window() {
        let w = windows();
        assert_eq!(w.week_start - w.month_start, Duration::days(23));
        assert_eq!(w.today_start - w.month_start, Duration::days(30));
    }

    #[test]
    fn windows_share_boundaries_so_buckets_cannot_overlap() {
        // An action timestamped exactly at week_start falls in the week
        // bucket (ts >= week_start AND ts < today_start) and nowhere else.
        let w = windows();
        let at_week_start = w.week_start;
        assert!(at_week_start >= w.week_start && at_week_start < w.today_start);
        assert!(!(at_week_start >= w.today_start));
        assert!(!(at_week_start >= w.month_start && at_week_start < w.week_start));
    }

    #[test]
    fn action_kind_uses_lowercase_wire_names() {
        assert_eq!(
            serde_json::to_string(&ActionKind::Applied).unwrap(),
            "\"applied\""
        );
        assert_eq!(
            serde_json::from_str::<ActionKind>("\"ignored\"").unwrap(),
            ActionKind::Ignored
        );
        assert_eq!(ActionKind::default(), ActionKind::Applied);
    }
}
