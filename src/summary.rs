use crate::models::{ProgressSummary, TimelineEntry, UserProgress};
use crate::program::{TOTAL_DAYS, WARMUP_PLAN};
use crate::progress::status_of;
use chrono::{DateTime, Utc};

pub fn build_summary(user: &UserProgress, now: DateTime<Utc>) -> ProgressSummary {
    let completed_count = user.completed_count();
    let total_days = TOTAL_DAYS as usize;
    let percent = (completed_count.min(total_days) * 100 / total_days) as u8;

    let timeline = WARMUP_PLAN
        .iter()
        .map(|day| TimelineEntry {
            id: day.id,
            title: day.title,
            description: day.description,
            status: status_of(day.id, user),
            intensity: day.intensity,
            gauge: day.gauge(),
        })
        .collect();

    ProgressSummary {
        username: user.username.clone(),
        completed_count,
        total_days,
        percent,
        current_day: user.current_day,
        finished: user.is_finished(),
        days_since_start: days_since(&user.start_date, now),
        timeline,
    }
}

/// Whole days elapsed since an ISO-8601 timestamp; `None` when it does not parse.
fn days_since(stamp: &str, now: DateTime<Utc>) -> Option<i64> {
    let start = DateTime::parse_from_rfc3339(stamp).ok()?.with_timezone(&Utc);
    Some((now.date_naive() - start.date_naive()).num_days().max(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DayStatus;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 5, 9, 30, 0).unwrap()
    }

    #[test]
    fn summary_tracks_completion_and_statuses() {
        let mut user = UserProgress::new("dana", now());
        user.completed_days = vec![1, 2, 3];
        user.current_day = 4;

        let summary = build_summary(&user, now() + Duration::days(3));
        assert_eq!(summary.completed_count, 3);
        assert_eq!(summary.total_days, 10);
        assert_eq!(summary.percent, 30);
        assert!(!summary.finished);
        assert_eq!(summary.days_since_start, Some(3));
        assert_eq!(summary.timeline.len(), 10);

        let statuses: Vec<DayStatus> = summary.timeline.iter().map(|entry| entry.status).collect();
        assert_eq!(&statuses[..5], &[
            DayStatus::Completed,
            DayStatus::Completed,
            DayStatus::Completed,
            DayStatus::Open,
            DayStatus::Locked,
        ]);
    }

    #[test]
    fn summary_for_finished_user() {
        let mut user = UserProgress::new("dana", now());
        user.completed_days = (1..=10).collect();
        user.current_day = 10;

        let summary = build_summary(&user, now());
        assert_eq!(summary.percent, 100);
        assert!(summary.finished);
        assert!(summary.timeline.iter().all(|entry| entry.status == DayStatus::Completed));
    }

    #[test]
    fn unparsable_start_date_is_tolerated() {
        let mut user = UserProgress::new("dana", now());
        user.start_date = "yesterday-ish".into();
        assert_eq!(build_summary(&user, now()).days_since_start, None);
    }
}
