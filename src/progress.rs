use crate::models::{DayStatus, UserProgress};
use crate::program::TOTAL_DAYS;
use chrono::{DateTime, SecondsFormat, Utc};

/// ISO-8601 UTC text with millisecond precision, e.g. `2026-01-05T09:30:00.000Z`.
pub fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl UserProgress {
    pub fn new(username: impl Into<String>, now: DateTime<Utc>) -> Self {
        let stamp = timestamp(now);
        Self {
            username: username.into(),
            completed_days: Vec::new(),
            current_day: 1,
            start_date: stamp.clone(),
            last_active_date: stamp,
        }
    }

    pub fn has_completed(&self, day_id: u32) -> bool {
        self.completed_days.contains(&day_id)
    }

    pub fn completed_count(&self) -> usize {
        self.completed_days.len()
    }

    pub fn is_finished(&self) -> bool {
        self.completed_count() >= TOTAL_DAYS as usize
    }

    /// Marks `current_day` done and moves to the next day. Day 10 stays current
    /// once finished; completion is read from the size of `completed_days`.
    pub fn complete_current_day(&mut self, now: DateTime<Utc>) {
        if !self.has_completed(self.current_day) {
            self.completed_days.push(self.current_day);
        }
        if self.current_day < TOTAL_DAYS {
            self.current_day += 1;
        }
        self.last_active_date = timestamp(now);
    }
}

pub fn status_of(day_id: u32, user: &UserProgress) -> DayStatus {
    if user.has_completed(day_id) {
        DayStatus::Completed
    } else if day_id == user.current_day {
        DayStatus::Open
    } else {
        DayStatus::Locked
    }
}
