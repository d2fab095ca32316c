use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: &'static str,
    pub text: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayConfig {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub intensity: u8,
    pub tasks: &'static [Task],
}

/// Persisted progress of one registered username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub username: String,
    /// Finished day ids in completion order, without duplicates.
    pub completed_days: Vec<u32>,
    pub current_day: u32,
    pub start_date: String,
    pub last_active_date: String,
}

/// The whole persisted state: username to progress record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct UsersStore {
    pub users: BTreeMap<String, UserProgress>,
}

impl UsersStore {
    pub fn get(&self, username: &str) -> Option<&UserProgress> {
        self.users.get(username)
    }

    pub fn contains(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    pub fn upsert(&mut self, user: UserProgress) {
        self.users.insert(user.username.clone(), user);
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum View {
    #[default]
    Login,
    Dashboard,
    DayDetail,
    Completion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Locked,
    Open,
    Completed,
}

/// What the completion prompt offers once every task of the viewed day is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompletionPrompt {
    ReturnToDashboard { already_completed: bool },
    Advance { finishes_program: bool },
}

#[derive(Debug, Deserialize)]
pub struct AuthForm {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct TimelineEntry {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub status: DayStatus,
    pub intensity: u8,
    pub gauge: [bool; 5],
}

#[derive(Debug, Serialize)]
pub struct ProgressSummary {
    pub username: String,
    pub completed_count: usize,
    pub total_days: usize,
    pub percent: u8,
    pub current_day: u32,
    pub finished: bool,
    pub days_since_start: Option<i64>,
    pub timeline: Vec<TimelineEntry>,
}

#[derive(Debug, Serialize)]
pub struct SessionSnapshot {
    pub view: View,
    pub current_user: Option<UserProgress>,
    pub viewing_day_id: u32,
    pub completed_tasks_in_day: Vec<String>,
    pub current_day_config: Option<&'static DayConfig>,
    pub login_error: Option<String>,
    pub is_login_mode: bool,
    pub all_checked: bool,
    pub prompt: Option<CompletionPrompt>,
    pub summary: Option<ProgressSummary>,
}
