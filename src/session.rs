//! View-state controller.
//!
//! [`Session`] holds everything that is not persisted: which view is shown,
//! who is logged in, which day is being viewed and which of its tasks are
//! checked. [`Session::apply`] is the only way it changes: it consumes one
//! user intent, may read or write the in-memory [`UsersStore`], and reports
//! whether the store must be saved.

use crate::auth;
use crate::models::{CompletionPrompt, DayConfig, DayStatus, SessionSnapshot, UsersStore, UserProgress, View};
use crate::program;
use crate::progress::status_of;
use crate::summary::build_summary;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::BTreeSet;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    SubmitAuth { name: String },
    ToggleAuthMode,
    ToggleTask { id: String },
    SelectDay { id: u32 },
    CompleteDay,
    ReturnToDashboard,
    Logout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub view: View,
    pub current_user: Option<UserProgress>,
    pub viewing_day_id: u32,
    pub completed_tasks_in_day: BTreeSet<String>,
    pub is_login_mode: bool,
    pub login_error: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            view: View::Login,
            current_user: None,
            viewing_day_id: 1,
            completed_tasks_in_day: BTreeSet::new(),
            is_login_mode: false,
            login_error: None,
        }
    }
}

/// Result of applying one intent.
#[derive(Debug)]
pub struct Transition {
    pub session: Session,
    /// The store was modified and has to be written back.
    pub store_changed: bool,
}

impl Transition {
    fn unchanged(session: Session) -> Self {
        Self {
            session,
            store_changed: false,
        }
    }

    fn persisted(session: Session) -> Self {
        Self {
            session,
            store_changed: true,
        }
    }
}

impl Session {
    pub fn apply(self, intent: Intent, store: &mut UsersStore, now: DateTime<Utc>) -> Transition {
        match intent {
            Intent::SubmitAuth { name } => self.submit_auth(&name, store, now),
            Intent::ToggleAuthMode => Transition::unchanged(self.toggle_auth_mode()),
            Intent::ToggleTask { id } => Transition::unchanged(self.toggle_task(&id)),
            Intent::SelectDay { id } => Transition::unchanged(self.select_day(id)),
            Intent::CompleteDay => self.complete_day(store, now),
            Intent::ReturnToDashboard => Transition::unchanged(self.return_to_dashboard()),
            Intent::Logout => Transition::unchanged(self.logout()),
        }
    }

    pub fn viewing_day(&self) -> Option<&'static DayConfig> {
        program::day(self.viewing_day_id)
    }

    /// True when every task of the viewed day is checked.
    pub fn all_checked(&self) -> bool {
        self.viewing_day()
            .is_some_and(|day| day.task_ids().all(|id| self.completed_tasks_in_day.contains(id)))
    }

    pub fn completion_prompt(&self) -> Option<CompletionPrompt> {
        if self.view != View::DayDetail || !self.all_checked() {
            return None;
        }
        let user = self.current_user.as_ref()?;

        let is_history = self.viewing_day_id < user.current_day;
        let already_completed = user.has_completed(self.viewing_day_id);
        if is_history || already_completed {
            Some(CompletionPrompt::ReturnToDashboard { already_completed })
        } else {
            Some(CompletionPrompt::Advance {
                finishes_program: self.viewing_day_id == program::TOTAL_DAYS,
            })
        }
    }

    pub fn snapshot(&self, now: DateTime<Utc>) -> SessionSnapshot {
        SessionSnapshot {
            view: self.view,
            current_user: self.current_user.clone(),
            viewing_day_id: self.viewing_day_id,
            completed_tasks_in_day: self.completed_tasks_in_day.iter().cloned().collect(),
            current_day_config: self.viewing_day(),
            login_error: self.login_error.clone(),
            is_login_mode: self.is_login_mode,
            all_checked: self.all_checked(),
            prompt: self.completion_prompt(),
            summary: self.current_user.as_ref().map(|user| build_summary(user, now)),
        }
    }

    fn submit_auth(mut self, name: &str, store: &mut UsersStore, now: DateTime<Utc>) -> Transition {
        let name = name.trim();
        if self.view != View::Login || name.is_empty() {
            return Transition::unchanged(self);
        }

        let (result, store_changed) = if self.is_login_mode {
            (auth::login(store, name), false)
        } else {
            let result = auth::register(store, name, now);
            let created = result.is_ok();
            (result, created)
        };

        match result {
            Ok(user) => {
                self.view = if user.is_finished() {
                    View::Completion
                } else {
                    View::Dashboard
                };
                self.current_user = Some(user);
                self.login_error = None;
                self.completed_tasks_in_day.clear();
            }
            Err(err) => {
                self.login_error = Some(err.to_string());
            }
        }

        Transition {
            session: self,
            store_changed,
        }
    }

    fn toggle_auth_mode(mut self) -> Self {
        if self.view == View::Login {
            self.is_login_mode = !self.is_login_mode;
            self.login_error = None;
        }
        self
    }

    fn select_day(mut self, day_id: u32) -> Self {
        if self.view != View::Dashboard {
            return self;
        }
        let (Some(user), Some(day)) = (self.current_user.as_ref(), program::day(day_id)) else {
            return self;
        };

        match status_of(day.id, user) {
            DayStatus::Locked => return self,
            DayStatus::Completed => {
                self.completed_tasks_in_day = day.task_ids().map(str::to_owned).collect();
            }
            DayStatus::Open => self.completed_tasks_in_day.clear(),
        }
        self.viewing_day_id = day.id;
        self.view = View::DayDetail;
        self
    }

    fn toggle_task(mut self, task_id: &str) -> Self {
        if self.view != View::DayDetail {
            return self;
        }
        if !self.viewing_day().is_some_and(|day| day.has_task(task_id)) {
            return self;
        }

        if !self.completed_tasks_in_day.remove(task_id) {
            self.completed_tasks_in_day.insert(task_id.to_owned());
        }
        self
    }

    fn complete_day(mut self, store: &mut UsersStore, now: DateTime<Utc>) -> Transition {
        if self.view != View::DayDetail {
            return Transition::unchanged(self);
        }
        let Some(mut user) = self.current_user.take() else {
            return Transition::unchanged(self);
        };

        if self.viewing_day_id != user.current_day || user.has_completed(self.viewing_day_id) {
            warn!(
                username = %user.username,
                viewing = self.viewing_day_id,
                current = user.current_day,
                "completion requested for a day that is not the open day"
            );
            self.current_user = Some(user);
            self.view = View::Dashboard;
            return Transition::unchanged(self);
        }
        if !self.all_checked() {
            self.current_user = Some(user);
            return Transition::unchanged(self);
        }

        let day_id = user.current_day;
        user.complete_current_day(now);
        store.upsert(user.clone());
        info!(username = %user.username, day = day_id, next = user.current_day, "day completed");

        self.view = if user.is_finished() {
            View::Completion
        } else {
            View::Dashboard
        };
        self.current_user = Some(user);
        self.completed_tasks_in_day.clear();
        Transition::persisted(self)
    }

    fn return_to_dashboard(mut self) -> Self {
        if self.current_user.is_some() && matches!(self.view, View::DayDetail | View::Completion) {
            self.view = View::Dashboard;
        }
        self
    }

    fn logout(mut self) -> Self {
        if self.view == View::Login {
            return self;
        }
        self.view = View::Login;
        self.current_user = None;
        self.completed_tasks_in_day.clear();
        self.login_error = None;
        self
    }
}
