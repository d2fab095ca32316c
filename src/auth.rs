//! Username-only account selection. No secret is ever checked.

use crate::errors::AuthError;
use crate::models::{UserProgress, UsersStore};
use chrono::{DateTime, Utc};
use tracing::info;

pub fn register(
    store: &mut UsersStore,
    name: &str,
    now: DateTime<Utc>,
) -> Result<UserProgress, AuthError> {
    if store.contains(name) {
        return Err(AuthError::UsernameTaken);
    }

    let user = UserProgress::new(name, now);
    store.upsert(user.clone());
    info!(username = name, "registered new user");
    Ok(user)
}

pub fn login(store: &UsersStore, name: &str) -> Result<UserProgress, AuthError> {
    let user = store.get(name).cloned().ok_or(AuthError::UserNotFound)?;
    info!(username = name, completed = user.completed_count(), "user logged in");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 5, 9, 30, 0).unwrap()
    }

    #[test]
    fn register_creates_fresh_record() {
        let mut store = UsersStore::default();
        let user = register(&mut store, "dana", now()).expect("register");
        assert_eq!(user.current_day, 1);
        assert!(user.completed_days.is_empty());
        assert_eq!(store.get("dana"), Some(&user));
    }

    #[test]
    fn register_rejects_existing_name_without_mutation() {
        let mut store = UsersStore::default();
        register(&mut store, "dana", now()).unwrap();
        let mut existing = store.get("dana").cloned().unwrap();
        existing.completed_days.push(1);
        existing.current_day = 2;
        store.upsert(existing);
        let before = store.clone();

        let err = register(&mut store, "dana", now() + chrono::Duration::days(1)).unwrap_err();
        assert_eq!(err, AuthError::UsernameTaken);
        assert_eq!(store, before);
    }

    #[test]
    fn login_returns_record_unchanged() {
        let mut store = UsersStore::default();
        let created = register(&mut store, "dana", now()).unwrap();
        assert_eq!(login(&store, "dana"), Ok(created));
    }

    #[test]
    fn login_unknown_user_fails() {
        let store = UsersStore::default();
        assert_eq!(login(&store, "ghost"), Err(AuthError::UserNotFound));
    }
}
