use crate::errors::AppError;
use crate::models::{AuthForm, DayConfig, SessionSnapshot};
use crate::program::WARMUP_PLAN;
use crate::session::Intent;
use crate::state::AppState;
use crate::storage::{load_store, persist_store};
use crate::ui::render_view;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::{Html, Redirect},
    Form, Json,
};
use chrono::Utc;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let session = state.session.lock().await;
    Html(render_view(&session, Utc::now()))
}

pub async fn get_state(State(state): State<AppState>) -> Json<SessionSnapshot> {
    let session = state.session.lock().await;
    Json(session.snapshot(Utc::now()))
}

pub async fn get_program() -> Json<&'static [DayConfig]> {
    Json(&WARMUP_PLAN[..])
}

pub async fn post_intent(
    State(state): State<AppState>,
    payload: Result<Json<Intent>, JsonRejection>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let Json(intent) = payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    let snapshot = dispatch(&state, intent).await?;
    Ok(Json(snapshot))
}

pub async fn submit_auth(
    State(state): State<AppState>,
    Form(form): Form<AuthForm>,
) -> Result<Redirect, AppError> {
    redirect_after(&state, Intent::SubmitAuth { name: form.name }).await
}

pub async fn toggle_auth_mode(State(state): State<AppState>) -> Result<Redirect, AppError> {
    redirect_after(&state, Intent::ToggleAuthMode).await
}

pub async fn open_day(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Redirect, AppError> {
    redirect_after(&state, Intent::SelectDay { id }).await
}

pub async fn toggle_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    redirect_after(&state, Intent::ToggleTask { id }).await
}

pub async fn complete_day(State(state): State<AppState>) -> Result<Redirect, AppError> {
    redirect_after(&state, Intent::CompleteDay).await
}

pub async fn return_to_dashboard(State(state): State<AppState>) -> Result<Redirect, AppError> {
    redirect_after(&state, Intent::ReturnToDashboard).await
}

pub async fn logout(State(state): State<AppState>) -> Result<Redirect, AppError> {
    redirect_after(&state, Intent::Logout).await
}

async fn redirect_after(state: &AppState, intent: Intent) -> Result<Redirect, AppError> {
    dispatch(state, intent).await?;
    Ok(Redirect::to("/"))
}

/// Applies one intent against a freshly loaded store and writes the store back
/// when the transition changed it. The session is only replaced once the write
/// has succeeded.
async fn dispatch(state: &AppState, intent: Intent) -> Result<SessionSnapshot, AppError> {
    let now = Utc::now();
    let mut session = state.session.lock().await;
    let mut store = load_store(&state.data_path).await;

    let transition = session.clone().apply(intent, &mut store, now);
    if transition.store_changed {
        persist_store(&state.data_path, &store).await?;
    }

    *session = transition.session;
    Ok(session.snapshot(now))
}
