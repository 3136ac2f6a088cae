use crate::errors::AppError;
use crate::models::{
    CompletionRequest, DayResponse, NavigateRequest, ProgressResponse, SlotResponse, TaskRequest,
    WeekSummary,
};
use crate::snapshot::{decode_snapshot, Snapshot};
use crate::state::{AppState, Planner};
use crate::ui::render_index;
use axum::{
    body::Bytes,
    extract::{Path, State},
    response::{Html, Redirect},
    Json,
};
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let planner = state.planner.lock().await;
    Html(render_index(planner.view()))
}

pub async fn get_active_day(State(state): State<AppState>) -> Result<Json<DayResponse>, AppError> {
    let planner = state.planner.lock().await;
    let day = planner.active_day();
    Ok(Json(day_response(&planner, day)?))
}

pub async fn get_day(
    State(state): State<AppState>,
    Path(day): Path<usize>,
) -> Result<Json<DayResponse>, AppError> {
    let planner = state.planner.lock().await;
    Ok(Json(day_response(&planner, day)?))
}

pub async fn get_summary(State(state): State<AppState>) -> Json<WeekSummary> {
    let planner = state.planner.lock().await;
    Json(planner.week_summary())
}

pub async fn set_task(
    State(state): State<AppState>,
    Json(payload): Json<TaskRequest>,
) -> Result<Json<ProgressResponse>, AppError> {
    let mut planner = state.planner.lock().await;
    let progress = planner.handle_task_text_change(payload.day, payload.slot, &payload.text)?;
    Ok(Json(progress.into()))
}

pub async fn set_completion(
    State(state): State<AppState>,
    Json(payload): Json<CompletionRequest>,
) -> Result<Json<ProgressResponse>, AppError> {
    let mut planner = state.planner.lock().await;
    let progress = planner.handle_checkbox_toggle(payload.day, payload.slot, payload.checked)?;
    Ok(Json(progress.into()))
}

pub async fn navigate(
    State(state): State<AppState>,
    Json(payload): Json<NavigateRequest>,
) -> Result<Json<DayResponse>, AppError> {
    let mut planner = state.planner.lock().await;
    match (payload.direction.as_deref().map(str::trim), payload.day) {
        (Some("next"), None) => planner.next_day()?,
        (Some("prev"), None) => planner.previous_day()?,
        (None, Some(day)) => planner.show_day(day)?,
        _ => {
            return Err(AppError::bad_request(
                "navigate needs direction 'next' or 'prev', or a day",
            ));
        }
    }
    let day = planner.active_day();
    Ok(Json(day_response(&planner, day)?))
}

pub async fn clear(State(state): State<AppState>) -> Result<Json<DayResponse>, AppError> {
    let mut planner = state.planner.lock().await;
    planner.clear_active_day()?;
    let day = planner.active_day();
    Ok(Json(day_response(&planner, day)?))
}

pub async fn export_snapshot(State(state): State<AppState>) -> Result<Json<Snapshot>, AppError> {
    let mut planner = state.planner.lock().await;
    Ok(Json(planner.export()?))
}

pub async fn import_snapshot(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<DayResponse>, AppError> {
    let snapshot = decode_snapshot(&body)?;
    let mut planner = state.planner.lock().await;
    planner.import(&snapshot)?;
    info!(
        tasks = snapshot.tasks.len(),
        completions = snapshot.completions.len(),
        "imported snapshot"
    );
    let day = planner.active_day();
    Ok(Json(day_response(&planner, day)?))
}

pub async fn next_day(State(state): State<AppState>) -> Result<Redirect, AppError> {
    state.planner.lock().await.next_day()?;
    Ok(Redirect::to("/"))
}

pub async fn previous_day(State(state): State<AppState>) -> Result<Redirect, AppError> {
    state.planner.lock().await.previous_day()?;
    Ok(Redirect::to("/"))
}

pub async fn show_day(
    State(state): State<AppState>,
    Path(day): Path<usize>,
) -> Result<Redirect, AppError> {
    state.planner.lock().await.show_day(day)?;
    Ok(Redirect::to("/"))
}

pub async fn clear_day(State(state): State<AppState>) -> Result<Redirect, AppError> {
    state.planner.lock().await.clear_active_day()?;
    Ok(Redirect::to("/"))
}

fn day_response(planner: &Planner, day: usize) -> Result<DayResponse, AppError> {
    let store = planner.store();
    let layout = store.layout();
    let progress = store.progress(day)?;
    let slots = store
        .day_slots(day)?
        .into_iter()
        .zip(layout.slots())
        .enumerate()
        .map(|(slot, (value, time_slot))| SlotResponse {
            slot,
            time: time_slot.time.clone(),
            period: time_slot.period,
            text: value.text,
            completed: value.completed,
        })
        .collect();

    Ok(DayResponse {
        day,
        name: layout.day_name(day).unwrap_or_default().to_string(),
        active: day == planner.active_day(),
        slots,
        progress: progress.into(),
    })
}
