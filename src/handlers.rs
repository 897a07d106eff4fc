use crate::errors::AppError;
use crate::models::{EntryForm, MoodEntry, ReportResponse, StatsResponse};
use crate::state::AppState;
use crate::stats::{build_report, build_stats};
use crate::storage::{new_entry_id, persist_data};
use crate::tracker::{Action, Effect, Tab};
use crate::ui::render_page;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub tab: Option<String>,
}

pub async fn index(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Html<String> {
    let mut tracker = state.tracker.lock().await;
    if let Some(tab) = query.tab.as_deref().and_then(Tab::parse) {
        tracker.dispatch(Action::SelectTab(tab));
    }
    let page = render_page(&tracker, today());
    tracker.dispatch(Action::Rendered);
    Html(page)
}

pub async fn submit_entry(
    State(state): State<AppState>,
    Form(form): Form<EntryForm>,
) -> Result<Response, AppError> {
    let today = today();
    let mut tracker = state.tracker.lock().await;
    let effect = tracker.dispatch(Action::Submit {
        form,
        id: new_entry_id(),
        today,
    });

    match effect {
        Effect::Persist { entry, replaced } => {
            persist_data(&state.data_path, tracker.store.entries()).await?;
            info!(date = %entry.date, replaced, "entry saved");
            Ok(Redirect::to("/").into_response())
        }
        Effect::Rejected(errors) => {
            debug!(fields = ?errors.keys().collect::<Vec<_>>(), "entry rejected");
            let page = render_page(&tracker, today);
            tracker.dispatch(Action::Rendered);
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response())
        }
        Effect::None => Ok(Redirect::to("/").into_response()),
    }
}

pub async fn list_entries(State(state): State<AppState>) -> Json<Vec<MoodEntry>> {
    let tracker = state.tracker.lock().await;
    Json(tracker.store.entries().to_vec())
}

pub async fn get_entry(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<MoodEntry>, AppError> {
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| AppError::bad_request("date must be formatted as YYYY-MM-DD"))?;
    let tracker = state.tracker.lock().await;
    tracker
        .store
        .get(date)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("no entry for {date}")))
}

pub async fn create_entry(
    State(state): State<AppState>,
    Json(form): Json<EntryForm>,
) -> Result<(StatusCode, Json<MoodEntry>), AppError> {
    let mut tracker = state.tracker.lock().await;
    let effect = tracker.dispatch(Action::Record {
        form,
        id: new_entry_id(),
        today: today(),
    });

    match effect {
        Effect::Persist { entry, replaced } => {
            persist_data(&state.data_path, tracker.store.entries()).await?;
            info!(date = %entry.date, replaced, "entry recorded");
            Ok((StatusCode::CREATED, Json(entry)))
        }
        Effect::Rejected(errors) => Err(AppError::validation(errors)),
        Effect::None => Err(AppError::bad_request("nothing to record")),
    }
}

pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let tracker = state.tracker.lock().await;
    Json(build_stats(tracker.store.entries()))
}

pub async fn get_report(State(state): State<AppState>) -> Json<ReportResponse> {
    let tracker = state.tracker.lock().await;
    Json(build_report(tracker.store.entries()))
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}
