use crate::errors::AppError;
use crate::models::{
    Activity, ActivityDraft, DraftForm, PaceQuery, PaceResponse, SessionResponse, StatsResponse,
    View, ViewRequest,
};
use crate::state::AppState;
use crate::stats::{build_stats, pace};
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, Redirect},
    Form, Json,
};
use chrono::Local;
use tracing::debug;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let session = state.session.lock().await;
    Html(render_index(&session, Local::now().date_naive()))
}

pub async fn select_view(
    State(state): State<AppState>,
    Path(view): Path<String>,
) -> Result<Redirect, AppError> {
    let view: View = view
        .parse()
        .map_err(|_| AppError::not_found(format!("unknown view '{view}'")))?;
    state.session.lock().await.select_view(view);
    Ok(Redirect::to("/"))
}

/// Form submission from the add-activity panel. Errors stay in the session
/// and are rendered inline on the next page load.
pub async fn submit_form(State(state): State<AppState>, Form(form): Form<DraftForm>) -> Redirect {
    let mut session = state.session.lock().await;
    session.edit_draft(ActivityDraft::from_form(&form));
    if let Err(errors) = session.submit() {
        debug!(fields = errors.len(), "form kept open for correction");
    }
    Redirect::to("/")
}

pub async fn list_activities(State(state): State<AppState>) -> Json<Vec<Activity>> {
    let session = state.session.lock().await;
    Json(session.activities().to_vec())
}

pub async fn create_activity(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<Activity>), AppError> {
    let mut session = state.session.lock().await;
    session.edit_draft(ActivityDraft::from_form(&DraftForm::from_json(&body)));
    let activity = session.submit().map_err(AppError::validation)?;
    Ok((StatusCode::CREATED, Json(activity)))
}

pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let session = state.session.lock().await;
    Json(build_stats(session.activities()))
}

pub async fn get_pace(Query(query): Query<PaceQuery>) -> Json<PaceResponse> {
    Json(PaceResponse {
        pace: pace(query.duration, query.distance),
    })
}

pub async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    Json(state.session.lock().await.snapshot())
}

pub async fn put_view(
    State(state): State<AppState>,
    Json(payload): Json<ViewRequest>,
) -> Json<SessionResponse> {
    let mut session = state.session.lock().await;
    session.select_view(payload.view);
    Json(session.snapshot())
}

pub async fn reset_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let mut session = state.session.lock().await;
    session.reset();
    Json(session.snapshot())
}
