use crate::errors::AppError;
use crate::kpi::apply_aggregate;
use crate::models::{
    AggregateResult, ScenarioInputs, ScenarioQuery, ScenarioResponse, SummaryResponse,
    parse_finite,
};
use crate::state::AppState;
use crate::stats::aggregate_surveys;
use crate::storage::save_survey;
use crate::ui::{render_index, scenario_response, summary_display};
use axum::{
    Form, Json,
    extract::{Query, State},
    response::{Html, Redirect},
};
use std::collections::BTreeMap;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let summary = build_summary(&state).await;
    Html(render_index(&summary))
}

pub async fn get_summary(State(state): State<AppState>) -> Json<SummaryResponse> {
    Json(build_summary(&state).await)
}

pub async fn get_scenario(Query(query): Query<ScenarioQuery>) -> Json<ScenarioResponse> {
    let inputs = ScenarioInputs {
        price: query.price.as_deref().and_then(parse_finite),
        attach: query.attach.as_deref().and_then(parse_finite),
    };
    Json(scenario_response(inputs.resolve()))
}

pub async fn post_survey(
    State(state): State<AppState>,
    Json(fields): Json<BTreeMap<String, String>>,
) -> Result<Json<SummaryResponse>, AppError> {
    store_submission(&state, fields).await?;
    Ok(Json(build_summary(&state).await))
}

pub async fn survey_form(
    State(state): State<AppState>,
    Form(fields): Form<BTreeMap<String, String>>,
) -> Result<Redirect, AppError> {
    store_submission(&state, fields).await?;
    Ok(Redirect::to("/"))
}

async fn store_submission(
    state: &AppState,
    fields: BTreeMap<String, String>,
) -> Result<(), AppError> {
    if fields.is_empty() {
        return Err(AppError::bad_request("survey response has no fields"));
    }
    save_survey(state.store.as_ref(), fields).await?;
    Ok(())
}

pub async fn build_summary(state: &AppState) -> SummaryResponse {
    let responses = state.store.load().await;
    summarize(&state.scenario, aggregate_surveys(&responses))
}

pub fn summarize(inputs: &ScenarioInputs, aggregate: AggregateResult) -> SummaryResponse {
    SummaryResponse {
        display: summary_display(&aggregate),
        applied: scenario_response(apply_aggregate(inputs, &aggregate)),
        aggregate,
    }
}
