use crate::models::ScenarioInputs;
use crate::storage::SurveyStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SurveyStore>,
    pub scenario: ScenarioInputs,
}

impl AppState {
    pub fn new(store: Arc<dyn SurveyStore>, scenario: ScenarioInputs) -> Self {
        Self { store, scenario }
    }
}
