use std::sync::Arc;

use crate::store::SurveyStore;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub store: SurveyStore,
}
