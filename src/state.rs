use crate::config::Config;
use crate::repository::DynQuestionRepository;
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub repository: DynQuestionRepository,
    pub config: Config,
}

impl FromRef<AppState> for DynQuestionRepository {
    fn from_ref(state: &AppState) -> Self {
        state.repository.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
