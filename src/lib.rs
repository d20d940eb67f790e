pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod utils;

use crate::services::assessment_service::AssessmentService;
use crate::store::records::RecordStore;

#[derive(Clone)]
pub struct AppState {
    pub store: RecordStore,
    pub assessment_service: AssessmentService,
}

impl AppState {
    pub fn new(store: RecordStore) -> Self {
        let assessment_service = AssessmentService::new(store.clone());
        Self {
            store,
            assessment_service,
        }
    }
}
