use roleta::{Pipeline, store::Database};
use std::sync::Arc;

pub struct AppState {
    pub pipeline: Pipeline,
    pub database: Option<Arc<Database>>,
}

impl AppState {
    pub fn new(pipeline: Pipeline, database: Option<Arc<Database>>) -> Self {
        Self { pipeline, database }
    }
}
