use std::sync::Arc;

use nutriplan_core::application::NutriPlanService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: Arc<NutriPlanService>,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: NutriPlanService) -> Self {
        Self {
            args,
            service: Arc::new(service),
        }
    }
}
