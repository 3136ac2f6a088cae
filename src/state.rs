use crate::controller::DayViewController;
use crate::ui::PageSurface;
use std::sync::Arc;
use tokio::sync::Mutex;

pub type Planner = DayViewController<PageSurface>;

/// One planner per process. The mutex keeps it single-writer.
#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<Mutex<Planner>>,
}

impl AppState {
    pub fn new(planner: Planner) -> Self {
        Self {
            planner: Arc::new(Mutex::new(planner)),
        }
    }
}
