pub mod app;
pub mod controller;
pub mod errors;
pub mod handlers;
pub mod layout;
pub mod models;
pub mod snapshot;
pub mod state;
pub mod stats;
pub mod store;
pub mod ui;
pub mod view;

pub use app::router;
pub use controller::DayViewController;
pub use errors::ScheduleError;
pub use layout::ScheduleLayout;
pub use state::AppState;
pub use store::ScheduleStore;
pub use view::DayView;
