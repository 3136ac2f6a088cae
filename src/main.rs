use std::{env, net::SocketAddr, sync::Arc};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};
use weekly_planner::snapshot::{load_seed, resolve_seed_path};
use weekly_planner::ui::PageSurface;
use weekly_planner::{router, AppState, DayViewController, ScheduleLayout, ScheduleStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let layout = Arc::new(ScheduleLayout::standard());
    let store = ScheduleStore::new(Arc::clone(&layout));
    let mut planner = DayViewController::new(store, PageSurface::new(Arc::clone(&layout)));

    let seed = match resolve_seed_path() {
        Some(path) => load_seed(&path).await,
        None => None,
    };
    match seed {
        Some(snapshot) => {
            if let Err(err) = planner.import(&snapshot) {
                warn!("ignoring seed snapshot: {err}");
                planner.show_day(0)?;
            }
        }
        None => planner.show_day(0)?,
    }

    info!(
        days = layout.day_count(),
        slots = layout.slot_count(),
        active_day = planner.active_day(),
        "planner ready"
    );

    let app = router(AppState::new(planner));

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
