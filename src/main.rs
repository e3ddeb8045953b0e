// Main entry point - Wiring and session startup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use anyhow::Context;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use crate::application::chart_session::spawn_session;
use crate::application::data_loader::DataLoader;
use crate::application::view_controller::ViewWindowController;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::json_source::JsonFileSource;
use crate::presentation::console_view::ConsoleView;
use crate::presentation::gesture_script::replay;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr, frames to stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let app_config = load_app_config()?;
    let profile = app_config.window_profile()?;
    let display_offset = app_config.display_offset()?;

    // Load the bundled telemetry; any failure here ends the process
    let source = Arc::new(JsonFileSource::new(
        app_config.data.path.clone(),
        app_config.data.schema,
    ));
    let loader = DataLoader::new(source, display_offset);
    let series = Arc::new(
        loader
            .load()
            .await
            .with_context(|| format!("failed to load {}", app_config.data.path.display()))?,
    );

    tracing::info!(
        "Starting chart session ({:?} schema, floor {}, granularity {})",
        app_config.data.schema,
        profile.min_window_length,
        profile.max_granularity
    );

    let controller = ViewWindowController::new(series.clone(), profile);
    let (handle, session) = spawn_session(controller);
    tracing::debug!("Initial window {:?}", handle.current().window);

    let view = ConsoleView::new(series);
    let states = handle.subscribe();
    let renderer = tokio::spawn(async move { view.run(states).await });

    let dispatched = replay(BufReader::new(tokio::io::stdin()), &handle).await?;
    drop(handle);

    let controller = session.await?;
    let frames = renderer.await?;
    tracing::info!(
        "Replayed {} gestures, rendered {} frames, final window {:?}",
        dispatched,
        frames,
        controller.window()
    );

    Ok(())
}
