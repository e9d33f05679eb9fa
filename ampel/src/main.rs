use ampel::prelude::*;
use anyhow::Result;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .init();

    // 2. Create a light with the default 4-6 second red/green cycle.
    let config = CyclerConfig::default();
    let light = TrafficLight::new(config)?;

    // 3. Spawn concurrent tasks to listen to the event streams.
    spawn_event_listeners(&light);

    // 4. Start the background cycle loop.
    light.simulate().await?;
    info!("current phase: {}", light.current_phase());

    // 5. Demonstrate the blocking wait: suspend until the first green.
    light.wait_for_green().await;
    info!("light is green, crossing the intersection");

    // 6. Keep cycling until Ctrl+C, then shut down cleanly.
    info!("light is cycling. Press Ctrl+C to shut down.");
    tokio::signal::ctrl_c().await?;
    light.shutdown().await?;

    Ok(())
}

/// Spawns a task per event stream, logging everything the light announces.
fn spawn_event_listeners(light: &TrafficLight) {
    let mut system_rx = light.subscribe_system_events();
    tokio::spawn(async move {
        while let Ok(event) = system_rx.recv().await {
            info!("[SYSTEM] => {:?}", event);
        }
    });

    let mut phase_rx = light.subscribe_phases();
    tokio::spawn(async move {
        while let Ok(event) = phase_rx.recv().await {
            info!("[PHASE] => switched to {} (cycle #{})", event.phase, event.cycle);
        }
    });
}
