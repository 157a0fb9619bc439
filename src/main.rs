use anyhow::Result;
use temps_overlay::aggregator::TelemetryAggregator;
use temps_overlay::click_through::{self, ClickThroughController};
use temps_overlay::config::AppConfig;
use temps_overlay::net_repo::{NetworkRateSource, SysinfoCounters};
use temps_overlay::pointer;
use temps_overlay::renderer::TerminalRenderer;
use temps_overlay::scheduler::{PollScheduler, SchedulerConfig, SchedulerDeps, WindowEvent};
use temps_overlay::sensor_repo::{SensorSource, SysinfoMonitor};
use temps_overlay::version;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // stdout belongs to the panel
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let app_config = AppConfig::load()?;
    tracing::info!(version = %version::banner(), "starting");

    let monitor =
        SysinfoMonitor::open().map_err(|e| anyhow::anyhow!("hardware monitor: {}", e))?;
    let network = NetworkRateSource::init(Box::new(SysinfoCounters::new()), &app_config.network);
    let aggregator = TelemetryAggregator::new(
        SensorSource::new(Box::new(monitor)),
        network,
        app_config.overlay.missing_reading,
    );

    let mut renderer = TerminalRenderer::stdout(app_config.overlay.margin);
    renderer.enter()?;

    let click_through = app_config
        .overlay
        .click_through
        .then(|| {
            ClickThroughController::new(click_through::platform_api(), app_config.overlay.idle_opacity)
        });

    let token = CancellationToken::new();
    let (event_tx, event_rx) = mpsc::channel::<WindowEvent>(8);
    if let Some(window) = click_through::console_window() {
        let _ = event_tx.send(WindowEvent::Displayable(window)).await;
    }
    pointer::spawn_terminal_input(renderer.bounds(), event_tx, token.clone());

    let shutdown_token = token.clone();
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    tokio::select! {
                        _ = tokio::signal::ctrl_c() => {}
                        _ = sigterm.recv() => {}
                    }
                }
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                }
            }
        }
        #[cfg(not(unix))]
        {
            let _ = tokio::signal::ctrl_c().await;
        }
        tracing::info!("Received shutdown signal");
        shutdown_token.cancel();
    });

    let scheduler = PollScheduler::new(
        SchedulerDeps {
            aggregator,
            renderer: Box::new(renderer),
            click_through,
            events: Some(event_rx),
            token,
        },
        SchedulerConfig {
            interval_ms: app_config.polling.interval_ms,
            style: app_config.overlay.line_style(),
            idle_opacity: app_config.overlay.idle_opacity,
            hovered_opacity: app_config.overlay.hovered_opacity,
        },
    );
    let scheduler = scheduler.run().await;
    tracing::info!(ticks = scheduler.ticks(), "stopped");

    Ok(())
}
