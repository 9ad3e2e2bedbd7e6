//! `run` subcommand.

use std::sync::Arc;

use tracing::{error, info, warn};

use autotap_config::{Config, ConfigValidator};
use autotap_core::{ActionDispatcher, ChannelPriority};
use autotap_runloop::{SlidePlanner, WorkflowController, WorkflowOrchestrator};

use crate::register::register_channels;

/// Run the workflow in the foreground until it ends or Ctrl-C.
pub(crate) async fn run_workflow(
    config: Config,
    seed: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting AutoTap v{}", env!("CARGO_PKG_VERSION"));

    for warning in ConfigValidator::validate(&config)?.into_result()? {
        warn!("Config {}: {}", warning.path, warning.message);
    }

    let channels = register_channels(&config.channels).await;
    if channels.registry.is_empty() {
        return Err("no execution channel available".into());
    }
    let provider = channels.provider()?;

    let dispatcher = Arc::new(ActionDispatcher::new(
        channels.registry.clone(),
        ChannelPriority::from_config(&config.channels),
    ));
    let planner = match seed {
        Some(seed) => SlidePlanner::with_seed(&config.captcha, seed),
        None => SlidePlanner::new(&config.captcha),
    };
    let orchestrator = Arc::new(WorkflowOrchestrator::with_planner(
        &config, provider, dispatcher, planner,
    ));
    let controller = Arc::new(WorkflowController::new(orchestrator));

    let handle = controller.start()?;

    let stopper = controller.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received Ctrl-C, stopping");
                stopper.stop();
            }
            Err(e) => error!("Failed to listen for Ctrl-C: {}", e),
        }
    });

    let outcome = handle.await?;
    channels.shutdown().await;

    println!(
        "{} after {} iterations (last page: {}, success: {})",
        outcome.terminal, outcome.iterations, outcome.last_page, outcome.success
    );
    Ok(())
}
