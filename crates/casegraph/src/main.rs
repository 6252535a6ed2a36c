//! Main entry point for casegraph.

use anyhow::{Context, Result};
use casegraph::{Args, CaseGraphApp};
use casegraph_common::init_logging;
use casegraph_graphs::CaseChartRenderer;
use clap::Parser;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = args
        .resolve_config()
        .context("Failed to load configuration")?;

    let logging = Args::logging_config(&config)?;
    init_logging(&logging).context("Failed to initialize logging")?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        country = %config.data.country,
        "Starting casegraph"
    );

    let app = CaseGraphApp::new(config);
    match app.run(&CaseChartRenderer::new()).await {
        Ok(report) => {
            info!(
                "Rendered {}x{} chart to {}",
                report.rendered.width,
                report.rendered.height,
                report.rendered.path.display()
            );
            Ok(())
        }
        Err(e) => {
            error!("Run failed: {}", e);
            Err(e).context(format!("casegraph run for {} failed", app.config().data.country))
        }
    }
}
