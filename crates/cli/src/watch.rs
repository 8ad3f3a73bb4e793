use crate::{OutputArgs, load_config};
use clientspec_core::ControllerProcessor;
use clientspec_core::watch::watch_project;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub async fn run(path: PathBuf, output: OutputArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&path, &output, None, false)?;
    let processor = ControllerProcessor::new(config);

    let cancel_token = CancellationToken::new();
    let on_signal = cancel_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_signal.cancel();
        }
    });

    info!("Watching {}. Press Ctrl+C to stop.", path.display());
    println!("Watching {}. Press Ctrl+C to stop.", path.display());
    watch_project(path, processor, cancel_token, |report| {
        if report.written {
            println!(
                "Regenerated {} ({} endpoints, {} skipped)",
                report.output.display(),
                report.endpoints,
                report.skipped.len()
            );
        }
    })
    .await?;
    info!("Watcher stopped.");

    Ok(())
}
