use crate::{OutputArgs, load_config};
use clientspec_core::ControllerProcessor;
use std::path::PathBuf;
use tracing::info;

pub fn run(
    path: PathBuf,
    output: OutputArgs,
    name: Option<String>,
    no_entities: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&path, &output, name, no_entities)?;
    info!("Generating API specification for {}...", path.display());

    let report = ControllerProcessor::new(config).process(&path)?;

    println!(
        "{} endpoints in {} services, {} entities ({} files scanned, {:.2?})",
        report.endpoints,
        report.controllers,
        report.entities,
        report.files_scanned,
        report.duration
    );
    for skipped in &report.skipped {
        println!("  skipped {}: {}", skipped.handler, skipped.reason);
    }
    if report.written {
        println!("Wrote {}", report.output.display());
    } else {
        println!("{} is up to date", report.output.display());
    }

    Ok(())
}
