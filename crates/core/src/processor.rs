use crate::config::ProcessorConfig;
use crate::error::Result;
use crate::project::state::{ProjectState, RefreshStats};
use clientspec_api::ApiSpec;
use clientspec_java::model::JavaFileModel;
use clientspec_java::{ConstantTable, ControllerVisitor, EntityCollector, SkippedHandler};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// A document together with what was left out of it.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub spec: ApiSpec,
    pub skipped: Vec<SkippedHandler>,
}

/// Summary of one processor run.
#[derive(Debug, Clone)]
pub struct ProcessReport {
    pub files_scanned: usize,
    pub files_parsed: usize,
    pub controllers: usize,
    pub endpoints: usize,
    pub entities: usize,
    pub skipped: Vec<SkippedHandler>,
    pub output: PathBuf,
    /// False when the document on disk already had identical content.
    pub written: bool,
    pub duration: Duration,
}

/// Scans a project for REST controllers and writes `api-spec.json`.
#[derive(Debug, Clone, Default)]
pub struct ControllerProcessor {
    config: ProcessorConfig,
}

impl ControllerProcessor {
    pub fn new(config: ProcessorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// One-shot run over `root`.
    pub fn process(&self, root: &Path) -> Result<ProcessReport> {
        let mut state = ProjectState::new(root)?;
        let stats = state.refresh();
        self.process_state(&state, stats)
    }

    /// Assembles and writes the document for an already refreshed state.
    pub fn process_state(&self, state: &ProjectState, stats: RefreshStats) -> Result<ProcessReport> {
        let started = Instant::now();
        info!("Processing controllers under {}", state.root().display());

        let models: Vec<&JavaFileModel> = state.models().collect();
        let assembly = self.assemble(&models);
        let output = self.config.output_path(state.root());
        let written = self.write(&assembly.spec, &output)?;

        let report = ProcessReport {
            files_scanned: stats.scanned,
            files_parsed: stats.parsed,
            controllers: assembly.spec.services.len(),
            endpoints: assembly.spec.endpoint_count(),
            entities: assembly.spec.entities.len(),
            skipped: assembly.skipped,
            output,
            written,
            duration: started.elapsed(),
        };
        info!(
            "Generated {} endpoints in {} services ({} entities, {} skipped) in {:?}",
            report.endpoints,
            report.controllers,
            report.entities,
            report.skipped.len(),
            report.duration
        );
        Ok(report)
    }

    /// Builds the document from parsed models. Services follow the order of
    /// `models`, then source order within each file.
    pub fn assemble(&self, models: &[&JavaFileModel]) -> Assembly {
        let constants = ConstantTable::from_files(models.iter().copied());
        debug!("Constant table holds {} entries", constants.len());

        let visitor = ControllerVisitor::new(&constants);
        let mut spec = ApiSpec::new(self.config.api_name.clone());
        let mut skipped = Vec::new();

        for (file, decl) in models
            .iter()
            .copied()
            .flat_map(|m| m.types.iter().map(move |d| (m, d)))
            .filter(|(_, d)| ControllerVisitor::accept(d))
        {
            match visitor.visit_controller(file, decl) {
                Ok(visit) => {
                    skipped.extend(visit.skipped);
                    spec.add_service(visit.service);
                }
                Err(e) => {
                    warn!("Skipping controller {}: {}", decl.name, e);
                    skipped.push(SkippedHandler {
                        handler: decl.name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if self.config.collect_entities {
            let collector = EntityCollector::new(models.iter().copied());
            for entity in collector.collect(&spec.services) {
                spec.add_entity(entity);
            }
        }

        Assembly { spec, skipped }
    }

    pub fn render(&self, spec: &ApiSpec) -> Result<Vec<u8>> {
        let bytes = if self.config.pretty {
            serde_json::to_vec_pretty(spec)?
        } else {
            serde_json::to_vec(spec)?
        };
        Ok(bytes)
    }

    /// Writes the document unless the file already holds the same bytes.
    /// Returns whether the file was written.
    pub fn write(&self, spec: &ApiSpec, output: &Path) -> Result<bool> {
        let bytes = self.render(spec)?;

        if std::fs::read(output).is_ok_and(|current| current == bytes) {
            debug!("{} is up to date", output.display());
            return Ok(false);
        }

        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output, bytes)?;
        info!("Wrote {}", output.display());
        Ok(true)
    }
}
