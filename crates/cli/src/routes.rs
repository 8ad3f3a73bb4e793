use clientspec_api::{ApiSpec, Route};
use clientspec_core::{ControllerProcessor, ProcessorConfig, ProjectState};
use std::path::PathBuf;
use tabled::{Table, Tabled, settings::Style};

#[derive(Tabled)]
pub struct RouteView {
    pub method: String,
    pub path: String,
    pub service: String,
    pub handler: String,
}

impl From<Route<'_>> for RouteView {
    fn from(route: Route<'_>) -> Self {
        Self {
            method: route.method.to_string(),
            path: route.path.to_string(),
            service: route.service.to_string(),
            handler: route.handler.to_string(),
        }
    }
}

pub fn render(spec: &ApiSpec) -> String {
    let views: Vec<RouteView> = spec.routes().map(RouteView::from).collect();
    Table::new(&views).with(Style::psql()).to_string()
}

pub fn run(path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = ProcessorConfig {
        collect_entities: false,
        ..ProcessorConfig::load(&path)?
    };

    let mut state = ProjectState::new(&path)?;
    state.refresh();
    let models: Vec<_> = state.models().collect();
    let assembly = ControllerProcessor::new(config).assemble(&models);

    if assembly.spec.services.is_empty() {
        println!("No REST controllers found under {}", path.display());
        return Ok(());
    }
    println!("{}", render(&assembly.spec));
    for skipped in &assembly.skipped {
        println!("skipped {}: {}", skipped.handler, skipped.reason);
    }
    Ok(())
}
