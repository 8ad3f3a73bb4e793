pub mod config;
pub mod error;
pub mod logging;
pub mod processor;
pub mod project;
pub mod watch;

pub use config::ProcessorConfig;
pub use error::{ClientSpecError, Result};
pub use processor::{Assembly, ControllerProcessor, ProcessReport};
pub use project::state::{ProjectState, RefreshStats};
