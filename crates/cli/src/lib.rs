mod generate;
mod routes;
mod schema;
mod watch;

use clap::{Args, Parser, Subcommand};
use clientspec_core::{ProcessorConfig, Result as CoreResult};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "clientspec",
    version,
    about = "Extracts an API specification from Spring REST controllers",
    long_about = "clientspec reads the Java sources of a Spring project, finds every @RestController \
                  and writes a language-neutral description of its endpoints and the types they \
                  exchange. The document is meant as input for client code generators."
)]
pub struct Cli {
    /// Also print log output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Settings shared by the commands that write the document.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output directory, overriding `outputDir` from clientspec.json
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON document
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate api-spec.json for a project
    #[command(
        long_about = "Scans the project for REST controllers and writes api-spec.json. \
                            By default the document goes to build/generated/clientspec/ under the project root."
    )]
    Generate {
        /// Path to the project root directory
        #[arg(value_name = "PROJECT_PATH")]
        path: PathBuf,

        #[command(flatten)]
        output: OutputArgs,

        /// Name recorded at the top of the document
        #[arg(short, long)]
        name: Option<String>,

        /// Do not describe the entity types used by endpoints
        #[arg(long)]
        no_entities: bool,
    },
    /// List the endpoints of a project without writing anything
    Routes {
        /// Path to the project root directory
        #[arg(value_name = "PROJECT_PATH")]
        path: PathBuf,
    },
    /// Print the JSON Schema of the generated document
    Schema,
    /// Regenerate the document whenever Java sources change
    #[command(
        long_about = "Generates the document once, then watches the project directory. \
                            When a Java source changes the document is regenerated. Press Ctrl+C to stop."
    )]
    Watch {
        /// Path to the project root directory to watch
        #[arg(value_name = "PROJECT_PATH")]
        path: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Reads `clientspec.json` and applies command line overrides on top.
pub fn load_config(
    root: &Path,
    output: &OutputArgs,
    name: Option<String>,
    no_entities: bool,
) -> CoreResult<ProcessorConfig> {
    let mut config = ProcessorConfig::load(root)?;
    if let Some(dir) = &output.output {
        config.output_dir = dir.clone();
    }
    if output.pretty {
        config.pretty = true;
    }
    if let Some(name) = name {
        config.api_name = name;
    }
    if no_entities {
        config.collect_entities = false;
    }
    Ok(config)
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let component = match &cli.command {
        Commands::Watch { .. } => "watch",
        _ => "cli",
    };
    let _guard = clientspec_core::logging::init_logging(component, cli.verbose);

    match cli.command {
        Commands::Generate {
            path,
            output,
            name,
            no_entities,
        } => generate::run(path, output, name, no_entities),
        Commands::Routes { path } => routes::run(path),
        Commands::Schema => schema::run(),
        Commands::Watch { path, output } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(watch::run(path, output))
        }
    }
}
