//! specgen CLI entrypoint
//! Parses command-line arguments and dispatches to the core generator.

// Internal imports (std, crate)
use std::path::{Path, PathBuf};

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use specgen_core::{check_all, generate_all, Config, GeneratedMetadata, Manifest, OutputFormat};
use tokio::fs;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "specgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate parameter metadata for every controller method in a manifest
    Generate {
        /// Path to the declaration manifest (YAML or JSON)
        #[arg(long)]
        declarations: Option<PathBuf>,
        /// Path to a specgen.yaml configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output format: json or yaml
        #[arg(long)]
        format: Option<String>,
        /// Output file (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Report every parameter that cannot be classified
    Check {
        /// Path to the declaration manifest (YAML or JSON)
        #[arg(long)]
        declarations: Option<PathBuf>,
        /// Path to a specgen.yaml configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; stdout is reserved for generated metadata
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Generate {
            declarations,
            config,
            format,
            output,
        } => {
            let mut config = load_config(config.as_deref(), declarations.as_deref()).await?;
            if let Some(format) = format {
                config.format = format
                    .parse::<OutputFormat>()
                    .map_err(|e| anyhow::anyhow!("Invalid format '{format}': {e}"))?;
            }
            if let Some(output) = output {
                config.output_path = Some(output.to_string_lossy().to_string());
            }

            let manifest = load_manifest(&config).await?;
            let generator = config.parameter_generator();
            let metadata = generate_all(&manifest, &generator)
                .context("Failed to generate parameter metadata")?;

            let rendered = render(&metadata, config.format)?;
            match &config.output_path {
                Some(path) => {
                    fs::write(path, rendered)
                        .await
                        .with_context(|| format!("Failed to write metadata to {path}"))?;
                    tracing::info!("Wrote parameter metadata to {}", path);
                }
                None => println!("{rendered}"),
            }
        }
        Commands::Check {
            declarations,
            config,
        } => {
            let config = load_config(config.as_deref(), declarations.as_deref()).await?;
            let manifest = load_manifest(&config).await?;
            let generator = config.parameter_generator();

            let errors = check_all(&manifest, &generator);
            for err in &errors {
                eprintln!("error: {err}");
            }
            if !errors.is_empty() {
                anyhow::bail!(
                    "{} of {} parameters failed classification",
                    errors.len(),
                    manifest.parameter_count()
                );
            }
            tracing::info!(
                "All {} parameters classified successfully",
                manifest.parameter_count()
            );
        }
    }
    Ok(())
}

/// Loads the config file when given, letting `--declarations` override it.
async fn load_config(config: Option<&Path>, declarations: Option<&Path>) -> anyhow::Result<Config> {
    let mut loaded = match config {
        Some(path) => Config::from_file(path)
            .await
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => {
            let declarations = declarations
                .context("Either --declarations or --config must be provided")?;
            Config::new("specgen", declarations.to_string_lossy())
        }
    };
    if let Some(declarations) = declarations {
        loaded.declarations_path = declarations.to_string_lossy().to_string();
    }
    Ok(loaded)
}

async fn load_manifest(config: &Config) -> anyhow::Result<Manifest> {
    tracing::debug!("Loading declarations from: {}", config.declarations_path);
    let manifest = Manifest::from_file(&config.declarations_path)
        .await
        .with_context(|| format!("Failed to load declarations from {}", config.declarations_path))?;
    tracing::info!(
        "Loaded {} controllers ({} parameters) for {}",
        manifest.controllers.len(),
        manifest.parameter_count(),
        config.project_name
    );
    Ok(manifest)
}

fn render(metadata: &GeneratedMetadata, format: OutputFormat) -> anyhow::Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(metadata)?,
        OutputFormat::Yaml => serde_yaml::to_string(metadata)?,
    };
    Ok(rendered)
}
