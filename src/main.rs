use anyhow::{Context, Result};
use block_atlas::config::{load_config, BuildConfig};
use block_atlas::output::IdentifierFormat;
use block_atlas::pipeline::run_build;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "block-atlas",
    version,
    about = "Pack block textures into an atlas and build the block registry"
)]
struct Cli {
    /// TOML build config; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Texture directory, .tar/.tar.gz archive or client .jar
    #[arg(long)]
    source: Option<PathBuf>,
    /// Output directory
    #[arg(long)]
    output: Option<PathBuf>,
    /// Atlas size in pixels (must be a power of 2)
    #[arg(long)]
    atlas_size: Option<u32>,
    /// Per-texture size in pixels
    #[arg(long)]
    cell_size: Option<u32>,
    /// Path prefix of block textures inside the source
    #[arg(long)]
    prefix: Option<String>,
    /// Entity catalog TOML (defaults to the built-in block catalog)
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Identifier listing language: rust or cpp
    #[arg(long)]
    format: Option<IdentifierFormat>,
    /// C++ namespace for the identifier listing
    #[arg(long)]
    namespace: Option<String>,
    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Result<BuildConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => BuildConfig::default(),
        };

        if let Some(source) = self.source {
            config.source = source;
        }
        if let Some(output) = self.output {
            config.output_dir = output;
        }
        if let Some(size) = self.atlas_size {
            config.canvas_size = size;
        }
        if let Some(size) = self.cell_size {
            config.cell_size = size;
        }
        if let Some(prefix) = self.prefix {
            config.texture_prefix = prefix;
        }
        if let Some(catalog) = self.catalog {
            config.catalog = Some(catalog);
        }
        if let Some(format) = self.format {
            config.identifier_format = format;
        }
        if let Some(namespace) = self.namespace {
            config.namespace = namespace;
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = cli.into_config()?;
    log::debug!("Build config: {:?}", config);

    let summary = run_build(&config).context("atlas build failed")?;

    for warning in &summary.warnings {
        log::debug!("  {}", warning);
    }
    println!("{}", summary);

    Ok(())
}
