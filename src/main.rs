//! Olymdash - Olympic athletes CSV analysis & chart registry core
//!
//! Loads the athlete events CSV, builds the selected page's chart registry
//! and resolves a selection key into a render payload, emitted as JSON for
//! a rendering collaborator.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use olymdash::data::loader;
use olymdash::pages::registry::NOT_FOUND_PLACEHOLDER;
use olymdash::pages::{medals, physique};
use olymdash::Resolution;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Page {
    Medals,
    Physique,
}

#[derive(Parser)]
#[command(name = "olymdash", about = "Olympic athletes chart dashboard core")]
struct Cli {
    /// Path to the athlete events CSV file
    csv: String,

    /// Dashboard page whose registry should be built
    #[arg(long, value_enum, default_value_t = Page::Medals)]
    page: Page,

    /// Chart key to select; defaults to the page's first key
    #[arg(long)]
    select: Option<String>,

    /// List the page's chart keys and exit
    #[arg(long)]
    list: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let df = loader::load_csv(&cli.csv)?;
    let df = loader::anonymize_names(df)?;

    let registry = match cli.page {
        Page::Medals => medals::build_registry(&df)?,
        Page::Physique => physique::build_registry(&df)?,
    };

    if cli.list {
        for key in registry.keys() {
            println!("{key}");
        }
        return Ok(());
    }

    let key = match cli.select {
        Some(key) => key,
        None => registry
            .default_key()
            .context("registry has no charts")?
            .to_string(),
    };

    match registry.resolve(&key) {
        Resolution::Found(payload) => {
            println!("{}", serde_json::to_string_pretty(payload)?);
        }
        Resolution::NotFound => {
            println!("{NOT_FOUND_PLACEHOLDER}: no chart is registered under '{key}'");
        }
    }

    Ok(())
}
