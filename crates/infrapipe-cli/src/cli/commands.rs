//! # CLI Layer
//!
//! This module is **one possible UI client** for infrapipe; it is not the
//! filter engine itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs a `tracing` subscriber
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Context Setup**: Load configuration and the dataset into a `FilterApi`
//! 3. **Dispatch**: Apply the requested exclusions, then run one handler
//! 4. **Output Formatting**: Hand structured results to `render.rs` or `serde_json`
//!
//! Each invocation is one session: exclusions passed as flags are replayed as
//! toggles against a freshly loaded dataset, exactly as a map user would click
//! them.

use super::render;
use super::setup::{Cli, Commands, OutputFormat, SelectionArgs};
use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use infrapipe::api::FilterApi;
use infrapipe::config::InfraConfig;
use infrapipe::dataset::{Dataset, FileSource};
use infrapipe::dimensions::{infrastructure, Registry};
use infrapipe::readiness::{Readiness, ThreadSleeper};
use infrapipe::session::FilterSession;
use infrapipe::surface::{MemoryCounter, MemorySurface, RenderSurface};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

type Api = FilterApi<MemorySurface, MemoryCounter>;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = InfraConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    let color = console::colors_enabled();

    match &cli.command {
        Commands::Dimensions => {
            print!("{}", render::render_dimensions(infrastructure(), color));
            Ok(())
        }
        Commands::Values {
            dimension,
            search,
            selection,
        } => {
            let mut api = open(&cli, config)?;
            apply(&mut api, selection)?;
            handle_values(&mut api, dimension, search.as_deref(), color)
        }
        Commands::Filter { selection, output } => {
            let mut api = open(&cli, config)?;
            apply(&mut api, selection)?;
            handle_filter(&api, *output, color)
        }
        Commands::Search { query } => {
            let api = open(&cli, config)?;
            print!(
                "{}",
                render::render_suggestions(&api.search_features(query), color)
            );
            Ok(())
        }
        Commands::Report { selection, output } => {
            let mut api = open(&cli, config)?;
            apply(&mut api, selection)?;
            handle_report(&api, *output, color)
        }
    }
}

/// Logs go to stderr so JSON on stdout stays clean. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: bool) {
    let fallback = if verbose { "infrapipe=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn open(cli: &Cli, config: InfraConfig) -> Result<Api> {
    let path = cli
        .data
        .as_deref()
        .ok_or_else(|| anyhow!("no dataset given, pass --data <FILE>"))?;

    let mut api = FilterApi::new(
        FilterSession::infrastructure(),
        MemorySurface::new(),
        MemoryCounter::new(),
        config,
    );

    if cli.wait {
        let mut source = FileSource::new(path);
        match api.initialize(&mut source, &mut ThreadSleeper) {
            Readiness::Ready { value, attempts } => {
                debug!(features = value, attempts, "dataset ready");
            }
            Readiness::GaveUp { attempts } => {
                bail!(
                    "dataset {} not available after {} attempts",
                    path.display(),
                    attempts
                );
            }
        }
    } else {
        let dataset = Dataset::from_path(path)
            .with_context(|| format!("failed to load {}", path.display()))?;
        api.load(dataset);
    }

    info!(path = %path.display(), features = api.session().features().len(), "dataset opened");
    Ok(api)
}

fn apply(api: &mut Api, selection: &SelectionArgs) -> Result<()> {
    for key in &selection.exclude_all {
        api.toggle_all(key)?;
    }
    for (key, value) in &selection.exclude {
        api.toggle(key, value)?;
    }
    Ok(())
}

fn label<'a>(registry: &'a Registry, key: &'a str) -> &'a str {
    registry.get(key).map(|d| d.label).unwrap_or(key)
}

fn handle_values(api: &mut Api, dimension: &str, search: Option<&str>, color: bool) -> Result<()> {
    let set = match search {
        Some(query) => api.search_controls(dimension, query)?,
        None => api.controls(dimension)?,
    };
    print!(
        "{}",
        render::render_controls(label(infrastructure(), dimension), set, color)
    );
    Ok(())
}

fn handle_filter(api: &Api, output: OutputFormat, color: bool) -> Result<()> {
    match output {
        OutputFormat::Json => {
            let data = api
                .surface()
                .current_data()
                .ok_or_else(|| anyhow!("nothing has been published"))?;
            println!("{}", serde_json::to_string_pretty(data)?);
        }
        OutputFormat::Text => {
            let registry = infrastructure();
            let excluded: Vec<(&str, Vec<String>)> = api
                .session()
                .all_controls()
                .iter()
                .map(|set| (label(registry, set.key()), set.active_values()))
                .filter(|(_, values)| !values.is_empty())
                .collect();
            print!(
                "{}",
                render::render_summary(api.counter().text(), &excluded, color)
            );
        }
    }
    Ok(())
}

fn handle_report(api: &Api, output: OutputFormat, color: bool) -> Result<()> {
    let report = api
        .report()
        .ok_or_else(|| anyhow!("nothing has been published"))?;
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print!("{}", render::render_report(&report, color)),
    }
    Ok(())
}
