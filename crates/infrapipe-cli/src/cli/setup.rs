use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "infrapipe",
    bin_name = "infrapipe",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Filter infrastructure pipeline GeoJSON by project attributes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// GeoJSON FeatureCollection to load
    #[arg(short, long, global = true, help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Poll for the data file instead of failing when it is not there yet
    #[arg(long, global = true, help_heading = "Options")]
    pub wait: bool,

    /// Config file (defaults to infrapipe.toml in the user config directory)
    #[arg(long, global = true, help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

/// Exclusions applied before the command runs.
///
/// Select-all toggles run first, then each `--exclude` toggles one value
/// control. Excluding a value after `--exclude-all` therefore shows only
/// that value.
#[derive(Args, Debug, Default, Clone)]
pub struct SelectionArgs {
    /// Hide features whose value matches (DIMENSION=VALUE, repeatable)
    #[arg(long = "exclude", value_name = "DIMENSION=VALUE", value_parser = parse_exclusion)]
    pub exclude: Vec<(String, String)>,

    /// Toggle a dimension's "Select All" control (repeatable)
    #[arg(long = "exclude-all", value_name = "DIMENSION")]
    pub exclude_all: Vec<String>,
}

fn parse_exclusion(raw: &str) -> Result<(String, String), String> {
    let (dimension, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected DIMENSION=VALUE, got '{raw}'"))?;
    let dimension = dimension.trim();
    if dimension.is_empty() {
        return Err(format!("missing dimension in '{raw}'"));
    }
    Ok((dimension.to_string(), value.trim().to_string()))
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the filterable dimensions
    #[command(alias = "dims", display_order = 1)]
    Dimensions,

    /// Show one dimension's filter controls
    #[command(display_order = 2)]
    Values {
        /// Dimension key (see `infrapipe dimensions`)
        dimension: String,

        /// Only show labels containing this text (case-insensitive)
        #[arg(long, short)]
        search: Option<String>,

        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Apply exclusions and show what remains
    #[command(alias = "f", display_order = 3)]
    Filter {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Output format; json prints the filtered FeatureCollection
        #[arg(long, short, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },

    /// Search projects by name, description or asset id
    #[command(alias = "s", display_order = 4)]
    Search {
        /// Search text
        query: String,
    },

    /// Report rows for the filtered projects
    #[command(display_order = 5)]
    Report {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Output format
        #[arg(long, short, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
}
