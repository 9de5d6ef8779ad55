//! costered - Responsive style compiler

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use costered::grid::{self, GridAxisModel};
use costered::{Config, CssRenderer, JsonContentSource, StylesheetCompiler, rebuild_all};

#[derive(Parser)]
#[command(name = "costered")]
#[command(version, about = "Responsive style compiler", long_about = None)]
#[command(after_help = "EXAMPLES:
    costered render attrs.json -t core/button     Print a block's CSS
    costered rebuild site.json -c costered.json   Recompile every stylesheet
    costered tracks 'repeat(3, 1fr) 2fr'          Inspect a grid template")]
struct Cli {
    /// Configuration file (JSON)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render one block's attribute record to CSS
    Render {
        /// Attribute JSON file, or `-` for stdin
        #[arg(value_name = "ATTRS")]
        input: String,

        /// Block type used for selector strengthening
        #[arg(short = 't', long, default_value = "core/group")]
        node_type: String,
    },
    /// Recompile the stylesheet of every eligible node in a site file
    Rebuild {
        /// Site JSON file with a `nodes` array
        #[arg(value_name = "SITE")]
        site: PathBuf,
    },
    /// Decode a grid-template-columns/rows value
    Tracks {
        #[arg(value_name = "TEMPLATE")]
        template: String,
    },
    /// Parse a grid-template-areas value
    Areas {
        #[arg(value_name = "TEMPLATE")]
        template: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> costered::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    match cli.command {
        Command::Render { input, node_type } => render(&config, &input, &node_type),
        Command::Rebuild { site } => rebuild(&config, &site),
        Command::Tracks { template } => {
            show_tracks(&template);
            Ok(())
        }
        Command::Areas { template } => {
            show_areas(&template);
            Ok(())
        }
    }
}

fn render(config: &Config, input: &str, node_type: &str) -> costered::Result<()> {
    let text = if input == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        text
    } else {
        std::fs::read_to_string(input)?
    };
    let attrs: serde_json::Value = serde_json::from_str(&text)?;

    let css = CssRenderer::new(config).render_attributes(&attrs, node_type);
    print!("{css}");
    Ok(())
}

fn rebuild(config: &Config, site: &Path) -> costered::Result<()> {
    let source = JsonContentSource::load(site)?;
    let processed = rebuild_all(
        &source,
        &CssRenderer::new(config),
        &StylesheetCompiler::new(config),
    );
    println!("Processed {processed} node(s)");
    Ok(())
}

fn show_tracks(template: &str) {
    match GridAxisModel::decode(template) {
        GridAxisModel::Simple { count, unit } => println!("Simple: {count} x {unit}"),
        GridAxisModel::Tracks { tokens } => println!("Tracks: {}", tokens.join(" | ")),
        GridAxisModel::Raw(raw) => println!("Raw: {raw}"),
    }

    let summary = grid::summarize_tracks(template);
    println!("Count: {}", summary.count);
    if let Some(unit) = &summary.unit {
        println!("Unit: {unit}");
    }
    if let Some(auto) = summary.auto_repeat {
        println!("Auto-repeat: {auto:?}");
    }
    if summary.subgrid {
        println!("Subgrid: yes");
    }
}

fn show_areas(template: &str) {
    let matrix = grid::parse_areas(template);
    if matrix.is_empty() {
        println!("No areas");
        return;
    }

    for row in &matrix {
        println!("{}", row.join(" "));
    }
    println!();

    for name in grid::area_names(&matrix) {
        match grid::area_bounds(&matrix, &name) {
            Some(bounds) => {
                let (column, row) = grid::placement_from_bounds(&bounds);
                println!("{name}: grid-row {row}; grid-column {column}");
            }
            None => println!("{name}: not rectangular"),
        }
    }
}
