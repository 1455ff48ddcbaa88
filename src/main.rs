use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use monodiff::config::Config;
use monodiff::engine::{CompareOptions, Granularity, Session, ViewMode};
use monodiff::render::{RenderOptions, render_comparison};
use std::fs;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ViewArg {
    Unified,
    Split,
}

impl From<ViewArg> for ViewMode {
    fn from(value: ViewArg) -> Self {
        match value {
            ViewArg::Unified => ViewMode::Unified,
            ViewArg::Split => ViewMode::Split,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GranularityArg {
    Line,
    Word,
    Char,
}

impl From<GranularityArg> for Granularity {
    fn from(value: GranularityArg) -> Self {
        match value {
            GranularityArg::Line => Granularity::Line,
            GranularityArg::Word => Granularity::Word,
            GranularityArg::Char => Granularity::Char,
        }
    }
}

/// Two-sided text/JSON comparison in the terminal.
#[derive(Debug, Parser)]
#[command(name = "monodiff", version)]
struct Cli {
    /// Base (left) input file; omit both files to reuse the last-used inputs
    base: Option<PathBuf>,

    /// Target (right) input file
    target: Option<PathBuf>,

    /// Render unified or side-by-side
    #[arg(long, value_enum)]
    view: Option<ViewArg>,

    /// Compare by lines, words or characters
    #[arg(long, value_enum)]
    granularity: Option<GranularityArg>,

    /// Collapse unchanged context (lines) or window to changed sentences (inline)
    #[arg(long)]
    only_changes: bool,

    /// Expand collapsed unchanged runs in place
    #[arg(long)]
    expand: bool,

    /// Pretty-print JSON object/array inputs before comparing
    #[arg(long)]
    beautify: bool,

    /// Plain markers instead of colors
    #[arg(long)]
    no_color: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::default();

    let mut options = CompareOptions {
        view: config.settings.view,
        granularity: config.settings.granularity,
        only_changes: config.settings.only_changes,
    };
    if let Some(view) = cli.view {
        options.view = view.into();
    }
    if let Some(granularity) = cli.granularity {
        options.granularity = granularity.into();
    }
    if cli.only_changes {
        options.only_changes = true;
    }

    let (base, target) = match (&cli.base, &cli.target) {
        (Some(base), Some(target)) => (
            fs::read_to_string(base)
                .with_context(|| format!("failed to read {}", base.display()))?,
            fs::read_to_string(target)
                .with_context(|| format!("failed to read {}", target.display()))?,
        ),
        (Some(_), None) => bail!("a target input file is required alongside the base file"),
        _ => config
            .load_last_inputs()
            .context("no input files given and no stored inputs to fall back on")?,
    };

    let mut session = Session::new(options);
    session.compare(base, target);
    if cli.beautify {
        session.beautify_inputs();
    }

    match session.current() {
        Some(comparison) => {
            let render_options = RenderOptions {
                color: !cli.no_color,
                expand: cli.expand,
            };
            print!("{}", render_comparison(comparison, &render_options));
        }
        None => println!("0 / 0"),
    }

    // Persist preferences and input snapshots for the next session;
    // losing them loses convenience, not correctness.
    config.settings.view = options.view;
    config.settings.granularity = options.granularity;
    config.settings.only_changes = options.only_changes;
    if let Err(e) = config.save() {
        warn!("Failed to persist preferences: {}", e);
    }
    let (base, target) = session.inputs();
    config.store_last_inputs(base, target);

    Ok(())
}
