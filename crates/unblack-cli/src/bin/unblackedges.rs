use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use unblack_core::io::image_io::save_png;
use unblack_core::io::pnm::{read_pbm, write_pbm, PbmFormat};
use unblack_core::{clear_edges_with, ClearConfig, TraversalOrder};
use unblack_cli::input::{input_name, open_input};
use unblack_cli::summary::print_clear_summary;

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    /// Stack worklist
    Dfs,
    /// Queue worklist
    Bfs,
}

impl From<OrderArg> for TraversalOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Dfs => TraversalOrder::DepthFirst,
            OrderArg::Bfs => TraversalOrder::BreadthFirst,
        }
    }
}

#[derive(Parser)]
#[command(
    name = "unblackedges",
    about = "Clear black pixels connected to the border of a PBM image"
)]
#[command(version)]
struct Cli {
    /// Input PBM file (reads stdin when omitted)
    file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Worklist order, overrides the config file
    #[arg(long, value_enum)]
    order: Option<OrderArg>,

    /// Write raw (P4) output instead of plain (P1)
    #[arg(long)]
    raw: bool,

    /// Also save a PNG preview of the result
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Print run statistics to stderr
    #[arg(long)]
    stats: bool,

    /// Print the effective config as TOML and exit
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    fn effective_config(&self) -> Result<ClearConfig> {
        let mut config = match &self.config {
            Some(path) => ClearConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ClearConfig::default(),
        };
        if let Some(order) = self.order {
            config.order = order.into();
        }
        if self.raw {
            config.output = PbmFormat::Raw;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    unblack_cli::init_tracing(cli.verbose);

    let config = cli.effective_config()?;
    if cli.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let name = input_name(cli.file.as_deref());
    let reader = open_input(cli.file.as_deref())?;
    let mut grid = read_pbm(reader).with_context(|| format!("Failed to read {name}"))?;
    info!(
        input = %name,
        width = grid.width(),
        height = grid.height(),
        "Loaded bitmap"
    );

    let stats = clear_edges_with(&mut grid, &config);

    let stdout = io::stdout().lock();
    write_pbm(&grid, BufWriter::new(stdout), config.output)
        .context("Failed to write bitmap")?;

    if let Some(ref path) = cli.preview {
        save_png(&grid, path)
            .with_context(|| format!("Failed to save preview {}", path.display()))?;
        info!(path = %path.display(), "Preview saved");
    }

    if cli.stats {
        print_clear_summary(&name, &grid, &config, &stats);
    }

    Ok(())
}
