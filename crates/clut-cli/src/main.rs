// crates/clut-cli/src/main.rs

use clap::{Parser, Subcommand};
use tracing::Level;

mod cmd;
mod io;

#[derive(Parser)]
#[command(name = "wbf2clut")]
#[command(about = "Waveform (.wbf / .iwf) to compact CLUT0002 table converter", long_about = None)]
pub struct Cli {
    /// Log library diagnostics (decode/summarise/build) to stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a waveform container (or .iwf descriptor) into a compact table
    Convert(cmd::convert::ConvertArgs),

    /// Inspect a waveform container (header, temperatures, offset tables, crc32)
    Inspect(cmd::inspect::InspectArgs),

    /// Dump one decoded cell (or one transition) of a waveform container
    Dump(cmd::dump::DumpArgs),

    /// Inspect a compact table file (bands, bounds, mode offsets)
    ClutInfo(cmd::clut_info::ClutInfoArgs),

    /// Play one packed cell back through the two-counter simulator
    Sim(cmd::sim::SimArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Commands::Convert(args) => cmd::convert::run(args),
        Commands::Inspect(args) => cmd::inspect::run(args),
        Commands::Dump(args) => cmd::dump::run(args),
        Commands::ClutInfo(args) => cmd::clut_info::run(args),
        Commands::Sim(args) => cmd::sim::run(args),
    }
}
