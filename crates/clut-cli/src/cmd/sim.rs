// crates/clut-cli/src/cmd/sim.rs

use clap::Args;
use clut_core::sim::Sim;
use clut_core::LutMode;

use crate::io::bin;

#[derive(Args, Debug)]
pub struct SimArgs {
    /// Input table (CLUT0002)
    #[arg(long)]
    pub r#in: String,

    /// Ambient temperature used to pick the band
    #[arg(long, allow_hyphen_values = true)]
    pub temperature: i32,

    /// Table mode: DU, DU4, GL16, GC16, INIT or IDLE
    #[arg(long)]
    pub mode: LutMode,

    #[arg(long)]
    pub src: u8,

    #[arg(long)]
    pub dst: u8,

    /// Frames to play
    #[arg(long, default_value_t = 64)]
    pub steps: usize,
}

pub fn run(args: SimArgs) -> anyhow::Result<()> {
    let file = bin::read_clut_file(&args.r#in)?;
    let Some(band) = file.select_band(args.temperature) else {
        anyhow::bail!("table has no bands");
    };

    let runs = band.sequence(args.mode, args.src, args.dst)?;
    let mut sim = Sim::new(band);
    let history = sim.run(args.steps, args.src, args.dst, args.mode)?;

    eprintln!("--- sim ---");
    eprintln!("band     = [{}, {}]", band.temp_lower, band.temp_upper);
    eprintln!("mode     = {} (offset {})", args.mode, band.offset(args.mode));
    eprintln!("cell     = {} -> {}", args.src, args.dst);
    eprintln!(
        "runs     = [{}]",
        runs.iter()
            .map(|r| format!("({},{})", r.phase, r.len))
            .collect::<Vec<_>>()
            .join(" ")
    );
    eprintln!("frames   = {}", history.len());
    eprintln!("history  = {history:?}");

    Ok(())
}
