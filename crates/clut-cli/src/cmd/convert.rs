// crates/clut-cli/src/cmd/convert.rs

use std::path::Path;

use anyhow::Context;
use clap::Args;
use clut_core::waveform::iwf::load_iwf;
use clut_core::{convert, ConvertConfig, LutMode, Waveform};

use crate::io::bin;

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input waveform container (.wbf), or descriptor with --iwf
    #[arg(long)]
    pub r#in: String,

    /// Treat --in as a text descriptor (.iwf) with sibling CSV tables
    #[arg(long, default_value_t = false)]
    pub iwf: bool,

    /// Output table path
    #[arg(long, default_value = "custom_wf.bin")]
    pub out: String,

    /// Skip replaying packed cells through the simulator
    #[arg(long, default_value_t = false)]
    pub no_verify: bool,

    /// Pre-fill idle slots with a waiting sequence of N frames
    #[arg(long)]
    pub idle_delay: Option<u32>,
}

pub fn run(args: ConvertArgs) -> anyhow::Result<()> {
    let wf = if args.iwf {
        load_iwf(Path::new(&args.r#in)).with_context(|| format!("load descriptor {}", args.r#in))?
    } else {
        let bytes = bin::read_bytes_file(&args.r#in)?;
        Waveform::from_wbf(&bytes).with_context(|| format!("parse waveform {}", args.r#in))?
    };

    let cfg = ConvertConfig {
        verify: !args.no_verify,
        idle_delay: args.idle_delay,
    };
    let file = convert(&wf, &cfg).context("build table")?;
    let out = file.encode();
    bin::write_bytes_file(&args.out, &out)?;

    let present: Vec<&str> = LutMode::ALL
        .iter()
        .filter(|m| wf.has_mode(**m))
        .map(|m| m.name())
        .collect();

    eprintln!("--- convert ---");
    eprintln!("in          = {}", args.r#in);
    eprintln!("out         = {}", args.out);
    eprintln!("modes       = {}", present.join(","));
    eprintln!("temps       = {:?}", wf.temps);
    eprintln!("bands       = {}", file.bands.len());
    eprintln!("verified    = {}", cfg.verify);
    if let Some(d) = cfg.idle_delay {
        eprintln!("idle_delay  = {d}");
    }
    for (i, band) in file.bands.iter().enumerate() {
        eprintln!(
            "band[{i}]     = [{}, {}] offsets={:?}",
            band.temp_lower, band.temp_upper, band.offsets
        );
    }
    eprintln!("bytes       = {}", out.len());
    eprintln!("crc32       = {:08x}", bin::crc32(&out));

    Ok(())
}
