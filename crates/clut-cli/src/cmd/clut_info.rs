// crates/clut-cli/src/cmd/clut_info.rs

use anyhow::Context;
use clap::Args;
use clut_core::{ClutFile, LutMode};

use crate::io::bin;

#[derive(Args, Debug)]
pub struct ClutInfoArgs {
    /// Input table (CLUT0002)
    #[arg(long)]
    pub r#in: String,

    /// Also report which band the loader would pick for this temperature
    #[arg(long, allow_hyphen_values = true)]
    pub temperature: Option<i32>,
}

pub fn run(args: ClutInfoArgs) -> anyhow::Result<()> {
    let bytes = bin::read_bytes_file(&args.r#in)?;
    let file = ClutFile::decode(&bytes).with_context(|| format!("decode table {}", args.r#in))?;

    eprintln!("--- clut-info ---");
    eprintln!("file   = {}", args.r#in);
    eprintln!("bytes  = {}", bytes.len());
    eprintln!("crc32  = {:08x}", bin::crc32(&bytes));
    eprintln!("bands  = {}", file.bands.len());
    for (i, band) in file.bands.iter().enumerate() {
        let offsets: Vec<String> = LutMode::ALL
            .iter()
            .map(|m| format!("{}={}", m, band.offset(*m)))
            .collect();
        eprintln!(
            "band[{i}] = [{}, {}] {}",
            band.temp_lower,
            band.temp_upper,
            offsets.join(" ")
        );
    }

    if let Some(t) = args.temperature {
        match file.select_band(t) {
            Some(b) => eprintln!("select({t}) = [{}, {}]", b.temp_lower, b.temp_upper),
            None => eprintln!("select({t}) = none"),
        }
    }

    Ok(())
}
