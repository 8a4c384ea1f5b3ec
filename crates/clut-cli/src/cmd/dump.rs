// crates/clut-cli/src/cmd/dump.rs

use anyhow::Context;
use clap::Args;
use clut_core::waveform::summary::{summarise, summarise_matrix};
use clut_core::wbf::WbfFile;
use clut_core::LutMode;

use crate::io::bin;

#[derive(Args, Debug)]
pub struct DumpArgs {
    /// Input waveform container (.wbf)
    #[arg(long)]
    pub r#in: String,

    /// Table mode: DU, DU4, GL16, GC16 or INIT
    #[arg(long)]
    pub mode: LutMode,

    /// Temperature band index
    #[arg(long)]
    pub temp: usize,

    /// Source gray level; with --dst prints one transition instead of the cell
    #[arg(long, requires = "dst")]
    pub src: Option<u8>,

    /// Destination gray level
    #[arg(long, requires = "src")]
    pub dst: Option<u8>,

    /// Write the decoded cell bytes to this path
    #[arg(long)]
    pub out: Option<String>,
}

pub fn run(args: DumpArgs) -> anyhow::Result<()> {
    let bytes = bin::read_bytes_file(&args.r#in)?;
    let file = WbfFile::parse(&bytes).with_context(|| format!("parse waveform {}", args.r#in))?;
    let Some(source) = args.mode.source() else {
        anyhow::bail!("{} has no cell in the container", args.mode);
    };
    let index = source.index();
    let decoded = file
        .decode_cell(index, args.temp)
        .with_context(|| format!("decode cell mode={} temp={}", args.mode, args.temp))?;
    let matrix = file.cell(index, args.temp)?;

    eprintln!("--- dump ---");
    eprintln!("mode          = {} (index {index})", args.mode);
    eprintln!("temp          = {}", args.temp);
    eprintln!("stream_bytes  = {}", decoded.consumed);
    eprintln!("decoded_bytes = {}", decoded.data.len());
    eprintln!("frames        = {}", matrix.frames());

    if let (Some(src), Some(dst)) = (args.src, args.dst) {
        if src >= 32 || dst >= 32 {
            anyhow::bail!("gray level out of range: src={src} dst={dst}");
        }
        let row = matrix.row(src, dst);
        eprintln!("transition    = {src} -> {dst}");
        eprintln!("phases        = {row:?}");
        let runs: Vec<String> = summarise(row)
            .iter()
            .map(|r| format!("({},{})", r.phase, r.len))
            .collect();
        eprintln!("runs          = [{}]", runs.join(" "));
    } else {
        let summaries = summarise_matrix(&matrix);
        let longest = summaries.iter().map(|s| s.len()).max().unwrap_or(0);
        eprintln!("active        = {}", summaries.len());
        eprintln!("longest       = {longest}");
    }

    if let Some(out) = args.out.as_deref() {
        bin::write_bytes_file(out, &decoded.data)?;
        eprintln!("out           = {} ({} bytes)", out, decoded.data.len());
    }

    Ok(())
}
