// crates/clut-cli/src/cmd/inspect.rs

use anyhow::Context;
use clap::Args;
use clut_core::wbf::WbfFile;
use clut_core::SourceMode;

use crate::io::bin;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Input waveform container (.wbf)
    #[arg(long)]
    pub r#in: String,

    /// Also print the resolved stream offset of every cell
    #[arg(long, default_value_t = false)]
    pub cells: bool,
}

pub fn run(args: InspectArgs) -> anyhow::Result<()> {
    let bytes = bin::read_bytes_file(&args.r#in)?;
    let file = WbfFile::parse(&bytes).with_context(|| format!("parse waveform {}", args.r#in))?;
    let h = &file.header;

    eprintln!("--- inspect ---");
    eprintln!("file              = {}", args.r#in);
    eprintln!("bytes             = {}", bytes.len());
    eprintln!("crc32             = {:08x}", bin::crc32(&bytes));
    eprintln!("file_size         = {}", h.file_size);
    eprintln!("serial            = {}", h.serial);
    eprintln!("mode_version      = 0x{:02x}", h.mode_version);
    eprintln!("wf_version        = {}.{}", h.wf_version, h.wf_subversion);
    eprintln!("wf_type           = {}", h.wf_type);
    eprintln!("panel_size        = {}", h.panel_size);
    eprintln!("frame_rate        = 0x{:02x}", h.frame_rate_hex);
    eprintln!("vcom_offset       = {}", h.vcom_offset);
    eprintln!("xwia              = 0x{:06x}", h.xwia_offset());
    eprintln!("mode_table        = 0x{:06x}", h.mode_table_offset());
    eprintln!("modes             = {}", h.mode_count);
    eprintln!("temp_bands        = {}", h.temp_range_count);
    eprintln!("temperatures      = {:?}", h.temperatures);

    eprintln!("--- offsets ---");
    for (mode, table) in file.offsets.temp_tables.iter().enumerate() {
        let name = SourceMode::ALL.get(mode).map_or("?", |m| m.name());
        eprintln!("mode[{mode}]          = {name} table 0x{table:06x}");
        if args.cells {
            for temp in 0..h.temp_range_count {
                let start = file.offsets.get(mode, temp)?;
                eprintln!("  temp[{temp}]        = 0x{start:06x}");
            }
        }
    }

    Ok(())
}
