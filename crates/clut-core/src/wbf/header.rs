// crates/clut-core/src/wbf/header.rs

use crate::error::{ClutError, Result};
use crate::wbf::cursor::Cursor;

/// The only mode-table version this crate understands.
pub const SUPPORTED_MODE_VERSION: u8 = 0x19;

/// Size of the fixed header, i.e. the offset of the temperature table.
pub const HEADER_LEN: usize = 0x30;

/// Fixed-layout waveform file header (little-endian):
///
/// ```text
/// 0x00 checksum:u32        0x04 file_size:u32       0x08 serial:u32
/// 0x0c run_type:u8         0x0d fpl_platform:u8     0x0e fpl_lot:u16
/// 0x10 mode_version:u8     0x11 wf_version:u8       0x12 wf_subversion:u8
/// 0x13 wf_type:u8          0x14 panel_size:u8       0x15 amepd_part_number:u8
/// 0x16 wf_rev:u8           0x17 frame_rate_bcd:u8   0x18 frame_rate_hex:u8
/// 0x19 vcom_offset:u8      0x1a unknown[2]
/// 0x1c xwia[3]             0x1f cs1:u8
/// 0x20 wmta[3]             0x23 fvsn:u8             0x24 luts:u8
/// 0x25 mode_count:u8       0x26 temp_range_count:u8 0x27 advanced_wf_flags:u8
/// 0x28 eb:u8               0x29 sb:u8               0x2a reserved[5]
/// 0x2f cs2:u8
/// 0x30 temp_range_table[temp_range_count + 1]
/// ```
///
/// `mode_count` and `temp_range_count` are stored minus one; the values held
/// here are already corrected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WaveformHeader {
    pub checksum: u32,
    pub file_size: u32,
    pub serial: u32,
    pub run_type: u8,
    pub fpl_platform: u8,
    pub fpl_lot: u16,
    pub mode_version: u8,
    pub wf_version: u8,
    pub wf_subversion: u8,
    pub wf_type: u8,
    pub panel_size: u8,
    pub amepd_part_number: u8,
    pub wf_rev: u8,
    pub frame_rate_bcd: u8,
    pub frame_rate_hex: u8,
    pub vcom_offset: u8,
    pub unknown: [u8; 2],
    pub xwia: [u8; 3],
    pub cs1: u8,
    pub wmta: [u8; 3],
    pub fvsn: u8,
    pub luts: u8,
    pub mode_count: usize,
    pub temp_range_count: usize,
    pub advanced_wf_flags: u8,
    pub eb: u8,
    pub sb: u8,
    pub reserved: [u8; 5],
    pub cs2: u8,
    /// Ascending breakpoints; `temp_range_count + 1` of them.
    pub temperatures: Vec<u8>,
}

impl WaveformHeader {
    /// Byte offset of the mode-offset table.
    pub fn mode_table_offset(&self) -> usize {
        offset24(self.wmta)
    }

    pub fn xwia_offset(&self) -> usize {
        offset24(self.xwia)
    }
}

pub(crate) fn offset24(b: [u8; 3]) -> usize {
    b[0] as usize | (b[1] as usize) << 8 | (b[2] as usize) << 16
}

/// Parse the header and temperature table from the start of `bytes`.
pub fn parse_header(bytes: &[u8]) -> Result<WaveformHeader> {
    let mut c = Cursor::new(bytes);

    let checksum = c.take_u32()?;
    let file_size = c.take_u32()?;
    let serial = c.take_u32()?;
    let run_type = c.take_u8()?;
    let fpl_platform = c.take_u8()?;
    let fpl_lot = c.take_u16()?;

    let mode_version = c.take_u8()?;
    if mode_version != SUPPORTED_MODE_VERSION {
        return Err(ClutError::Format(format!(
            "unsupported mode version 0x{mode_version:02x} (want 0x{SUPPORTED_MODE_VERSION:02x})"
        )));
    }

    let wf_version = c.take_u8()?;
    let wf_subversion = c.take_u8()?;
    let wf_type = c.take_u8()?;
    let panel_size = c.take_u8()?;
    let amepd_part_number = c.take_u8()?;
    let wf_rev = c.take_u8()?;
    let frame_rate_bcd = c.take_u8()?;
    let frame_rate_hex = c.take_u8()?;
    let vcom_offset = c.take_u8()?;
    let unknown = [c.take_u8()?, c.take_u8()?];
    let xwia = c.take3()?;
    let cs1 = c.take_u8()?;
    let wmta = c.take3()?;
    let fvsn = c.take_u8()?;
    let luts = c.take_u8()?;
    // INIT is not counted in the stored mode count, and the band count is
    // stored off by one too.
    let mode_count = c.take_u8()? as usize + 1;
    let temp_range_count = c.take_u8()? as usize + 1;
    let advanced_wf_flags = c.take_u8()?;
    let eb = c.take_u8()?;
    let sb = c.take_u8()?;
    let r = c.take_exact(5)?;
    let reserved = [r[0], r[1], r[2], r[3], r[4]];
    let cs2 = c.take_u8()?;

    debug_assert_eq!(c.position(), HEADER_LEN);

    // N bands need N+1 delimiters.
    let temperatures = c.take_exact(temp_range_count + 1)?.to_vec();

    Ok(WaveformHeader {
        checksum,
        file_size,
        serial,
        run_type,
        fpl_platform,
        fpl_lot,
        mode_version,
        wf_version,
        wf_subversion,
        wf_type,
        panel_size,
        amepd_part_number,
        wf_rev,
        frame_rate_bcd,
        frame_rate_hex,
        vcom_offset,
        unknown,
        xwia,
        cs1,
        wmta,
        fvsn,
        luts,
        mode_count,
        temp_range_count,
        advanced_wf_flags,
        eb,
        sb,
        reserved,
        cs2,
        temperatures,
    })
}
