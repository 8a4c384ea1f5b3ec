// crates/clut-cli/src/io/bin.rs

use anyhow::Context;
use clut_core::ClutFile;

pub fn read_bytes_file(path: &str) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("read {path}"))
}

pub fn write_bytes_file(path: &str, bytes: &[u8]) -> anyhow::Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("write {path}"))
}

/// Read and validate a CLUT0002 table file.
pub fn read_clut_file(path: &str) -> anyhow::Result<ClutFile> {
    let bytes = read_bytes_file(path)?;
    ClutFile::decode(&bytes).with_context(|| format!("decode table {path}"))
}

pub fn crc32(bytes: &[u8]) -> u32 {
    let mut h = crc32fast::Hasher::new();
    h.update(bytes);
    h.finalize()
}
