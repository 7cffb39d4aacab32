//! Matrix Command
//!
//! Dump the programmed cells of a configuration.

use super::load_config;
use anyhow::Result;
use std::path::Path;

/// Print one `lane slot mask` line per non-zero cell, lane-major.
pub fn dump_matrix(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let width = config.word_width();
    let digits = width.div_ceil(4) as usize;

    println!(
        "# word width {}, kernel {}",
        width,
        hashgen::active_kernel(&config)
    );
    let mut cells = 0;
    for (lane, slot, mask) in config.matrix().nonzero_cells() {
        println!("{lane:2} {slot:2} {mask:#0w$x}", w = digits + 2);
        cells += 1;
    }
    println!("# {cells} non-zero cells");

    Ok(())
}
