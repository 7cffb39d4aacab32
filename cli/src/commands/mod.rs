//! CLI Commands
//!
//! All hashgen CLI commands organized as separate modules.

mod check;
mod eval;
mod matrix;

pub use check::check_configs;
pub use eval::eval_phv;
pub use matrix::dump_matrix;

use anyhow::{Context, Result};
use hashgen::{HashUnitConfig, HashUnitSpec};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Parse and validate one JSON configuration.
pub fn load_config(path: &Path) -> Result<HashUnitConfig> {
    let file =
        File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
    let spec: HashUnitSpec = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid JSON: {}", path.display()))?;
    let config = HashUnitConfig::try_from(spec)
        .with_context(|| format!("Invalid configuration: {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        kernel = hashgen::active_kernel(&config),
        "configuration loaded"
    );
    Ok(config)
}
