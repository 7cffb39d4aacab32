//! Check Command
//!
//! Validate configuration files (in parallel, reported in input order).

use super::load_config;
use anyhow::Result;
use rayon::prelude::*;
use std::path::PathBuf;

// =============================================================================
// CHECK
// =============================================================================

/// Load every config and report `OK` or the first error per file.
pub fn check_configs(configs: &[PathBuf]) -> Result<()> {
    let results: Vec<_> = configs
        .par_iter()
        .map(|path| load_config(path).map(|config| config.crossbar().enabled_count()))
        .collect();

    let mut failed = 0;
    for (path, result) in configs.iter().zip(&results) {
        match result {
            Ok(enabled) => println!("{}: OK ({} slots enabled)", path.display(), enabled),
            Err(e) => {
                println!("{}: FAILED ({:#})", path.display(), e);
                failed += 1;
            }
        }
    }

    println!();
    if failed == 0 {
        println!("All {} configurations valid", configs.len());
    } else {
        eprintln!(
            "WARNING: {} of {} configurations were rejected",
            failed,
            configs.len()
        );
        std::process::exit(1);
    }

    Ok(())
}
