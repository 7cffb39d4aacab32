//! Eval Command
//!
//! One-shot evaluation of a header vector given on the command line or in
//! a file.

use super::load_config;
use anyhow::{bail, Context, Result};
use hashgen::{evaluate, PhvBuffer};
use std::fs;
use std::path::Path;

/// Parse `0x`-prefixed hex or decimal.
fn parse_value(text: &str) -> Result<u32> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => text.parse(),
    };
    parsed.with_context(|| format!("Invalid container value: {text}"))
}

fn read_phv_file(path: &Path) -> Result<Vec<u32>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read: {}", path.display()))?;
    text.lines()
        .map(|line| line.split('#').next().unwrap_or_default().trim())
        .filter(|line| !line.is_empty())
        .map(parse_value)
        .collect()
}

// =============================================================================
// EVAL
// =============================================================================

/// Evaluate one header vector and print lanes, group bits and views.
pub fn eval_phv(config_path: &Path, phv_path: Option<&Path>, values: &[String]) -> Result<()> {
    let config = load_config(config_path)?;

    let mut containers = match phv_path {
        Some(path) => read_phv_file(path)?,
        None => Vec::new(),
    };
    for value in values {
        containers.push(parse_value(value)?);
    }
    if containers.len() > config.container_count() {
        bail!(
            "{} container values given, configuration has {} containers",
            containers.len(),
            config.container_count()
        );
    }
    containers.resize(config.container_count(), 0);

    let eval = evaluate(&config, &PhvBuffer::from_values(containers));

    println!("lanes:  {:#018x}", eval.lanes());
    println!("groups: {:#010b}", eval.groups());
    for (view, value) in config.outputs().views().iter().zip(eval.views(&config)) {
        println!(
            "{} ({}, {}): {}",
            view.name, view.consumer, value.width, value
        );
    }

    Ok(())
}
