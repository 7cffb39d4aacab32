//! # `PractRand` Lane Stream
//!
//! Feeds an incrementing 64-bit counter through a fixed hash unit
//! configuration and writes the 64 lanes of every evaluation to stdout as
//! little-endian words.
//!
//! The unit is affine over GF(2), so neither mode is expected to pass a
//! statistical suite; the stream shows how quickly each configuration's
//! linear structure is detected.

use anyhow::{bail, Result};
use hashgen::{evaluate, ContainerRef, HashUnitConfig, LogicalSelector};
use std::io::{self, Write};

/// CRC-64/ECMA-182 polynomial.
const CRC64_POLY: u64 = 0x42F0_E1EB_A9EA_3693;

/// Counter low word in container 0, high word in container 1.
fn config_for(mode: &str) -> Result<HashUnitConfig> {
    let builder = HashUnitConfig::builder(32, 2)
        .source(0, ContainerRef(0))
        .source(1, ContainerRef(1));

    let builder = match mode {
        "identity" => builder
            .selector(LogicalSelector::Identity {
                slot: 0,
                lsb: 0,
                count: 32,
                first_lane: 0,
            })
            .selector(LogicalSelector::Identity {
                slot: 1,
                lsb: 0,
                count: 32,
                first_lane: 32,
            }),
        "crc" => builder
            .selector(LogicalSelector::Crc {
                polynomial: CRC64_POLY,
                width: 64,
                slots: vec![1, 0],
                first_lane: 0,
            })
            .seeds(&[0xFF, 0xFF]),
        other => bail!("unknown mode {other:?} (expected identity or crc)"),
    };
    Ok(builder.build()?)
}

/// Entry point for the `PractRand` lane stream.
fn main() -> Result<()> {
    let mode = std::env::args().nth(1).unwrap_or_else(|| "crc".to_owned());
    let config = config_for(&mode)?;

    let mut counter: u64 = 0;
    let stdout = io::stdout();
    let mut handle = io::BufWriter::new(stdout.lock());

    loop {
        #[allow(clippy::cast_possible_truncation)]
        let phv = [counter as u32, (counter >> 32) as u32];
        let lanes = evaluate(&config, &phv[..]).lanes();

        if handle.write_all(&lanes.to_le_bytes()).is_err() {
            break;
        }

        counter = counter.wrapping_add(1);
    }

    Ok(())
}
