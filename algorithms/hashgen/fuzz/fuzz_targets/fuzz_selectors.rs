#![no_main]

use hashgen::{translate, ConfigError, HashUnitConfig, LogicalSelector, LANE_COUNT};
use libfuzzer_sys::fuzz_target;

fn u32_at(bytes: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[..4]);
    u32::from_le_bytes(buf)
}

fn u64_at(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[..8]);
    u64::from_le_bytes(buf)
}

fuzz_target!(|data: &[u8]| {
    // =============================================================================
    // PREPARATION
    // =============================================================================

    // Byte 0 picks the word width; every following 26-byte record is one
    // selector: kind, slot, lsb/width (4), count (4), mask/polynomial (8),
    // first lane (8). Lanes and widths span their full integer range.
    let Some((&w, records)) = data.split_first() else {
        return;
    };
    let word_width = u32::from(w % 34);

    let selectors: Vec<LogicalSelector> = records
        .chunks_exact(26)
        .map(|r| {
            let slot = usize::from(r[1]);
            let a = u32_at(&r[2..]);
            let count = u32_at(&r[6..]);
            let bits = u64_at(&r[10..]);
            let first_lane = u64_at(&r[18..]) as usize;
            match r[0] % 3 {
                0 => LogicalSelector::Cell {
                    lane: first_lane,
                    slot,
                    mask: bits,
                },
                1 => LogicalSelector::Identity {
                    slot,
                    lsb: a,
                    count,
                    first_lane,
                },
                _ => LogicalSelector::Crc {
                    polynomial: bits,
                    width: a,
                    slots: vec![slot, usize::from(r[0]) % 52],
                    first_lane,
                },
            }
        })
        .collect();

    // =============================================================================
    // 1. TRANSLATION
    // =============================================================================

    for selector in &selectors {
        match translate(selector, word_width.max(1)) {
            Ok(updates) => {
                if !matches!(selector, LogicalSelector::Cell { .. }) {
                    assert!(
                        updates.iter().all(|u| u.lane < LANE_COUNT),
                        "translated update outside the lane range"
                    );
                }
            }
            Err(ConfigError::LaneIndex { lane }) => {
                assert!(lane >= LANE_COUNT as u64, "in-range lane reported as error");
            }
            Err(_) => {}
        }
    }

    // =============================================================================
    // 2. BUILD
    // =============================================================================

    let builder = selectors
        .into_iter()
        .fold(HashUnitConfig::builder(word_width, 1), |b, s| b.selector(s));
    let _ = builder.build();
});
