use bolero::check;
use hashgen::{evaluate, seed_lanes, ContainerRef, HashUnitConfig, LogicalSelector, PhvBuffer};

/// (kind, slot, lsb or CRC width, count, mask or polynomial, first lane)
type SelectorIntent = (u8, u8, u32, u32, u64, usize);

type Plan = (
    u8,
    u8,
    Vec<(u8, u16, bool)>,
    Vec<(u8, u8, u64)>,
    Vec<u8>,
    Vec<SelectorIntent>,
);

fn selector(&(kind, slot, a, count, bits, first_lane): &SelectorIntent) -> LogicalSelector {
    let slot = usize::from(slot);
    // high bit keeps the lane near the valid range, otherwise anything goes
    let first_lane = if kind & 0x80 == 0 {
        first_lane
    } else {
        first_lane % 128
    };
    match kind % 3 {
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
            slots: vec![slot, usize::from(kind) % 52],
            first_lane,
        },
    }
}

#[test]
fn fuzz_config_build() {
    check!()
        .with_type::<Plan>()
        .for_each(|(width, containers, slots, cells, seeds, selectors)| {
            // =============================================================================
            // RAW INTENTS
            // =============================================================================

            // Logic: widths, indices and masks are deliberately allowed out of
            // range. The builder has to reject them, never panic or clamp.
            let containers = usize::from(*containers);
            let mut builder = HashUnitConfig::builder(u32::from(*width), containers);
            for &(slot, container, enabled) in slots {
                let source = (container != u16::MAX).then_some(ContainerRef(container));
                builder = builder.assign(usize::from(slot), source, enabled);
            }
            for &(lane, slot, mask) in cells {
                builder = builder.cell(usize::from(lane), usize::from(slot), mask);
            }
            builder = builder.seeds(seeds);
            for intent in selectors {
                builder = builder.selector(selector(intent));
            }

            // =============================================================================
            // VERIFICATION
            // =============================================================================

            match builder.build() {
                Ok(config) => {
                    assert!((1..=32).contains(&config.word_width()));
                    let zero = PhvBuffer::new(containers);
                    assert_eq!(
                        evaluate(&config, &zero).lanes(),
                        seed_lanes(&config),
                        "zero packet must hash to the seed image"
                    );
                    for (lane, slot, mask) in config.matrix().nonzero_cells() {
                        assert!(lane < 64 && slot < 52);
                        assert_eq!(u64::from(mask) & !hashgen::low_mask(config.word_width()), 0);
                    }
                }
                Err(err) => {
                    assert!(!err.to_string().is_empty(), "error without a message");
                    // same intents, same verdict
                    assert_eq!(builder.build().err(), Some(err));
                }
            }
        });
}
