use bolero::check;
use hashgen::{evaluate, ContainerRef, HashUnitConfig, LogicalSelector, PhvBuffer};

const CONTAINERS: usize = 16;

fn phv(values: &[u32]) -> PhvBuffer {
    let mut values: Vec<u32> = values.iter().copied().take(CONTAINERS).collect();
    values.resize(CONTAINERS, 0);
    PhvBuffer::from_values(values)
}

#[test]
fn fuzz_affine_linearity() {
    // CRC-32 over ten 16-bit slots with a non-zero seed
    let mut builder = HashUnitConfig::builder(16, CONTAINERS)
        .selector(LogicalSelector::Crc {
            polynomial: 0x04C1_1DB7,
            width: 32,
            slots: (0..10).collect(),
            first_lane: 0,
        })
        .selector(LogicalSelector::Identity {
            slot: 10,
            lsb: 4,
            count: 12,
            first_lane: 40,
        })
        .seeds(&[0x5A, 0xC3, 0x01, 0x00, 0xFF])
        .group(0, u64::MAX)
        .group(5, 0xF0F0_F0F0_0000_FFFF);
    for slot in 0..11 {
        builder = builder.source(slot, ContainerRef((slot as u16 * 3) % CONTAINERS as u16));
    }
    let config = builder.build().unwrap();
    let zero = evaluate(&config, &PhvBuffer::new(CONTAINERS));

    check!()
        .with_type::<(Vec<u32>, Vec<u32>)>()
        .for_each(|(a, b)| {
            let (a, b) = (phv(a), phv(b));
            let ea = evaluate(&config, &a);
            let eb = evaluate(&config, &b);
            let eab = evaluate(&config, &a.xor(&b));

            assert_eq!(
                ea.lanes() ^ eb.lanes() ^ zero.lanes(),
                eab.lanes(),
                "h(a) ^ h(b) ^ h(0) != h(a ^ b)"
            );
            // group bits are linear in the lanes, so they inherit the property
            assert_eq!(ea.groups() ^ eb.groups() ^ zero.groups(), eab.groups());
        });
}
