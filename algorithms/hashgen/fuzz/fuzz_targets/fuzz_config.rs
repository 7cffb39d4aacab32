#![no_main]

use hashgen::{evaluate, seed_lanes, HashUnitConfig, HashUnitSpec, PhvBuffer};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // =============================================================================
    // PARSING
    // =============================================================================

    // Arbitrary JSON must either fail to parse, fail validation, or yield a
    // configuration that evaluates. Nothing may panic.
    let Ok(spec) = serde_json::from_slice::<HashUnitSpec>(data) else {
        return;
    };
    let containers = spec.container_count.min(4096);
    let Ok(config) = HashUnitConfig::try_from(spec) else {
        return;
    };

    // =============================================================================
    // EVALUATION
    // =============================================================================

    let zero = evaluate(&config, &PhvBuffer::new(containers));
    assert_eq!(zero.lanes(), seed_lanes(&config), "zero packet must hash to seed image");

    let ones = PhvBuffer::from_values(vec![u32::MAX; containers]);
    let eval = evaluate(&config, &ones);
    for view in eval.views(&config) {
        assert!(view.width <= 64, "view wider than a lane word");
        if view.width < 64 {
            assert_eq!(view.value >> view.width, 0, "view value exceeds its width");
        }
    }
});
