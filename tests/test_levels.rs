use balloon_shooter::compute::{level_settings, next_threshold};
use balloon_shooter::entities::FIRST_LEVEL_THRESHOLD;

use proptest::prelude::*;

proptest! {
    #[test]
    fn settings_stay_in_bounds(level in 1u32..10_000) {
        let s = level_settings(level);
        prop_assert!(s.spawn_delay >= 10);
        prop_assert!(s.special_chance <= 0.5);
        prop_assert!(s.min_speed < s.max_speed);
    }

    #[test]
    fn settings_are_deterministic(level in 1u32..10_000) {
        prop_assert_eq!(level_settings(level), level_settings(level));
    }

    #[test]
    fn harder_levels_never_spawn_slower(level in 1u32..10_000) {
        prop_assert!(level_settings(level + 1).spawn_delay <= level_settings(level).spawn_delay);
    }

    #[test]
    fn thresholds_strictly_increase(steps in 1usize..30) {
        let mut t = FIRST_LEVEL_THRESHOLD;
        for _ in 0..steps {
            let next = next_threshold(t);
            prop_assert!(next > t);
            prop_assert_eq!(next, t * 3 / 2);
            t = next;
        }
    }
}
