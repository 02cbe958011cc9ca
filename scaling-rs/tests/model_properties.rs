//! Property tests for the closed-form scalability models

use proptest::prelude::*;
use scaling_rs::models::{
    amdahl_speedup, efficiency, gustafson_serial_fraction, gustafson_speedup, karp_flatt,
    serial_fraction_fit,
};

proptest! {
    /// The Karp–Flatt fraction plugged back into Amdahl's law reproduces the speedup
    #[test]
    fn karp_flatt_inverts_amdahl(threads in 2u32..=256, speedup in 0.05f64..256.0) {
        let f = karp_flatt(threads, speedup).unwrap();
        let back = amdahl_speedup(f, threads as f64);
        prop_assert!((back - speedup).abs() <= 1e-9 * speedup.max(1.0));
    }

    #[test]
    fn efficiency_is_bounded_by_linear_speedup(threads in 1u32..=256, ratio in 0.0f64..=1.0) {
        let speedup = ratio * threads as f64;
        let e = efficiency(speedup, threads as f64);
        prop_assert!((0.0..=1.0 + 1e-12).contains(&e));
    }

    /// A planted serial fraction is recovered by the reciprocal fit
    #[test]
    fn fit_recovers_planted_fraction(f in 0.0f64..0.95, max_exp in 2u32..7) {
        let samples: Vec<(u32, f64)> = (0..=max_exp)
            .map(|e| 1u32 << e)
            .map(|p| (p, amdahl_speedup(f, p as f64)))
            .collect();
        let fit = serial_fraction_fit(&samples).unwrap();
        prop_assert!((fit.serial_fraction - f).abs() < 1e-9);
        prop_assert!((fit.slope - (1.0 - f)).abs() < 1e-9);
    }

    #[test]
    fn gustafson_fraction_inverts_speedup(threads in 2u32..=256, f in 0.0f64..=1.0) {
        let scaled = gustafson_speedup(f, threads as f64);
        let back = gustafson_serial_fraction(threads, scaled).unwrap();
        prop_assert!((back - f).abs() < 1e-9);
    }
}
