pub mod amdahl;
pub mod gustafson;
pub mod karp_flatt;
pub mod regression;

pub use amdahl::{
    CURVE_SAMPLES, SerialFractionFit, amdahl_curve, amdahl_speedup, linspace,
    physical_serial_fraction_fit, reciprocal_points, serial_fraction_fit,
};
pub use gustafson::{gustafson_serial_fraction, gustafson_speedup, ideal_scaled_speedup};
pub use karp_flatt::{KarpFlattRow, karp_flatt, karp_flatt_table};
pub use regression::{LinearFit, linear_fit};

/// Parallel efficiency: speedup divided by thread count
pub fn efficiency(speedup: f64, threads: f64) -> f64 {
    speedup / threads
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_efficiency() {
        assert_relative_eq!(efficiency(6.0, 8.0), 0.75);
        assert_relative_eq!(efficiency(1.0, 1.0), 1.0);
    }
}
