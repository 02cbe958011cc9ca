//! Karp–Flatt experimentally determined serial fraction.

use serde::Serialize;

/// Karp–Flatt serial fraction for one (threads, speedup) measurement
///
/// f_p = (1/S - 1/p) / (1 - 1/p)
///
/// Unlike the Amdahl fit this absorbs parallel overhead: a value that grows
/// with `p` points at synchronisation or memory costs that scale with threads.
/// Defined only for `p > 1` and `S > 0`.
pub fn karp_flatt(threads: u32, speedup: f64) -> Option<f64> {
    if threads <= 1 || speedup <= 0.0 || !speedup.is_finite() {
        return None;
    }
    let p = threads as f64;
    Some((1.0 / speedup - 1.0 / p) / (1.0 - 1.0 / p))
}

/// One row of the per-thread-count Karp–Flatt table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KarpFlattRow {
    pub threads: u32,
    pub speedup: f64,
    pub serial_fraction: f64,
}

/// Karp–Flatt rows for every measurement where the metric is defined
pub fn karp_flatt_table(samples: &[(u32, f64)]) -> Vec<KarpFlattRow> {
    samples
        .iter()
        .filter_map(|&(threads, speedup)| {
            karp_flatt(threads, speedup).map(|serial_fraction| KarpFlattRow {
                threads,
                speedup,
                serial_fraction,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_speedup_has_no_serial_fraction() {
        assert_relative_eq!(karp_flatt(8, 8.0).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_no_speedup_is_fully_serial() {
        assert_relative_eq!(karp_flatt(4, 1.0).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_known_value() {
        // (1/3 - 1/4) / (3/4) = 1/9
        assert_relative_eq!(karp_flatt(4, 3.0).unwrap(), 1.0 / 9.0, epsilon = 1e-12);
    }

    #[test]
    fn test_undefined_domain() {
        assert_eq!(karp_flatt(1, 1.0), None);
        assert_eq!(karp_flatt(0, 1.0), None);
        assert_eq!(karp_flatt(4, 0.0), None);
    }

    #[test]
    fn test_table_skips_sequential_rows() {
        let rows = karp_flatt_table(&[(1, 1.0), (2, 1.8), (4, 3.0)]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].threads, 2);
        assert_eq!(rows[1].threads, 4);
    }
}
