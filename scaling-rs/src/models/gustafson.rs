//! Gustafson's law: the problem grows with the thread count.

/// Ideal scaled speedup on `p` threads (the identity line y = p)
pub fn ideal_scaled_speedup(threads: f64) -> f64 {
    threads
}

/// Scaled speedup predicted for serial fraction `f` on `p` threads
///
/// S = p - f (p - 1)
pub fn gustafson_speedup(serial_fraction: f64, threads: f64) -> f64 {
    threads - serial_fraction * (threads - 1.0)
}

/// Serial fraction implied by a measured scaled speedup
///
/// Inverse of [`gustafson_speedup`]; defined only for `p > 1`.
pub fn gustafson_serial_fraction(threads: u32, scaled_speedup: f64) -> Option<f64> {
    if threads <= 1 {
        return None;
    }
    let p = threads as f64;
    Some((p - scaled_speedup) / (p - 1.0))
}
