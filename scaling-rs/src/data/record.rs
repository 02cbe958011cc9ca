use serde::Serialize;
use std::fmt;

/// Identifies one scaling experiment: the data size and the kernel size
///
/// `data` is the image dimension (strong scaling) or the unit of work
/// (weak scaling), kept as text since it is written as e.g. `3840x2160`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct GroupKey {
    pub data: String,
    pub kernel: i64,
}

impl GroupKey {
    pub fn new(data: impl Into<String>, kernel: i64) -> Self {
        Self {
            data: data.into(),
            kernel,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, kernel={})", self.data, self.kernel)
    }
}

/// Anything measured at a given thread count
pub trait ThreadCount {
    fn threads(&self) -> u32;
}

/// Mean strong-scaling measurements at one thread count
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StrongPoint {
    pub threads: u32,
    pub time_per_rep: f64,
    pub speedup: f64,
    pub efficiency: f64,
}

impl ThreadCount for StrongPoint {
    fn threads(&self) -> u32 {
        self.threads
    }
}

/// Mean weak-scaling measurements at one thread count
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeakPoint {
    pub threads: u32,
    pub time_per_rep: f64,
    pub weak_efficiency: f64,
    pub scaled_speedup: f64,
    /// Mega-pixels processed per second
    pub throughput: f64,
}

impl ThreadCount for WeakPoint {
    fn threads(&self) -> u32 {
        self.threads
    }
}

/// Aggregated measurements of one experiment, sorted by thread count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalingGroup<P> {
    pub key: GroupKey,
    pub points: Vec<P>,
}

impl<P: ThreadCount> ScalingGroup<P> {
    pub fn max_threads(&self) -> u32 {
        self.points.iter().map(ThreadCount::threads).max().unwrap_or(0)
    }

    /// The single-thread measurement, if the experiment has one
    pub fn baseline(&self) -> Option<&P> {
        self.points.iter().find(|p| p.threads() == 1)
    }

    pub fn thread_counts(&self) -> Vec<u32> {
        self.points.iter().map(ThreadCount::threads).collect()
    }
}

impl ScalingGroup<StrongPoint> {
    /// (threads, speedup) pairs for the model fits
    pub fn speedup_samples(&self) -> Vec<(u32, f64)> {
        self.points.iter().map(|p| (p.threads, p.speedup)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(threads: u32) -> StrongPoint {
        StrongPoint {
            threads,
            time_per_rep: 1.0 / threads as f64,
            speedup: threads as f64,
            efficiency: 1.0,
        }
    }

    #[test]
    fn test_group_key_display_and_order() {
        let a = GroupKey::new("1920x1080", 7);
        let b = GroupKey::new("1920x1080", 13);
        let c = GroupKey::new("3840x2160", 7);
        assert_eq!(a.to_string(), "(1920x1080, kernel=7)");
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_group_helpers() {
        let group = ScalingGroup {
            key: GroupKey::new("1920x1080", 7),
            points: vec![point(1), point(2), point(4)],
        };
        assert_eq!(group.max_threads(), 4);
        assert_eq!(group.baseline().map(|p| p.threads), Some(1));
        assert_eq!(group.thread_counts(), vec![1, 2, 4]);
        assert_eq!(group.speedup_samples()[2], (4, 4.0));
    }
}
