//! Scaling analysis of parallel benchmark tables
//!
//! This crate reads benchmark CSV files (time, speedup and efficiency of a
//! parallel workload at several thread counts), averages repeated runs and
//! fits the classic scalability models to every (data size, kernel size)
//! experiment:
//!
//! - **Amdahl**: the serial fraction `f` is the intercept of a straight-line
//!   fit of `1/S` against `1/p`.
//! - **Karp–Flatt**: a per-thread-count serial fraction that also absorbs
//!   parallel overhead.
//! - **Gustafson**: measured scaled speedup against the ideal `S = p`.
//!
//! # Quick Start
//!
//! ```no_run
//! use scaling_rs::{StrongScalingConfig, analyze_strong, load_strong_scaling};
//! use scaling_rs::report::strong_summary;
//!
//! let groups = load_strong_scaling("kip_openMP_strongScaling.csv")?;
//! let config = StrongScalingConfig {
//!     physical_cores: 8,
//!     ..Default::default()
//! };
//! for group in &groups {
//!     let analysis = analyze_strong(group, &config)?;
//!     print!("{}", strong_summary(&analysis));
//! }
//! # Ok::<(), scaling_rs::ScalingError>(())
//! ```

pub mod analysis;
pub mod data;
pub mod error;
pub mod models;
pub mod report;

pub use analysis::{
    GustafsonRow, StrongAnalysis, StrongScalingConfig, WeakAnalysis, WeakScalingConfig,
    analyze_strong, analyze_weak,
};
pub use data::{
    GroupKey, ScalingGroup, StrongPoint, ThreadCount, WeakPoint, load_overview,
    load_strong_scaling, load_weak_scaling,
};
pub use error::{Result, ScalingError};
pub use models::{KarpFlattRow, LinearFit, SerialFractionFit};
pub use report::AnalysisReport;
