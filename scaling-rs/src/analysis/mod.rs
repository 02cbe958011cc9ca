pub mod strong;
pub mod weak;

pub use strong::{StrongAnalysis, StrongScalingConfig, analyze_strong};
pub use weak::{GustafsonRow, WeakAnalysis, WeakScalingConfig, analyze_weak};
