pub mod load;
pub mod record;

pub use load::{
    STRONG_LAYOUT, TableLayout, WEAK_LAYOUT, load_overview, load_strong_scaling,
    load_weak_scaling, overview_from_frame, read_csv, read_csv_bytes, strong_scaling_from_frame,
    weak_scaling_from_frame,
};
pub use record::{GroupKey, ScalingGroup, StrongPoint, ThreadCount, WeakPoint};
