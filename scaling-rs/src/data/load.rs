//! CSV ingestion and group-by aggregation of benchmark tables
//!
//! Rows sharing (data key, kernel size, thread count) are averaged, then
//! split into one [`ScalingGroup`] per (data key, kernel size), each sorted
//! by thread count.

use crate::data::record::{GroupKey, ScalingGroup, StrongPoint, WeakPoint};
use crate::error::{Result, ScalingError};
use itertools::Itertools;
use polars::prelude::*;
use std::fs::File;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

pub const KERNEL_COLUMN: &str = "KernelDimension";
pub const THREADS_COLUMN: &str = "NumThreads";
pub const TIME_COLUMN: &str = "TimePerRep_s";

/// Column layout of one benchmark table variant
#[derive(Debug, Clone, Copy)]
pub struct TableLayout {
    /// Column holding the data size (first half of the group key)
    pub key_column: &'static str,
    /// Numeric columns averaged per (key, kernel, threads)
    pub metrics: &'static [&'static str],
}

/// Strong scaling: fixed image, growing thread count
pub const STRONG_LAYOUT: TableLayout = TableLayout {
    key_column: "ImageDimension",
    metrics: &[TIME_COLUMN, "SpeedUp", "Efficiency"],
};

/// Weak scaling: work grows with the thread count
pub const WEAK_LAYOUT: TableLayout = TableLayout {
    key_column: "UnitOfWork",
    metrics: &[
        TIME_COLUMN,
        "WeakEfficiency",
        "ScaledSpeedUp",
        "Throughput_Mpix_s",
    ],
};

/// Read a CSV file with a header row into a DataFrame
pub fn read_csv(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    debug!("Reading benchmark table from {}", path.display());
    let file = File::open(path)?;
    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .into_reader_with_file_handle(file)
        .finish()?;
    debug!("Read {} row(s), columns {:?}", frame.height(), frame.get_column_names());
    Ok(frame)
}

/// Read CSV text held in memory into a DataFrame
pub fn read_csv_bytes(bytes: impl Into<Vec<u8>>) -> Result<DataFrame> {
    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .into_reader_with_file_handle(Cursor::new(bytes.into()))
        .finish()?;
    Ok(frame)
}

fn require_columns(frame: &DataFrame, columns: &[&str]) -> Result<()> {
    let names = frame.get_column_names();
    for column in columns {
        if !names.iter().any(|name| name.as_str() == *column) {
            return Err(ScalingError::MissingColumn(column.to_string()));
        }
    }
    Ok(())
}

/// Average every metric per (key, kernel, threads)
fn aggregate_means(frame: LazyFrame, layout: &TableLayout) -> Result<DataFrame> {
    let means: Vec<Expr> = layout
        .metrics
        .iter()
        .map(|metric| col(*metric).cast(DataType::Float64).mean().alias(*metric))
        .collect();

    let aggregated = frame
        .with_columns([
            col(layout.key_column).cast(DataType::String),
            col(KERNEL_COLUMN).cast(DataType::Int64),
            col(THREADS_COLUMN).cast(DataType::Int64),
        ])
        .group_by([
            col(layout.key_column),
            col(KERNEL_COLUMN),
            col(THREADS_COLUMN),
        ])
        .agg(means)
        .collect()?;
    Ok(aggregated)
}

/// One aggregated row: group key, thread count and the layout's metrics in order
type AggregateRow = (GroupKey, u32, Vec<f64>);

fn missing(column: &str, row: usize) -> ScalingError {
    ScalingError::MissingValue {
        column: column.to_string(),
        row,
    }
}

fn extract_rows(frame: &DataFrame, layout: &TableLayout) -> Result<Vec<AggregateRow>> {
    let keys = frame.column(layout.key_column)?.str()?;
    let kernels = frame.column(KERNEL_COLUMN)?.i64()?;
    let threads = frame.column(THREADS_COLUMN)?.i64()?;
    let metrics = layout
        .metrics
        .iter()
        .map(|metric| frame.column(metric).and_then(|c| c.f64()))
        .collect::<PolarsResult<Vec<_>>>()?;

    let mut rows = Vec::with_capacity(frame.height());
    for row in 0..frame.height() {
        let key = keys
            .get(row)
            .ok_or_else(|| missing(layout.key_column, row))?;
        let kernel = kernels
            .get(row)
            .ok_or_else(|| missing(KERNEL_COLUMN, row))?;
        let thread_count = threads
            .get(row)
            .ok_or_else(|| missing(THREADS_COLUMN, row))?;
        let thread_count = u32::try_from(thread_count)
            .ok()
            .filter(|t| *t > 0)
            .ok_or(ScalingError::InvalidThreadCount(thread_count))?;

        let values = metrics
            .iter()
            .zip(layout.metrics)
            .map(|(values, name)| values.get(row).ok_or_else(|| missing(name, row)))
            .collect::<Result<Vec<f64>>>()?;

        rows.push((GroupKey::new(key, kernel), thread_count, values));
    }
    Ok(rows)
}

/// Sort aggregated rows and split them into one group per key
fn into_groups<P>(
    mut rows: Vec<AggregateRow>,
    make_point: impl Fn(u32, &[f64]) -> P,
) -> Vec<ScalingGroup<P>> {
    rows.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));

    let mut groups = Vec::new();
    for (key, chunk) in &rows.iter().chunk_by(|row| row.0.clone()) {
        let points = chunk
            .map(|(_, threads, values)| make_point(*threads, values))
            .collect();
        groups.push(ScalingGroup { key, points });
    }
    groups
}

fn group_frame<P>(
    frame: LazyFrame,
    layout: &TableLayout,
    make_point: impl Fn(u32, &[f64]) -> P,
) -> Result<Vec<ScalingGroup<P>>> {
    let aggregated = aggregate_means(frame, layout)?;
    let rows = extract_rows(&aggregated, layout)?;
    let groups = into_groups(rows, make_point);
    debug!(
        "Aggregated {} row(s) into {} group(s)",
        aggregated.height(),
        groups.len()
    );
    Ok(groups)
}

fn strong_point(threads: u32, values: &[f64]) -> StrongPoint {
    StrongPoint {
        threads,
        time_per_rep: values[0],
        speedup: values[1],
        efficiency: values[2],
    }
}

/// Group a strong-scaling table (`ImageDimension`, `KernelDimension`,
/// `NumThreads`, `TimePerRep_s`, `SpeedUp`, `Efficiency`)
pub fn strong_scaling_from_frame(frame: DataFrame) -> Result<Vec<ScalingGroup<StrongPoint>>> {
    require_columns(&frame, &[STRONG_LAYOUT.key_column, KERNEL_COLUMN, THREADS_COLUMN])?;
    require_columns(&frame, STRONG_LAYOUT.metrics)?;
    group_frame(frame.lazy(), &STRONG_LAYOUT, strong_point)
}

/// Group a weak-scaling table (`UnitOfWork`, `KernelDimension`, `NumThreads`,
/// `TimePerRep_s`, `WeakEfficiency`, `ScaledSpeedUp`, `Throughput_Mpix_s`)
pub fn weak_scaling_from_frame(frame: DataFrame) -> Result<Vec<ScalingGroup<WeakPoint>>> {
    require_columns(&frame, &[WEAK_LAYOUT.key_column, KERNEL_COLUMN, THREADS_COLUMN])?;
    require_columns(&frame, WEAK_LAYOUT.metrics)?;
    group_frame(frame.lazy(), &WEAK_LAYOUT, |threads, values| WeakPoint {
        threads,
        time_per_rep: values[0],
        weak_efficiency: values[1],
        scaled_speedup: values[2],
        throughput: values[3],
    })
}

/// Group a raw results table, recomputing `Efficiency = SpeedUp / NumThreads`
/// on every row before averaging
///
/// Any `Efficiency` column already present is replaced.
pub fn overview_from_frame(frame: DataFrame) -> Result<Vec<ScalingGroup<StrongPoint>>> {
    require_columns(
        &frame,
        &[
            STRONG_LAYOUT.key_column,
            KERNEL_COLUMN,
            THREADS_COLUMN,
            TIME_COLUMN,
            "SpeedUp",
        ],
    )?;
    let with_efficiency = frame.lazy().with_column(
        (col("SpeedUp").cast(DataType::Float64) / col(THREADS_COLUMN).cast(DataType::Float64))
            .alias("Efficiency"),
    );
    group_frame(with_efficiency, &STRONG_LAYOUT, strong_point)
}

pub fn load_strong_scaling(path: impl AsRef<Path>) -> Result<Vec<ScalingGroup<StrongPoint>>> {
    strong_scaling_from_frame(read_csv(path)?)
}

pub fn load_weak_scaling(path: impl AsRef<Path>) -> Result<Vec<ScalingGroup<WeakPoint>>> {
    weak_scaling_from_frame(read_csv(path)?)
}

pub fn load_overview(path: impl AsRef<Path>) -> Result<Vec<ScalingGroup<StrongPoint>>> {
    overview_from_frame(read_csv(path)?)
}
