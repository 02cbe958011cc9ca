use clap::{Args, Parser, Subcommand};
use scaling_rs::{StrongScalingConfig, WeakScalingConfig};
use std::path::PathBuf;

/// Scaling - strong and weak scaling analysis of parallel benchmarks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "scaling")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory the charts are written to
    #[arg(short, long, value_name = "OUTPUT_DIR", default_value = ".", global = true)]
    pub output_dir: PathBuf,

    /// Save the analysis as a JSON report
    #[arg(long, value_name = "REPORT_PATH", global = true)]
    pub report: Option<PathBuf>,

    /// Skip chart rendering
    #[arg(long, global = true)]
    pub no_plots: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Amdahl and Karp–Flatt analysis of a strong-scaling table
    Strong(StrongArgs),
    /// Gustafson analysis of a weak-scaling table
    Weak(WeakArgs),
    /// Time, speedup and efficiency overview of a results table
    Overview(OverviewArgs),
}

#[derive(Args, Debug)]
pub struct StrongArgs {
    /// Strong-scaling CSV (ImageDimension, KernelDimension, NumThreads,
    /// TimePerRep_s, SpeedUp, Efficiency)
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Physical cores of the benchmark machine; higher thread counts run
    /// on logical cores
    #[arg(value_name = "PHYS_CORES", default_value_t = StrongScalingConfig::default().physical_cores)]
    pub physical_cores: u32,

    /// Minimum relative time improvement over the previous thread count
    #[arg(value_name = "MIN_RELATIVE_TIME", default_value_t = StrongScalingConfig::default().min_relative_time)]
    pub min_relative_time: f64,

    /// Minimum speedup gain over the previous thread count
    #[arg(value_name = "MIN_MARGINAL_SPEEDUP", default_value_t = StrongScalingConfig::default().min_marginal_speedup)]
    pub min_marginal_speedup: f64,

    /// Minimum efficiency
    #[arg(value_name = "MIN_EFFICIENCY", default_value_t = StrongScalingConfig::default().min_efficiency)]
    pub min_efficiency: f64,
}

impl StrongArgs {
    pub fn config(&self) -> StrongScalingConfig {
        StrongScalingConfig {
            physical_cores: self.physical_cores,
            min_relative_time: self.min_relative_time,
            min_marginal_speedup: self.min_marginal_speedup,
            min_efficiency: self.min_efficiency,
        }
    }
}

#[derive(Args, Debug)]
pub struct WeakArgs {
    /// Weak-scaling CSV (UnitOfWork, KernelDimension, NumThreads,
    /// TimePerRep_s, WeakEfficiency, ScaledSpeedUp, Throughput_Mpix_s)
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Minimum weak efficiency and relative throughput
    #[arg(value_name = "MIN_EFFICIENCY", default_value_t = WeakScalingConfig::default().min_efficiency)]
    pub min_efficiency: f64,

    /// Maximum time as a multiple of the single-thread time
    #[arg(value_name = "MAX_RELATIVE_TIME", default_value_t = WeakScalingConfig::default().max_relative_time)]
    pub max_relative_time: f64,
}

impl WeakArgs {
    pub fn config(&self) -> WeakScalingConfig {
        WeakScalingConfig {
            min_efficiency: self.min_efficiency,
            max_relative_time: self.max_relative_time,
        }
    }
}

#[derive(Args, Debug)]
pub struct OverviewArgs {
    /// Results CSV (ImageDimension, KernelDimension, NumThreads,
    /// TimePerRep_s, SpeedUp)
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,
}
