mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, OverviewArgs, StrongArgs, WeakArgs};
use scaling_plots::{
    AmdahlEstimatePlot, AmdahlEvaluationPlot, ChartKind, GustafsonPlot, OverviewPlot, Plot,
    ScalingPlotOptions, StrongScalingPlot, WeakScalingPlot,
};
use scaling_rs::report::{GroupFailure, overview_summary, strong_summary, weak_summary};
use scaling_rs::{
    AnalysisReport, GroupKey, ScalingGroup, StrongAnalysis, StrongPoint, WeakAnalysis,
    analyze_strong, analyze_weak, load_overview, load_strong_scaling, load_weak_scaling,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, error, info, warn};

/// Renders charts into the output directory, or nothing with `--no-plots`
struct ChartWriter {
    output_dir: Option<PathBuf>,
}

impl ChartWriter {
    fn new(cli: &Cli) -> Result<Self> {
        if cli.no_plots {
            debug!("Chart rendering disabled");
            return Ok(Self { output_dir: None });
        }
        std::fs::create_dir_all(&cli.output_dir).with_context(|| {
            format!("failed to create output directory {}", cli.output_dir.display())
        })?;
        Ok(Self {
            output_dir: Some(cli.output_dir.clone()),
        })
    }

    fn write<P>(&self, plot: &P, kind: ChartKind, key: &GroupKey, data: &P::Data) -> Result<()>
    where
        P: Plot<Options = ScalingPlotOptions>,
    {
        let Some(dir) = &self.output_dir else {
            return Ok(());
        };
        let options = ScalingPlotOptions::for_chart(kind, key);
        let bytes = plot
            .render(data, &options)
            .with_context(|| format!("failed to render {} chart", kind.prefix()))?;
        let path = dir.join(kind.file_name(key));
        std::fs::write(&path, bytes)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("Saved {}", path.display());
        Ok(())
    }
}

/// Successful analyses and per-group failures of one run
struct Outcome<T> {
    analyses: Vec<T>,
    failures: Vec<GroupFailure>,
}

impl<T> Outcome<T> {
    fn new() -> Self {
        Self {
            analyses: Vec::new(),
            failures: Vec::new(),
        }
    }

    fn record(&mut self, key: &GroupKey, result: Result<T>) {
        match result {
            Ok(analysis) => self.analyses.push(analysis),
            Err(e) => {
                error!("Couple {} failed: {:#}", key, e);
                self.failures.push(GroupFailure {
                    group: key.to_string(),
                    error: format!("{e:#}"),
                });
            }
        }
    }
}

fn write_report(path: &Path, report: &AnalysisReport) -> Result<()> {
    report
        .write_json(path)
        .with_context(|| format!("failed to write report {}", path.display()))?;
    info!("Saved report to {}", path.display());
    Ok(())
}

fn run_strong(cli: &Cli, args: &StrongArgs) -> Result<usize> {
    let config = args.config();
    info!(
        "Strong scaling analysis of {} ({} physical cores)",
        args.csv.display(),
        config.physical_cores
    );
    let groups = load_strong_scaling(&args.csv)
        .with_context(|| format!("failed to load {}", args.csv.display()))?;
    if groups.is_empty() {
        warn!("{} has no data rows", args.csv.display());
    }
    let charts = ChartWriter::new(cli)?;

    let mut outcome: Outcome<StrongAnalysis> = Outcome::new();
    for group in &groups {
        let result = analyze_strong(group, &config)
            .map_err(anyhow::Error::from)
            .and_then(|analysis| -> Result<StrongAnalysis> {
                print!("{}", strong_summary(&analysis));
                charts.write(&AmdahlEstimatePlot, ChartKind::AmdahlEstimate, &analysis.key, &analysis)?;
                charts.write(&AmdahlEvaluationPlot, ChartKind::AmdahlEvaluation, &analysis.key, &analysis)?;
                charts.write(&StrongScalingPlot, ChartKind::StrongScaling, &analysis.key, &analysis)?;
                Ok(analysis)
            });
        outcome.record(&group.key, result);
    }

    let failed = outcome.failures.len();
    if let Some(path) = &cli.report {
        let report = AnalysisReport::Strong {
            input: args.csv.display().to_string(),
            config,
            groups: outcome.analyses,
            failures: outcome.failures,
        };
        write_report(path, &report)?;
    }
    Ok(failed)
}

fn run_weak(cli: &Cli, args: &WeakArgs) -> Result<usize> {
    let config = args.config();
    info!("Weak scaling analysis of {}", args.csv.display());
    let groups = load_weak_scaling(&args.csv)
        .with_context(|| format!("failed to load {}", args.csv.display()))?;
    if groups.is_empty() {
        warn!("{} has no data rows", args.csv.display());
    }
    let charts = ChartWriter::new(cli)?;

    let mut outcome: Outcome<WeakAnalysis> = Outcome::new();
    for group in &groups {
        let result = analyze_weak(group, &config)
            .map_err(anyhow::Error::from)
            .and_then(|analysis| -> Result<WeakAnalysis> {
                print!("{}", weak_summary(&analysis));
                charts.write(&GustafsonPlot, ChartKind::GustafsonEvaluation, &analysis.key, &analysis)?;
                charts.write(&WeakScalingPlot, ChartKind::WeakScaling, &analysis.key, &analysis)?;
                Ok(analysis)
            });
        outcome.record(&group.key, result);
    }

    let failed = outcome.failures.len();
    if let Some(path) = &cli.report {
        let report = AnalysisReport::Weak {
            input: args.csv.display().to_string(),
            config,
            groups: outcome.analyses,
            failures: outcome.failures,
        };
        write_report(path, &report)?;
    }
    Ok(failed)
}

fn run_overview(cli: &Cli, args: &OverviewArgs) -> Result<usize> {
    info!("Scaling overview of {}", args.csv.display());
    let groups = load_overview(&args.csv)
        .with_context(|| format!("failed to load {}", args.csv.display()))?;
    if groups.is_empty() {
        warn!("{} has no data rows", args.csv.display());
    }
    let charts = ChartWriter::new(cli)?;

    let mut outcome: Outcome<ScalingGroup<StrongPoint>> = Outcome::new();
    for group in groups {
        print!("{}", overview_summary(&group));
        let key = group.key.clone();
        let result = charts
            .write(&OverviewPlot, ChartKind::StrongOverview, &group.key, &group)
            .map(|()| group);
        outcome.record(&key, result);
    }

    let failed = outcome.failures.len();
    if let Some(path) = &cli.report {
        let report = AnalysisReport::Overview {
            input: args.csv.display().to_string(),
            groups: outcome.analyses,
            failures: outcome.failures,
        };
        write_report(path, &report)?;
    }
    Ok(failed)
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // RUST_LOG takes precedence over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let failed = match &cli.command {
        Command::Strong(args) => run_strong(&cli, args)?,
        Command::Weak(args) => run_weak(&cli, args)?,
        Command::Overview(args) => run_overview(&cli, args)?,
    };

    if failed > 0 {
        error!("{} couple(s) could not be analysed", failed);
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
