use scaling_rs::GroupKey;

/// Every chart the analyses can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// 1/SpeedUp against 1/NumThreads with the serial-fraction fits
    AmdahlEstimate,
    /// Amdahl curves for each Karp–Flatt fraction and for the fits
    AmdahlEvaluation,
    /// Time, speedup and efficiency against thread count
    StrongScaling,
    /// Scaled speedup against the ideal y = p
    GustafsonEvaluation,
    /// Weak efficiency, throughput and time against thread count
    WeakScaling,
    /// Time and speedup with efficiency-coloured markers
    StrongOverview,
}

impl ChartKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            ChartKind::AmdahlEstimate => "amdahl_estimate",
            ChartKind::AmdahlEvaluation => "amdahl_evaluation",
            ChartKind::StrongScaling => "strong_scaling",
            ChartKind::GustafsonEvaluation => "gustafson_evaluation",
            ChartKind::WeakScaling => "weak_scaling",
            ChartKind::StrongOverview => "Strong_scaling",
        }
    }

    /// `<prefix>_<data>_<kernel>.png`
    pub fn file_name(&self, key: &GroupKey) -> String {
        format!("{}_{}_{}.png", self.prefix(), key.data, key.kernel)
    }

    /// Output size in pixels
    pub fn size(&self) -> (u32, u32) {
        match self {
            ChartKind::AmdahlEstimate | ChartKind::GustafsonEvaluation => (1050, 750),
            ChartKind::AmdahlEvaluation
            | ChartKind::StrongScaling
            | ChartKind::StrongOverview => (1200, 900),
            ChartKind::WeakScaling => (1350, 900),
        }
    }

    pub fn title(&self, key: &GroupKey) -> String {
        let (data, k) = (&key.data, key.kernel);
        match self {
            ChartKind::AmdahlEstimate => format!("Estimate f: {data} images | {k} kernels"),
            ChartKind::AmdahlEvaluation => {
                format!("Amdahl curve evaluation: {data} images | {k}x{k} kernels")
            }
            ChartKind::StrongScaling => format!("Strong Scaling: {data} images | {k}x{k} kernels"),
            ChartKind::GustafsonEvaluation => {
                format!("Gustafson's law evaluation: W₀ = {data} images | {k}x{k} kernels")
            }
            ChartKind::WeakScaling => format!("Weak Scaling: W₀ = {data} images | {k}x{k} kernels"),
            ChartKind::StrongOverview => format!("Strong scaling: {data} images | {k}x{k} kernels"),
        }
    }
}
