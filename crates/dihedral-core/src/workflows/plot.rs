use crate::core::io::dat::{self, DatError};
use crate::render::config::{ChartVariant, RenderConfig};
use crate::render::error::RenderError;
use crate::render::export::OutputFiles;
use crate::render::progress::{Progress, ProgressReporter};
use crate::render::renderer::Renderer;
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, instrument, warn};

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("Failed to load '{}': {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: DatError,
    },

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// What to plot and where the two output files go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotRequest {
    pub input: PathBuf,
    pub step_multiplier: NonZeroU64,
    pub output_base: PathBuf,
}

impl PlotRequest {
    /// Plots `input` into `<stem>.pdf`/`<stem>.png` in the current directory.
    pub fn new(input: impl Into<PathBuf>, step_multiplier: NonZeroU64) -> Self {
        let input = input.into();
        let output_base = output_base_for(&input, Path::new(""));
        Self {
            input,
            step_multiplier,
            output_base,
        }
    }

    pub fn output_dir(mut self, dir: &Path) -> Self {
        self.output_base = output_base_for(&self.input, dir);
        self
    }
}

/// The input file name with its extension stripped, placed in `dir`.
pub fn output_base_for(input: &Path, dir: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_else(|| input.as_os_str());
    dir.join(stem)
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotSummary {
    pub points: usize,
    pub step_range: Option<(u64, u64)>,
    pub out_of_domain: usize,
    pub outputs: OutputFiles,
}

#[instrument(skip_all, name = "plot_workflow", fields(input = %request.input.display()))]
pub fn run(
    request: &PlotRequest,
    config: &RenderConfig,
    reporter: &ProgressReporter,
) -> Result<PlotSummary, PlotError> {
    let series = reporter
        .phase("Loading dihedral series", || {
            dat::load(&request.input, request.step_multiplier)
        })
        .map_err(|source| PlotError::Load {
            path: request.input.clone(),
            source,
        })?;

    let steps = series.steps();
    let step_range = steps.as_slice().first().copied().zip(steps.max());
    info!(
        "Loaded {} angle(s), steps {:?}, multiplier {}",
        series.len(),
        step_range,
        request.step_multiplier
    );

    let out_of_domain = series.angles().out_of_domain_count();
    if out_of_domain > 0 {
        warn!(
            "{} angle(s) lie outside [-180, 180] and may fall outside the plotted range",
            out_of_domain
        );
        reporter.report(Progress::Message(format!(
            "{out_of_domain} angle(s) outside [-180, 180]"
        )));
    }

    let phase = match config.variant {
        ChartVariant::Full => "Rendering full-range chart",
        ChartVariant::ShortTwist(_) => "Rendering short-twist chart",
    };
    let outputs = reporter.phase(phase, || {
        Renderer::new(config.clone()).render(&series, &request.output_base, reporter)
    })?;

    Ok(PlotSummary {
        points: series.len(),
        step_range,
        out_of_domain,
        outputs,
    })
}
