/// Events emitted while a plot is loaded, drawn and exported.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    /// Loading or rendering has begun.
    PhaseStart { name: &'static str },
    PhaseFinish,

    /// Export is about to encode `total_steps` output files.
    TaskStart { total_steps: u64 },
    /// One output file has been encoded and staged.
    TaskIncrement,
    /// Every output file is in place.
    TaskFinish,

    /// A data warning worth showing next to the progress display.
    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    /// Runs `work` between a `PhaseStart` and a `PhaseFinish`.
    ///
    /// `PhaseFinish` is sent whether or not `work` succeeds, so a failed
    /// load never leaves a spinner running.
    pub fn phase<T>(&self, name: &'static str, work: impl FnOnce() -> T) -> T {
        self.report(Progress::PhaseStart { name });
        let result = work();
        self.report(Progress::PhaseFinish);
        result
    }
}
