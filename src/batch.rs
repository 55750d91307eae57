use crate::client::CompressionService;
use crate::config::Configuration;
use crate::constants::{INFO_PREFIX, PROGRESS_BAR_TEMPLATE, SUCCESS_PREFIX, WARNING_PREFIX};
use crate::pipeline::{process_file, Outcome, Tally};
use crate::reporter::Reporter;
use crate::selector::CandidateFile;
use crate::utils::{calculate_compression_ratio, format_kb};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

/// Totals for one batch. Only meaningful once every pipeline has finished.
#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub bytes_before: u64,
    pub bytes_after: u64,
    pub elapsed: Duration,
    pub outcomes: Vec<Outcome>,
}

impl BatchSummary {
    fn empty() -> Self {
        Self {
            total: 0,
            succeeded: 0,
            failed: 0,
            bytes_before: 0,
            bytes_after: 0,
            elapsed: Duration::ZERO,
            outcomes: Vec::new(),
        }
    }

    /// True when no file matched the filters and nothing was attempted.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// `succeeded / total`, or `None` for an empty batch.
    pub fn success_rate(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(self.succeeded as f64 / self.total as f64)
    }

    pub fn message(&self) -> String {
        let rate = match self.success_rate() {
            Some(rate) => format!("{:.2}%", rate * 100.0),
            None => "n/a".to_string(),
        };
        format!(
            "{} Finished: {} succeeded, {} failed of {}, success rate {}, {} -> {} ({:.1}% saved) in {:.2?}",
            SUCCESS_PREFIX,
            self.succeeded,
            self.failed,
            self.total,
            rate,
            format_kb(self.bytes_before),
            format_kb(self.bytes_after),
            calculate_compression_ratio(self.bytes_before, self.bytes_after),
            self.elapsed
        )
    }
}

/// Logs the run configuration and how many files are waiting.
pub fn log_run_configuration(reporter: &Reporter, config: &Configuration, file_count: usize) {
    reporter.log(format!("{} Run configuration:", INFO_PREFIX));
    for line in config.describe() {
        reporter.log(format!("  {}", line));
    }
    reporter.log(format!("{} Files waiting to be processed: {}", INFO_PREFIX, file_count));
}

/// Fans the pipeline out over a set of candidates and waits for all of them.
pub struct BatchRunner<S> {
    service: S,
    reporter: Reporter,
    concurrency: Option<usize>,
    progress: ProgressBar,
}

impl<S: CompressionService> BatchRunner<S> {
    pub fn new(service: S, reporter: Reporter) -> Self {
        Self {
            service,
            reporter,
            concurrency: None,
            progress: ProgressBar::hidden(),
        }
    }

    /// Caps the number of pipelines in flight. `None` starts them all at once.
    pub fn with_concurrency(mut self, concurrency: Option<usize>) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Processes every file and returns the aggregate once all pipelines are
    /// terminal. A failing file never cancels its siblings.
    pub async fn run(&self, files: &[CandidateFile]) -> BatchSummary {
        if files.is_empty() {
            self.reporter.log(format!(
                "{}  No matching image files found, nothing to compress",
                WARNING_PREFIX
            ));
            return BatchSummary::empty();
        }

        let start_time = Instant::now();
        let total = files.len();
        let limit = self.concurrency.unwrap_or(total).max(1);

        self.reporter
            .log(format!("{} Starting image compression, please wait...", INFO_PREFIX));
        tracing::debug!(total, limit, "launching pipelines");

        self.progress.set_length(total as u64);
        if let Ok(style) = ProgressStyle::default_bar().template(PROGRESS_BAR_TEMPLATE) {
            self.progress.set_style(style.progress_chars("#>-"));
        }

        let tally = Tally::default();
        let outcomes: Vec<Outcome> = stream::iter(files)
            .map(|file| {
                let tally = &tally;
                async move {
                    let outcome = process_file(&self.service, &self.reporter, tally, file).await;
                    self.progress.inc(1);
                    outcome
                }
            })
            .buffer_unordered(limit)
            .collect()
            .await;

        self.progress.finish_and_clear();

        let (bytes_before, bytes_after) = outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                Outcome::Success(report) => Some((report.original_size, report.compressed_size)),
                Outcome::Failure(_) => None,
            })
            .fold((0u64, 0u64), |(before, after), (b, a)| (before + b, after + a));

        let summary = BatchSummary {
            total,
            succeeded: tally.succeeded(),
            failed: tally.failed(),
            bytes_before,
            bytes_after,
            elapsed: start_time.elapsed(),
            outcomes,
        };
        self.reporter.log(summary.message());
        summary
    }
}
