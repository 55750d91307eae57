use crate::client::CompressionService;
use crate::constants::{ERROR_PREFIX, SUCCESS_PREFIX};
use crate::error::{Result, ShrinkError};
use crate::reporter::Reporter;
use crate::selector::CandidateFile;
use crate::utils::{format_kb, reduction_percent};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::NamedTempFile;

/// Where a single file's pipeline is, or where it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Idle,
    Submitting,
    SubmitFailed,
    Rejected,
    DescriptorReceived,
    Fetching,
    FetchFailed,
    Written,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompressionReport {
    pub path: PathBuf,
    pub original_size: u64,
    pub compressed_size: u64,
    pub ratio: f64,
    pub bytes_written: u64,
}

impl CompressionReport {
    pub fn reduction_percent(&self) -> f64 {
        reduction_percent(self.ratio)
    }

    pub fn message(&self) -> String {
        format!(
            "{} Compressed: reduced {:.2}%, original {}, compressed {}, file: {}",
            SUCCESS_PREFIX,
            self.reduction_percent(),
            format_kb(self.original_size),
            format_kb(self.compressed_size),
            self.path.display()
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FailureReport {
    pub path: PathBuf,
    pub stage: PipelineStage,
    pub reason: String,
}

impl FailureReport {
    pub fn message(&self) -> String {
        let what = match self.stage {
            PipelineStage::Rejected => "Compression rejected",
            PipelineStage::FetchFailed => "Retrieval failed",
            _ => "Request failed",
        };
        format!(
            "{} {}! file: {}, reason: {}",
            ERROR_PREFIX,
            what,
            self.path.display(),
            self.reason
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(CompressionReport),
    Failure(FailureReport),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn path(&self) -> &Path {
        match self {
            Outcome::Success(report) => &report.path,
            Outcome::Failure(report) => &report.path,
        }
    }
}

/// Success and failure counters shared by every pipeline of a batch.
#[derive(Debug, Default)]
pub struct Tally {
    succeeded: AtomicUsize,
    failed: AtomicUsize,
}

impl Tally {
    pub fn record_success(&self) {
        self.succeeded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn succeeded(&self) -> usize {
        self.succeeded.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::Relaxed)
    }
}

/// Runs submit, fetch and overwrite for one file.
///
/// Never returns an error: every failure is counted, reported and folded
/// into [`Outcome::Failure`] so sibling pipelines keep going.
pub async fn process_file<S>(
    service: &S,
    reporter: &Reporter,
    tally: &Tally,
    file: &CandidateFile,
) -> Outcome
where
    S: CompressionService + ?Sized,
{
    let outcome = match run_stages(service, file).await {
        Ok(report) => {
            tally.record_success();
            reporter.log(report.message());
            Outcome::Success(report)
        }
        Err((stage, error)) => {
            let reason = match error {
                ShrinkError::Rejected { message, .. } => message,
                other => other.to_string(),
            };
            let report = FailureReport {
                path: file.path.clone(),
                stage,
                reason,
            };
            tally.record_failure();
            reporter.error(report.message());
            Outcome::Failure(report)
        }
    };

    tracing::debug!(
        path = %file.path.display(),
        success = outcome.is_success(),
        "pipeline finished"
    );
    outcome
}

async fn run_stages<S>(
    service: &S,
    file: &CandidateFile,
) -> std::result::Result<CompressionReport, (PipelineStage, ShrinkError)>
where
    S: CompressionService + ?Sized,
{
    let mut stage = PipelineStage::Idle;
    let path = file.path.display();
    tracing::trace!(%path, ?stage, "pipeline start");

    stage = PipelineStage::Submitting;
    tracing::debug!(%path, ?stage, size = file.size, "stage");
    let image = tokio::fs::read(&file.path)
        .await
        .map_err(|e| (PipelineStage::SubmitFailed, ShrinkError::Io(e)))?;

    let descriptor = service.submit(image).await.map_err(|e| match e {
        ShrinkError::Rejected { .. } => (PipelineStage::Rejected, e),
        other => (PipelineStage::SubmitFailed, other),
    })?;

    stage = PipelineStage::DescriptorReceived;
    tracing::debug!(
        %path,
        ?stage,
        output_size = descriptor.output.size,
        output_type = %descriptor.output.mime_type,
        ratio = descriptor.output.ratio,
        "stage"
    );

    stage = PipelineStage::Fetching;
    tracing::debug!(%path, ?stage, url = %descriptor.output.url, "stage");
    let artifact = service
        .fetch(&descriptor)
        .await
        .map_err(|e| (PipelineStage::FetchFailed, e))?;

    let bytes_written = artifact.len() as u64;
    overwrite_file(&file.path, artifact)
        .await
        .map_err(|e| (PipelineStage::FetchFailed, e))?;

    stage = PipelineStage::Written;
    tracing::debug!(%path, ?stage, bytes_written, "stage");

    Ok(CompressionReport {
        path: file.path.clone(),
        original_size: descriptor.input.size,
        compressed_size: descriptor.output.size,
        ratio: descriptor.output.ratio,
        bytes_written,
    })
}

/// Replaces a file's contents as a whole: the new bytes land in a sibling
/// temporary file which is then renamed over the original.
pub async fn overwrite_file(path: &Path, bytes: Vec<u8>) -> Result<()> {
    let target = path.to_path_buf();
    let joined = tokio::task::spawn_blocking(move || replace_contents(&target, &bytes)).await;

    let outcome = match joined {
        Ok(inner) => inner,
        Err(e) => Err(io::Error::other(e)),
    };
    outcome.map_err(|source| ShrinkError::WriteFailed {
        path: path.to_path_buf(),
        source,
    })
}

fn replace_contents(path: &Path, bytes: &[u8]) -> io::Result<()> {
    // Resolve links so the real file is replaced, not the link
    let path = fs::canonicalize(path)?;
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let permissions = fs::metadata(&path)?.permissions();

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    temp.as_file().set_permissions(permissions)?;
    temp.persist(&path).map_err(|e| e.error)?;
    Ok(())
}
