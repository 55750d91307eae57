pub mod batch;
pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod identity;
pub mod pipeline;
pub mod reporter;
pub mod selector;
pub mod utils;

pub use batch::{log_run_configuration, BatchRunner, BatchSummary};
pub use client::{
    parse_shrink_response, CompressionDescriptor, CompressionService, InputInfo, OutputInfo,
    ShrinkClient,
};
pub use config::{validate_concurrency, ClientOptions, Configuration, IdentityMode};
pub use error::{Result, ShrinkError};
pub use pipeline::{
    overwrite_file, process_file, CompressionReport, FailureReport, Outcome, PipelineStage, Tally,
};
pub use reporter::{Channel, ConsoleSink, FileSink, MemorySink, ReportSink, Reporter};
pub use selector::{select_files, CandidateFile};
