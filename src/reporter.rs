//! Human readable progress and result stream.
//!
//! The reporter owns no global state: every destination is a [`ReportSink`]
//! handed to it at construction, so tests can capture output in memory.

use crate::constants::{STDERR_LOG_FILE, STDOUT_LOG_FILE};
use crate::error::Result;
use indicatif::ProgressBar;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Log,
    Error,
}

pub trait ReportSink: Send + Sync {
    fn write_line(&self, channel: Channel, line: &str) -> io::Result<()>;
}

/// Mirrors messages to stdout and stderr.
#[derive(Default, Clone)]
pub struct ConsoleSink {
    progress: Option<ProgressBar>,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prints above the given bar instead of tearing through it.
    pub fn with_progress(progress: ProgressBar) -> Self {
        Self {
            progress: Some(progress),
        }
    }
}

impl ReportSink for ConsoleSink {
    fn write_line(&self, channel: Channel, line: &str) -> io::Result<()> {
        let print = || match channel {
            Channel::Log => println!("{}", line),
            Channel::Error => eprintln!("{}", line),
        };
        match &self.progress {
            Some(pb) => pb.suspend(print),
            None => print(),
        }
        Ok(())
    }
}

/// Two append-only text logs, one per channel.
#[derive(Debug)]
pub struct FileSink {
    stdout: Mutex<File>,
    stderr: Mutex<File>,
}

impl FileSink {
    /// Opens (creating if needed) both log files inside `dir`.
    pub fn open(dir: &Path) -> Result<Self> {
        Ok(Self {
            stdout: Mutex::new(open_append(&dir.join(STDOUT_LOG_FILE))?),
            stderr: Mutex::new(open_append(&dir.join(STDERR_LOG_FILE))?),
        })
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

impl ReportSink for FileSink {
    fn write_line(&self, channel: Channel, line: &str) -> io::Result<()> {
        let target = match channel {
            Channel::Log => &self.stdout,
            Channel::Error => &self.stderr,
        };
        let mut file = target
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        writeln!(file, "{}", line)
    }
}

/// Keeps every line in memory. Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<(Channel, String)>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(Channel, String)> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    pub fn logs(&self) -> Vec<String> {
        self.on_channel(Channel::Log)
    }

    pub fn errors(&self) -> Vec<String> {
        self.on_channel(Channel::Error)
    }

    fn on_channel(&self, channel: Channel) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(c, _)| *c == channel)
            .map(|(_, line)| line)
            .collect()
    }
}

impl ReportSink for MemorySink {
    fn write_line(&self, channel: Channel, line: &str) -> io::Result<()> {
        self.lines
            .lock()
            .map_err(|_| io::Error::other("memory sink lock poisoned"))?
            .push((channel, line.to_string()));
        Ok(())
    }
}

/// Fans each message out to every sink.
#[derive(Clone, Default)]
pub struct Reporter {
    sinks: Vec<Arc<dyn ReportSink>>,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(mut self, sink: impl ReportSink + 'static) -> Self {
        self.sinks.push(Arc::new(sink));
        self
    }

    pub fn log(&self, message: impl AsRef<str>) {
        self.emit(Channel::Log, message.as_ref());
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.emit(Channel::Error, message.as_ref());
    }

    fn emit(&self, channel: Channel, message: &str) {
        if message.trim().is_empty() {
            return;
        }
        for sink in &self.sinks {
            // Sink failures never reach the batch
            if let Err(e) = sink.write_line(channel, message) {
                tracing::warn!(error = %e, ?channel, "report sink write failed");
            }
        }
    }
}
