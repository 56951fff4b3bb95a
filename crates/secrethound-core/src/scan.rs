//! Scan driver and parallel scheduling.
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::ScanConfig;
use crate::context;
use crate::entropy::shannon_entropy;
use crate::error::ScanError;
use crate::findings::Finding;
use crate::options::{CancelToken, ScanOptions, ScanStats};
use crate::signatures::SignatureRegistry;
use crate::sink::ReportSink;
use crate::walk::{find_all_files, DEFAULT_IGNORE};

/// Per-file result: findings gathered up to the point of failure or
/// cancellation. Findings found before a mid-file read error are still
/// emitted; the error only aborts the rest of that file. A file cut short
/// by cancellation is flagged so the run's stats report the truncation.
struct FileOutcome {
    findings: Vec<Finding>,
    error: Option<ScanError>,
    cancelled: bool,
}

impl FileOutcome {
    fn failed(findings: Vec<Finding>, error: ScanError) -> Self {
        Self { findings, error: Some(error), cancelled: false }
    }
}

/// The secret-detection engine: configuration plus the vendor registry,
/// both supplied explicitly at construction.
pub struct Scanner {
    config: ScanConfig,
    registry: SignatureRegistry,
}

impl Scanner {
    pub fn new(config: ScanConfig, registry: SignatureRegistry) -> Self {
        Self { config, registry }
    }

    /// Scan every file under `root` and publish findings to `sink` in
    /// file-order x line-order x token-order.
    ///
    /// Enumeration failures are fatal and abort before any file is opened.
    /// Per-file read failures are reported through the sink and the scan
    /// moves on. The parallel path produces exactly the same sink sequence
    /// as the serial path.
    pub fn scan(
        &self,
        root: &Path,
        sink: &mut dyn ReportSink,
        opts: &ScanOptions,
        cancel: &CancelToken,
    ) -> Result<ScanStats, ScanError> {
        let files = find_all_files(root, DEFAULT_IGNORE, opts.ignore_mode)?;
        info!(root = %root.display(), files = files.len(), "starting scan");

        let threads = opts.threads.unwrap_or_else(num_cpus::get);
        let mut stats = ScanStats::default();
        if threads > 1 && files.len() > 1 {
            self.scan_parallel(&files, sink, cancel, threads, &mut stats)?;
        } else {
            self.scan_serial(&files, sink, cancel, &mut stats)?;
        }

        info!(
            files_scanned = stats.files_scanned,
            findings = stats.findings,
            file_errors = stats.file_errors,
            "scan finished"
        );
        Ok(stats)
    }

    fn scan_serial(
        &self,
        files: &[PathBuf],
        sink: &mut dyn ReportSink,
        cancel: &CancelToken,
        stats: &mut ScanStats,
    ) -> Result<(), ScanError> {
        for path in files {
            if cancel.is_cancelled() {
                stats.cancelled = true;
                break;
            }
            let outcome = self.scan_file(path, cancel);
            deliver(path, outcome, sink, stats)?;
            if stats.cancelled {
                break;
            }
        }
        Ok(())
    }

    /// One worker per file on a bounded rayon pool; a single writer reorders
    /// results by file index so the aggregate sink order matches the serial
    /// path exactly.
    fn scan_parallel(
        &self,
        files: &[PathBuf],
        sink: &mut dyn ReportSink,
        cancel: &CancelToken,
        threads: usize,
        stats: &mut ScanStats,
    ) -> Result<(), ScanError> {
        use crossbeam_channel as channel;
        use rayon::prelude::*;

        type Msg = (usize, Option<FileOutcome>);

        std::thread::scope(|s| -> Result<(), ScanError> {
            let (tx, rx) = channel::bounded::<Msg>(256);

            s.spawn(move || {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .expect("build rayon pool");
                pool.install(|| {
                    files.par_iter().enumerate().for_each(|(idx, path)| {
                        if cancel.is_cancelled() {
                            let _ = tx.send((idx, None));
                            return;
                        }
                        let _ = tx.send((idx, Some(self.scan_file(path, cancel))));
                    });
                });
                // All senders drop here; the writer sees the channel close.
            });

            // Writer: flush results in file order from next_idx, buffering
            // whatever arrives early. Dropping rx on an early return unblocks
            // any worker parked on the bounded channel.
            let mut next_idx = 0usize;
            let mut buffer: BTreeMap<usize, Option<FileOutcome>> = BTreeMap::new();
            while let Ok((idx, msg)) = rx.recv() {
                buffer.insert(idx, msg);
                while let Some(msg) = buffer.remove(&next_idx) {
                    match msg {
                        Some(outcome) => deliver(&files[next_idx], outcome, sink, stats)?,
                        None => stats.cancelled = true,
                    }
                    next_idx += 1;
                }
            }
            Ok(())
        })
    }

    /// Tokenize one file and score every token. The file handle closes on
    /// every exit path by scope. A read failure aborts the rest of this file
    /// only and is handed back for per-file reporting.
    fn scan_file(&self, path: &Path, cancel: &CancelToken) -> FileOutcome {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                return FileOutcome::failed(
                    Vec::new(),
                    ScanError::FileRead { path: path.to_path_buf(), source: e },
                )
            }
        };
        let reader = BufReader::new(file);

        let mut findings = Vec::new();
        let mut line_number: u64 = 0;
        for line in reader.lines() {
            if cancel.is_cancelled() {
                return FileOutcome { findings, error: None, cancelled: true };
            }
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    return FileOutcome::failed(
                        findings,
                        ScanError::FileRead { path: path.to_path_buf(), source: e },
                    )
                }
            };
            line_number += 1;
            let text = line.trim();

            let (keyword, seed) = context::seed(text, path, &self.config);
            // Strict single-space split, matching the token model: no tab or
            // Unicode-aware splitting.
            for token in text.split(' ') {
                let score = shannon_entropy(token, seed);
                if score > self.config.threshold {
                    debug!(path = %path.display(), line_number, score, "qualifying token");
                    findings.push(Finding {
                        path: path.to_path_buf(),
                        line: line_number,
                        text: text.to_string(),
                        score,
                        vendors: to_owned(self.registry.match_token(token)),
                        mentions: to_owned(self.registry.mentioned_in(text)),
                        keyword: keyword.map(str::to_string),
                    });
                }
            }
        }

        FileOutcome { findings, error: None, cancelled: false }
    }
}

fn to_owned(names: Vec<&'static str>) -> Vec<String> {
    names.into_iter().map(str::to_string).collect()
}

/// Publish one file's outcome: findings first, then the per-file error if
/// the file was cut short. A file truncated by cancellation marks the run
/// as cancelled and is not counted as scanned. Only sink write failures
/// propagate.
fn deliver(
    path: &Path,
    outcome: FileOutcome,
    sink: &mut dyn ReportSink,
    stats: &mut ScanStats,
) -> Result<(), ScanError> {
    for finding in &outcome.findings {
        sink.report(finding)?;
        stats.findings += 1;
    }
    if let Some(e) = outcome.error {
        warn!(path = %path.display(), error = %e, "file skipped");
        sink.file_error(path, &e);
        stats.file_errors += 1;
    } else if outcome.cancelled {
        stats.cancelled = true;
    } else {
        stats.files_scanned += 1;
    }
    Ok(())
}
