//! Report sinks.
//!
//! The sink is an explicit capability handed to the scanner: plain console,
//! colorized console, line-delimited JSON for downstream automation, and an
//! in-memory capture so tests never depend on console output. Sinks are
//! append-only; a finding is never revised after `report` returns.
use console::style;
use std::io::{self, Write};
use std::path::Path;

use crate::error::ScanError;
use crate::findings::Finding;

pub trait ReportSink: Send {
    /// Publish one finding. A write failure here is fatal to the run.
    fn report(&mut self, finding: &Finding) -> io::Result<()>;

    /// Record a recovered per-file failure. Non-fatal by contract, so this
    /// cannot error.
    fn file_error(&mut self, path: &Path, error: &ScanError);
}

/// Plain human-readable console output.
pub struct ConsoleSink<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write + Send> ReportSink for ConsoleSink<W> {
    fn report(&mut self, f: &Finding) -> io::Result<()> {
        writeln!(self.out, "----------------------------------------------------------")?;
        for vendor in &f.vendors {
            writeln!(self.out, "Matched vendor: {vendor}")?;
        }
        for mention in &f.mentions {
            writeln!(self.out, "Mentioned vendor: {mention}")?;
        }
        if let Some(keyword) = &f.keyword {
            writeln!(self.out, "Matched keyword: {keyword}")?;
        }
        writeln!(self.out, "File: {}", f.path.display())?;
        writeln!(self.out, "Line: {}", f.line)?;
        writeln!(self.out, "Entropy: {:.6}", f.score)?;
        writeln!(self.out, "Text: {}", f.text)?;
        Ok(())
    }

    fn file_error(&mut self, path: &Path, error: &ScanError) {
        let _ = writeln!(self.out, "Error: {}: {error}", path.display());
    }
}

/// Colorized console output, same layout as [`ConsoleSink`].
pub struct ColorSink<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> ColorSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write + Send> ReportSink for ColorSink<W> {
    fn report(&mut self, f: &Finding) -> io::Result<()> {
        writeln!(self.out, "----------------------------------------------------------")?;
        for vendor in &f.vendors {
            writeln!(self.out, "{} {}", style("Matched vendor:").green(), style(vendor).bold())?;
        }
        for mention in &f.mentions {
            writeln!(self.out, "{} {mention}", style("Mentioned vendor:").green())?;
        }
        if let Some(keyword) = &f.keyword {
            writeln!(self.out, "{} {keyword}", style("Matched keyword:").green())?;
        }
        writeln!(self.out, "{} {}", style("File:").cyan(), f.path.display())?;
        writeln!(self.out, "{} {}", style("Line:").cyan(), f.line)?;
        writeln!(self.out, "{} {:.6}", style("Entropy:").cyan(), f.score)?;
        writeln!(self.out, "{} {}", style("Text:").yellow(), f.text)?;
        Ok(())
    }

    fn file_error(&mut self, path: &Path, error: &ScanError) {
        let _ = writeln!(self.out, "{} {}: {error}", style("Error:").red(), path.display());
    }
}

/// One JSON object per finding, one finding per line.
pub struct JsonLinesSink<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write + Send> ReportSink for JsonLinesSink<W> {
    fn report(&mut self, f: &Finding) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, f)?;
        writeln!(self.out)?;
        Ok(())
    }

    fn file_error(&mut self, path: &Path, error: &ScanError) {
        tracing::warn!(path = %path.display(), %error, "file skipped");
    }
}

/// Captures findings and per-file errors for assertions.
#[derive(Default)]
pub struct MemorySink {
    pub findings: Vec<Finding>,
    pub errors: Vec<(std::path::PathBuf, String)>,
}

impl ReportSink for MemorySink {
    fn report(&mut self, finding: &Finding) -> io::Result<()> {
        self.findings.push(finding.clone());
        Ok(())
    }

    fn file_error(&mut self, path: &Path, error: &ScanError) {
        self.errors.push((path.to_path_buf(), error.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding() -> Finding {
        Finding {
            path: "conf/app.env".into(),
            line: 3,
            text: "API_KEY=da39a3ee5e6b4b0d3255bfef95601890afd80709".into(),
            score: 5.1,
            vendors: vec!["aws".into(), "github".into()],
            mentions: vec![],
            keyword: Some("key".into()),
        }
    }

    #[test]
    fn console_sink_writes_one_block_per_finding() {
        let mut buf = Vec::new();
        ConsoleSink::new(&mut buf).report(&finding()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Matched vendor: aws"));
        assert!(text.contains("Matched vendor: github"));
        assert!(text.contains("Matched keyword: key"));
        assert!(text.contains("File: conf/app.env"));
        assert!(text.contains("Line: 3"));
    }

    #[test]
    fn jsonl_sink_writes_one_object_per_line() {
        let mut buf = Vec::new();
        {
            let mut sink = JsonLinesSink::new(&mut buf);
            sink.report(&finding()).unwrap();
            sink.report(&finding()).unwrap();
        }
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let v: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(v["line"], 3);
        assert_eq!(v["vendors"][0], "aws");
        assert_eq!(v["keyword"], "key");
    }
}
