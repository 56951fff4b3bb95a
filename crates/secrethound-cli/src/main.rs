use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use secrethound_core::{
    CancelToken, ColorSink, ConsoleSink, IgnoreMode, JsonLinesSink, ReportSink, ScanConfig,
    ScanOptions, Scanner, SignatureRegistry,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

/// Command-line entry point (clap derive).
#[derive(Parser, Debug)]
#[command(name = "secrethound", version, about = "Recursively finds secrets in the current dir")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan the working directory for leaked credentials
    Scan {
        /// Path to the config file (TOML)
        #[arg(long)]
        cfg: PathBuf,

        /// Output format: text, color, or jsonl
        #[arg(long, default_value = "color", value_parser = ["text", "color", "jsonl"])]
        format: String,

        /// Write reports to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Worker count ("auto" = one per CPU core)
        #[arg(long, default_value = "auto")]
        threads: String,

        /// Match ignore entries against whole path segments instead of
        /// literal substrings
        #[arg(long)]
        segment_ignore: bool,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan { cfg, format, output, threads, segment_ignore } => {
            let config = ScanConfig::load(&cfg).context("load config")?;
            if let Some(repo_path) = &config.repo_path {
                // Informational only; the scan root is always the cwd.
                info!(repo_path = %repo_path, "config repoPath (ignored)");
            }

            let root = std::env::current_dir().context("resolve working directory")?;
            info!(root = %root.display(), "running on path");

            let out: Box<dyn Write + Send> = match &output {
                Some(path) => Box::new(BufWriter::new(
                    File::create(path).context("create output file")?,
                )),
                None => Box::new(io::stdout()),
            };
            let mut sink: Box<dyn ReportSink> = match format.as_str() {
                "text" => Box::new(ConsoleSink::new(out)),
                "jsonl" => Box::new(JsonLinesSink::new(out)),
                _ => Box::new(ColorSink::new(out)),
            };

            let opts = ScanOptions {
                threads: parse_threads(&threads),
                ignore_mode: if segment_ignore {
                    IgnoreMode::PathSegment
                } else {
                    IgnoreMode::Substring
                },
            };

            let scanner = Scanner::new(config, SignatureRegistry::builtin()?);
            let stats = scanner
                .scan(&root, sink.as_mut(), &opts, &CancelToken::new())
                .context("scan failed")?;

            info!(
                files_scanned = stats.files_scanned,
                findings = stats.findings,
                file_errors = stats.file_errors,
                "done"
            );
        }
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // Level is controlled via RUST_LOG, e.g. RUST_LOG=debug.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(env_filter).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// "auto" means one worker per CPU core.
fn parse_threads(s: &str) -> Option<usize> {
    if s.eq_ignore_ascii_case("auto") {
        return None;
    }
    match s.parse::<usize>() {
        Ok(n) if n >= 1 => Some(n),
        _ => None,
    }
}
