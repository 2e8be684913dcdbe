//! CLI binary for pdf2sent.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ExtractionConfig` and delivers the CSV artifact.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2sent::{
    ensure_tokenizer, extract, extract_to_file, inspect, CsvTerminator, ExtractionConfig,
    ExtractionProgressCallback, ProgressCallback, Stage,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a stage spinner that becomes a per-page bar
/// during extraction, plus one ✓ line per completed stage.
struct CliProgressCallback {
    bar: ProgressBar,
    /// Whether the per-page bar style has been activated.
    page_bar: AtomicBool,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(spinner_style);
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            page_bar: AtomicBool::new(false),
        })
    }

    /// Switch to the full progress-bar style once the page count is known.
    fn activate_page_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}/{len} pages",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
    }

    /// Return to the plain spinner style after the page bar.
    fn deactivate_page_bar(&self) {
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        self.bar.set_style(spinner_style);
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ExtractionProgressCallback for CliProgressCallback {
    fn on_stage_start(&self, stage: Stage) {
        self.bar.set_prefix(stage.label());
        self.bar.set_message("");
    }

    fn on_page_extracted(&self, page: usize, total: usize, _chars: usize) {
        if !self.page_bar.swap(true, Ordering::SeqCst) {
            self.activate_page_bar(total);
        }
        self.bar.set_position(page as u64);
    }

    fn on_stage_complete(&self, stage: Stage, items: usize) {
        let line = match stage {
            Stage::Fetch => format!("fetched {items} bytes"),
            Stage::Extract => format!("extracted {items} characters"),
            Stage::Split => format!("split into {items} sentences"),
            Stage::Serialize => format!("serialised {items} CSV bytes"),
        };
        self.bar
            .println(format!("  {} {}", green("✓"), dim(&line)));
        if stage == Stage::Extract && self.page_bar.swap(false, Ordering::SeqCst) {
            self.deactivate_page_bar();
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Extract sentences to stdout
  pdf2sent document.pdf

  # Extract to the conventional artifact name
  pdf2sent document.pdf -o sentences.csv

  # From a URL
  pdf2sent https://arxiv.org/pdf/1706.03762 -o sentences.csv

  # CRLF row endings for strict RFC 4180 consumers
  pdf2sent --crlf document.pdf -o sentences.csv

  # Structured JSON (sentences + stats) instead of CSV
  pdf2sent --json document.pdf > output.json

  # Page count and version only, no extraction
  pdf2sent --inspect-only document.pdf

ENVIRONMENT VARIABLES:
  PDF2SENT_OUTPUT             Default output path
  PDF2SENT_DOWNLOAD_TIMEOUT   Download timeout in seconds
  PDF2SENT_QUIET              Suppress all output except errors

NOTES:
  Scanned/image-only pages contain no embedded text and therefore
  contribute no sentences; this tool performs no OCR. Encrypted PDFs are
  rejected — decrypt first (e.g. qpdf --decrypt in.pdf out.pdf).
"#;

/// Extract the sentences of a PDF into a single-column CSV.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2sent",
    version,
    about = "Extract the sentences of a PDF into a single-column CSV",
    long_about = "Extract the text of a PDF document (local file or URL), split it into \
sentences with English boundary rules, and write one sentence per CSV row, in reading order.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local PDF file path or HTTP/HTTPS URL.
    input: String,

    /// Write CSV to this file instead of stdout (conventionally sentences.csv).
    #[arg(short, long, env = "PDF2SENT_OUTPUT")]
    output: Option<PathBuf>,

    /// Terminate CSV rows with \r\n instead of \n.
    #[arg(long, env = "PDF2SENT_CRLF")]
    crlf: bool,

    /// Output structured JSON (sentences + stats) instead of CSV.
    #[arg(long, env = "PDF2SENT_JSON")]
    json: bool,

    /// Disable the progress display.
    #[arg(long, env = "PDF2SENT_NO_PROGRESS")]
    no_progress: bool,

    /// Print document info only, no extraction.
    #[arg(long)]
    inspect_only: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2SENT_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF2SENT_QUIET")]
    quiet: bool,

    /// HTTP download timeout in seconds.
    #[arg(long, env = "PDF2SENT_DOWNLOAD_TIMEOUT", default_value_t = 120)]
    download_timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress display is active;
    // it provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Ensure the sentence tokenizer is ready ───────────────────────────
    // One explicit startup check; every later split call reuses the
    // compiled rules for the lifetime of the process.
    ensure_tokenizer().context("Sentence tokenizer failed to initialise")?;

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let info = inspect(&cli.input).await.context("Failed to inspect PDF")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&info).context("Failed to serialise info")?
            );
        } else {
            println!("File:         {}", cli.input);
            println!("Pages:        {}", info.page_count);
            println!("PDF Version:  {}", info.pdf_version);
            println!("Encrypted:    {}", info.is_encrypted);
        }
        return Ok(());
    }

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<Arc<CliProgressCallback>> = if show_progress {
        Some(CliProgressCallback::new())
    } else {
        None
    };

    let mut builder = ExtractionConfig::builder()
        .download_timeout_secs(cli.download_timeout)
        .csv_terminator(if cli.crlf {
            CsvTerminator::Crlf
        } else {
            CsvTerminator::Lf
        });
    if let Some(ref cb) = progress_cb {
        builder = builder.progress_callback(Arc::clone(cb) as ProgressCallback);
    }
    let config = builder.build().context("Invalid configuration")?;

    // ── Run the pipeline ─────────────────────────────────────────────────
    if let Some(ref output_path) = cli.output {
        let stats = extract_to_file(&cli.input, output_path, &config)
            .await
            .context("Extraction failed")?;
        if let Some(ref cb) = progress_cb {
            cb.finish();
        }

        if !cli.quiet {
            eprintln!(
                "{} {} sentences from {} pages  {}ms  →  {}",
                green("✔"),
                bold(&stats.sentence_count.to_string()),
                stats.page_count,
                stats.total_duration_ms,
                bold(&output_path.display().to_string()),
            );
        }
    } else {
        let output = extract(&cli.input, &config)
            .await
            .context("Extraction failed")?;
        if let Some(ref cb) = progress_cb {
            cb.finish();
        }

        if cli.json {
            let json =
                serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
            println!("{json}");
        } else {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(&output.csv)
                .context("Failed to write to stdout")?;
        }

        if !cli.quiet && !cli.json {
            eprintln!(
                "{} {} sentences from {} pages  {}",
                green("✔"),
                bold(&output.stats.sentence_count.to_string()),
                output.stats.page_count,
                dim(&format!("{}ms", output.stats.total_duration_ms)),
            );
        }
    }

    Ok(())
}
