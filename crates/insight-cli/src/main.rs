use std::path::PathBuf;

use clap::{builder::ArgAction, Parser, Subcommand};
use console::{style, Emoji};
use errors::InsightCliError;
use insight::{
  analysis::{AnalysisClient, RAW_KEY},
  extract,
  fetch::ArxivClient,
  identifier::PaperIdentifier,
  report::{AnalysisReport, PaperSource, NOT_AVAILABLE, SECTIONS},
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub mod errors;

static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
static PAPER: Emoji<'_, '_> = Emoji("📄 ", "");
static ROBOT: Emoji<'_, '_> = Emoji("🤖 ", "");
static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️  ", "");
static SUCCESS: Emoji<'_, '_> = Emoji("✨ ", "");

#[derive(Parser)]
#[command(author, version, about = "Extract structured insights from academic research papers")]
struct Cli {
  /// Verbose mode (-v, -vv, -vvv)
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Download a paper from arXiv and analyze it
  Fetch {
    /// arXiv URL or identifier, e.g. "https://arxiv.org/abs/2301.00001" or "2301.00001"
    input: String,

    /// Directory where the exported report is written
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// API key for the analysis endpoint (defaults to ANTHROPIC_API_KEY, then a prompt)
    #[arg(long)]
    api_key: Option<String>,
  },
  /// Analyze a local PDF file
  File {
    /// Path to the PDF file
    path: PathBuf,

    /// Directory where the exported report is written
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// API key for the analysis endpoint (defaults to ANTHROPIC_API_KEY, then a prompt)
    #[arg(long)]
    api_key: Option<String>,
  },
  /// Render a previously exported analysis report
  Show {
    /// Path to an exported report JSON file
    path: PathBuf,
  },
}

/// Setup logging with the specified verbosity level
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_file(true)
    .with_line_number(true)
    .with_target(true)
    .init();
}

/// Resolves the endpoint credential: flag, then environment, then a hidden
/// interactive prompt. Never written anywhere.
fn resolve_api_key(flag: Option<String>) -> Result<String, InsightCliError> {
  if let Some(key) = flag {
    return Ok(key);
  }
  if let Ok(key) = std::env::var("ANTHROPIC_API_KEY") {
    if !key.is_empty() {
      return Ok(key);
    }
  }
  Ok(dialoguer::Password::new().with_prompt("Anthropic API key").interact()?)
}

/// Prints the report's sections under the fixed headings, marking absent
/// ones rather than failing on them.
fn print_report(report: &AnalysisReport) {
  println!("\n{} Analysis results", style(SUCCESS).green());
  println!("   {} {}", style("Source:").green().bold(), style(&report.source).white());
  println!("   {} {}", style("Generated:").green().bold(), style(&report.timestamp).white());

  for (heading, key) in SECTIONS {
    println!("\n{}", style(heading).cyan().bold());
    match report.analysis.section(key) {
      Some(text) => println!("{text}"),
      None => println!("{}", style(NOT_AVAILABLE).dim().italic()),
    }
  }
}

/// Runs the tail of the pipeline for an in-memory PDF: extract, analyze,
/// render, export. Each stage's return value feeds the next; there is no
/// ambient state between stages.
async fn analyze_and_export(
  source: PaperSource,
  pdf: Vec<u8>,
  api_key: Option<String>,
  output: Option<PathBuf>,
) -> Result<(), InsightCliError> {
  let text = extract::extract_text(&pdf)?;
  println!(
    "{} Extracted {} characters of text",
    style(PAPER).cyan(),
    style(text.len()).yellow()
  );

  let api_key = resolve_api_key(api_key)?;
  println!("{} Analyzing paper, this may take a minute...", style(ROBOT).cyan());
  let record = AnalysisClient::new(api_key).analyze(&text).await?;

  if record.is_raw() {
    println!(
      "{} The reply could not be decoded into sections; the full text is kept under \"{}\"",
      style(WARNING).yellow(),
      style(RAW_KEY).yellow()
    );
  }

  let report = AnalysisReport::new(&source, record);
  print_report(&report);

  let dir = output.unwrap_or_else(|| PathBuf::from("."));
  let path = report.save(&dir)?;
  println!("\n{} Saved analysis to: {}", style(SAVE).green(), style(path.display()).yellow());
  Ok(())
}

#[tokio::main]
async fn main() -> Result<(), InsightCliError> {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  match cli.command {
    Commands::Fetch { input, output, api_key } => {
      let identifier: PaperIdentifier = input.parse()?;
      println!(
        "{} Downloading paper: {}",
        style(LOOKING_GLASS).cyan(),
        style(&identifier).yellow()
      );

      let pdf = ArxivClient::new()?.download_pdf(&identifier).await?;
      debug!("Downloaded {} bytes", pdf.len());

      analyze_and_export(PaperSource::Arxiv(identifier), pdf, api_key, output).await
    },

    Commands::File { path, output, api_key } => {
      println!("{} Reading PDF: {}", style(PAPER).cyan(), style(path.display()).yellow());

      let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
      let pdf = std::fs::read(&path)?;
      debug!("Read {} bytes from {}", pdf.len(), path.display());

      analyze_and_export(PaperSource::Upload(name), pdf, api_key, output).await
    },

    Commands::Show { path } => {
      let report = AnalysisReport::from_json(&std::fs::read_to_string(&path)?)?;
      print_report(&report);
      Ok(())
    },
  }
}
