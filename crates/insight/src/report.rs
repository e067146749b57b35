//! Rendering and export of analysis results.
//!
//! The presenter half renders an [`AnalysisRecord`] under seven fixed
//! headings, substituting a sentinel for any section the record doesn't
//! provide; this is how the degraded raw variant displays without error.
//! The exporter half wraps the record with its provenance and a timestamp
//! into an [`AnalysisReport`] and serializes it to a pretty-printed JSON
//! file.

use super::*;

/// Timestamp format recorded inside exported reports.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Timestamp format embedded in export filenames.
const FILE_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Sentinel rendered for sections the record does not provide.
pub const NOT_AVAILABLE: &str = "Not available";

/// The seven fixed section headings paired with their record keys, in
/// display order.
pub const SECTIONS: [(&str, &str); 7] = [
  ("Background of the Study", "background"),
  ("Research Objectives and Hypothesis", "objectives_and_hypothesis"),
  ("Methodology", "methodology"),
  ("Results and Findings", "results_and_findings"),
  ("Discussion and Interpretation", "discussion_and_interpretation"),
  ("Contributions to the Field", "contributions"),
  ("Achievements and Significance", "achievements_and_significance"),
];

/// Where an analyzed document came from.
///
/// The two variants are the two mutually exclusive entry points of a
/// pipeline run; the display form becomes the report's source descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaperSource {
  /// Downloaded from arXiv by identifier.
  Arxiv(PaperIdentifier),
  /// Supplied directly as a local PDF file, tagged with its filename.
  Upload(String),
}

impl std::fmt::Display for PaperSource {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      PaperSource::Arxiv(identifier) => write!(f, "ArXiv ID: {identifier}"),
      PaperSource::Upload(name) => write!(f, "Uploaded: {name}"),
    }
  }
}

/// Renders a record's sections under the fixed headings.
///
/// Sections are emitted in [`SECTIONS`] order; a missing key renders the
/// [`NOT_AVAILABLE`] sentinel and never errors.
pub fn render(record: &AnalysisRecord) -> String {
  let mut output = String::new();
  for (heading, key) in SECTIONS {
    output.push_str(heading);
    output.push('\n');
    output.push_str(record.section(key).unwrap_or(NOT_AVAILABLE));
    output.push_str("\n\n");
  }
  output
}

/// A finished analysis bundled with its provenance, ready for export.
///
/// Written once and never mutated; serialized on demand by [`Self::save`].
///
/// # Examples
///
/// ```
/// use insight::{
///   analysis::AnalysisRecord,
///   report::{AnalysisReport, PaperSource},
/// };
///
/// let record = AnalysisRecord::from_reply(r#"{"background": "context"}"#);
/// let report = AnalysisReport::new(&PaperSource::Upload("paper.pdf".into()), record);
/// assert_eq!(report.source, "Uploaded: paper.pdf");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
  /// Human-readable descriptor of where the document came from.
  pub source:    String,
  /// When the analysis completed, as `YYYY-MM-DD HH:MM:SS` local time.
  pub timestamp: String,
  /// The structured or degraded analysis itself.
  pub analysis:  AnalysisRecord,
}

impl AnalysisReport {
  /// Stamps a fresh report with the current local time.
  pub fn new(source: &PaperSource, analysis: AnalysisRecord) -> Self {
    Self {
      source: source.to_string(),
      timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
      analysis,
    }
  }

  /// The export filename, `paper_analysis_<YYYYMMDD_HHMMSS>.json`.
  ///
  /// The stamp is derived from the report's own timestamp so the name is
  /// deterministic for a given report; only a hand-edited timestamp falls
  /// back to the current time.
  pub fn filename(&self) -> String {
    let stamp = NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT)
      .map(|time| time.format(FILE_STAMP_FORMAT).to_string())
      .unwrap_or_else(|_| Local::now().format(FILE_STAMP_FORMAT).to_string());
    format!("paper_analysis_{stamp}.json")
  }

  /// Serializes the report as pretty-printed JSON (two-space indent).
  pub fn to_json(&self) -> Result<String, InsightError> {
    Ok(serde_json::to_string_pretty(self)?)
  }

  /// Decodes a previously exported report.
  pub fn from_json(json: &str) -> Result<Self, InsightError> { Ok(serde_json::from_str(json)?) }

  /// Writes the report into `dir` under [`Self::filename`].
  ///
  /// Returns the full path of the written file.
  pub fn save(&self, dir: &Path) -> Result<PathBuf, InsightError> {
    let path = dir.join(self.filename());
    debug!("Writing analysis report to {path:?}");
    std::fs::write(&path, self.to_json()?)?;
    Ok(path)
  }
}
