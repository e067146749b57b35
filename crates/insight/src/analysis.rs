//! Structured summarization of paper text via an LLM completion endpoint.
//!
//! This module builds a fixed prompt around the extracted text (truncated to
//! a hard character cap), sends a single-turn completion request to the
//! Anthropic messages endpoint, and decodes the free-text reply into an
//! [`AnalysisRecord`]. Decoding is best-effort: a reply without a usable
//! JSON object degrades to a one-key raw record instead of failing, so a
//! chatty model never breaks the pipeline.
//!
//! # Examples
//!
//! ```no_run
//! use insight::analysis::AnalysisClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AnalysisClient::new("sk-...");
//! let record = client.analyze("Full text of the paper...").await?;
//!
//! if let Some(background) = record.section("background") {
//!   println!("Background: {background}");
//! }
//! # Ok(())
//! # }
//! ```

use super::*;

/// Endpoint for single-turn completion requests.
const API_URL: &str = "https://api.anthropic.com/v1/messages";
/// API version header required by the endpoint.
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// Model used for every analysis request.
const MODEL: &str = "claude-3-5-sonnet-20241022";
/// Upper bound on completion output length, in tokens.
const MAX_TOKENS: u32 = 4096;

/// Hard cap on the number of characters of paper text sent to the model.
///
/// Text beyond the cap is silently dropped; "first N characters" is the only
/// guarantee.
pub const TEXT_CAP: usize = 50_000;

/// Key under which an undecodable reply is preserved verbatim.
pub const RAW_KEY: &str = "raw_analysis";

/// A single message in a completion request.
#[derive(Debug, Serialize)]
struct Message {
  /// Chat role, always "user" here.
  role:    String,
  /// Full prompt text.
  content: String,
}

/// Request payload for the messages endpoint.
#[derive(Debug, Serialize)]
struct CompletionRequest {
  /// Model identifier.
  model:      String,
  /// Output token bound.
  max_tokens: u32,
  /// Single-turn conversation: exactly one user message.
  messages:   Vec<Message>,
}

/// Response payload from the messages endpoint.
#[derive(Debug, Deserialize)]
struct CompletionResponse {
  /// Completion output blocks.
  content: Vec<ContentBlock>,
}

/// One block of completion output.
#[derive(Debug, Deserialize)]
struct ContentBlock {
  /// The block's text.
  text: String,
}

/// The structured (or degraded) result of summarizing one paper.
///
/// Normally a mapping of seven fixed string-valued section keys
/// (`background`, `objectives_and_hypothesis`, `methodology`,
/// `results_and_findings`, `discussion_and_interpretation`, `contributions`,
/// `achievements_and_significance`). When the model's reply could not be
/// decoded, the whole reply is kept under [`RAW_KEY`] instead.
///
/// Keys are never re-validated after decoding: partial or extra keys are
/// kept as-is, and consumers must treat a missing key as "not available"
/// rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisRecord {
  /// Section key to section text.
  sections: BTreeMap<String, String>,
}

impl AnalysisRecord {
  /// Decodes a model reply into a record.
  ///
  /// Locates the first balanced brace-delimited object in the reply and
  /// attempts to decode it as a string-to-string mapping. Any failure (no
  /// object found, malformed JSON, non-string values) degrades to the raw
  /// variant carrying the full reply; this function cannot fail.
  pub fn from_reply(reply: &str) -> Self {
    json_object(reply)
      .and_then(|candidate| serde_json::from_str(candidate).ok())
      .map(|sections| Self { sections })
      .unwrap_or_else(|| Self::raw(reply))
  }

  /// Wraps a reply verbatim in the degraded one-key variant.
  pub fn raw(reply: &str) -> Self {
    let mut sections = BTreeMap::new();
    sections.insert(RAW_KEY.to_string(), reply.to_string());
    Self { sections }
  }

  /// Looks up a section's text by key, `None` when absent.
  pub fn section(&self, key: &str) -> Option<&str> { self.sections.get(key).map(String::as_str) }

  /// Whether this record is the degraded raw-reply variant.
  pub fn is_raw(&self) -> bool { self.sections.contains_key(RAW_KEY) }
}

/// Finds the first balanced brace-delimited object in free text.
///
/// Scans from the first `{` to its matching `}`, tracking nesting depth and
/// JSON string boundaries (including escapes), so brace fragments later in
/// the reply cannot widen the candidate. Returns `None` when the reply has
/// no opening brace or the object never closes.
fn json_object(reply: &str) -> Option<&str> {
  let start = reply.find('{')?;

  let mut depth = 0usize;
  let mut in_string = false;
  let mut escaped = false;
  for (offset, character) in reply[start..].char_indices() {
    if in_string {
      match character {
        _ if escaped => escaped = false,
        '\\' => escaped = true,
        '"' => in_string = false,
        _ => {},
      }
      continue;
    }
    match character {
      '"' => in_string = true,
      '{' => depth += 1,
      '}' => {
        depth -= 1;
        if depth == 0 {
          return Some(&reply[start..=start + offset]);
        }
      },
      _ => {},
    }
  }
  None
}

/// Truncates text to the first [`TEXT_CAP`] characters.
///
/// Counts characters, not bytes, so the cut never lands inside a multi-byte
/// sequence.
fn truncate(text: &str) -> &str {
  match text.char_indices().nth(TEXT_CAP) {
    Some((boundary, _)) => &text[..boundary],
    None => text,
  }
}

/// Builds the fixed seven-section analysis prompt around the paper text.
fn build_prompt(text: &str) -> String {
  format!(
    r#"You are an expert academic research analyst. Analyze the following research paper and extract key information in a structured format.

Research Paper Text:
{}

Please provide a comprehensive analysis with the following sections:

1. Background of the study: Summarize the motivation behind the research, its relevance, and the problem it aims to address.
2. Research objectives and hypothesis: Clearly outline the main goal of the study and the hypothesis the authors are testing.
3. Methodology: Describe how the authors conducted their research, including experimental design, datasets, and evaluation methods.
4. Results and findings: Summarize the key outcomes of the study, highlighting improvements or novel discoveries.
5. Discussion and interpretation: Explain the broader implications of the findings and how they compare to existing approaches.
6. Contributions to the field: Highlight the unique contributions of the study and its significance.
7. Achievements and significance: Conclude with the practical impact and potential real-world applications of the research.

Format your response as a JSON object with the following structure:
{{
    "background": "...",
    "objectives_and_hypothesis": "...",
    "methodology": "...",
    "results_and_findings": "...",
    "discussion_and_interpretation": "...",
    "contributions": "...",
    "achievements_and_significance": "..."
}}

Ensure the output is concise, well-structured, and preserves core technical details."#,
    truncate(text)
  )
}

/// Client for requesting paper analyses from the completion endpoint.
pub struct AnalysisClient {
  /// Internal web client used to reach the endpoint.
  client:  reqwest::Client,
  /// Bearer credential for the endpoint; held for the session only.
  api_key: String,
}

impl AnalysisClient {
  /// Creates a client that authenticates with the given API credential.
  pub fn new(api_key: impl Into<String>) -> Self {
    Self { client: reqwest::Client::new(), api_key: api_key.into() }
  }

  /// Summarizes extracted paper text into an [`AnalysisRecord`].
  ///
  /// Sends one single-message completion request and blocks until the
  /// response arrives. The reply is decoded best-effort: an undecodable
  /// reply yields the raw variant, not an error.
  ///
  /// # Errors
  ///
  /// Returns [`InsightError::Network`] on transport failure or timeout, and
  /// [`InsightError::Api`] when the endpoint answers with a non-success
  /// status (an invalid credential surfaces here with the endpoint's own
  /// message) or an empty completion.
  pub async fn analyze(&self, text: &str) -> Result<AnalysisRecord, InsightError> {
    let request = CompletionRequest {
      model:      MODEL.to_string(),
      max_tokens: MAX_TOKENS,
      messages:   vec![Message { role: "user".to_string(), content: build_prompt(text) }],
    };

    debug!("Requesting analysis from {MODEL}");

    let response = self
      .client
      .post(API_URL)
      .header("x-api-key", &self.api_key)
      .header("anthropic-version", ANTHROPIC_VERSION)
      .json(&request)
      .send()
      .await?;

    if !response.status().is_success() {
      let status = response.status();
      let body = response.text().await.unwrap_or_default();
      return Err(InsightError::Api(format!("{status}: {body}")));
    }

    let completion: CompletionResponse = response.json().await?;
    let reply = completion
      .content
      .first()
      .map(|block| block.text.as_str())
      .ok_or_else(|| InsightError::Api("completion contained no content blocks".to_string()))?;

    debug!("Received {} characters of completion text", reply.len());
    Ok(AnalysisRecord::from_reply(reply))
  }
}
