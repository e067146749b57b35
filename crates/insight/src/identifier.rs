//! Parsing of arXiv identifiers from user-supplied input.
//!
//! Three textual shapes are recognized, tried in order: an abstract page URL
//! (`arxiv.org/abs/<id>`), a PDF page URL (`arxiv.org/pdf/<id>`), and a bare
//! identifier matching the numeric pattern alone. The identifier pattern is
//! `\d+\.\d+` with no validation beyond shape; whether the paper actually
//! exists is only discovered at fetch time.
//!
//! # Examples
//!
//! ```
//! use insight::identifier::PaperIdentifier;
//!
//! let id = PaperIdentifier::extract("https://arxiv.org/abs/2301.00001").unwrap();
//! assert_eq!(id.as_str(), "2301.00001");
//!
//! assert!(PaperIdentifier::extract("not-a-url").is_none());
//! ```

use lazy_static::lazy_static;
use regex::Regex;

use super::*;

lazy_static! {
  /// Abstract page URLs, e.g. "https://arxiv.org/abs/2301.07041".
  static ref ABS_URL: Regex = Regex::new(r"arxiv\.org/abs/(\d+\.\d+)").unwrap();
  /// PDF page URLs, e.g. "https://arxiv.org/pdf/2301.07041".
  static ref PDF_URL: Regex = Regex::new(r"arxiv\.org/pdf/(\d+\.\d+)").unwrap();
  /// A bare identifier on its own, e.g. "2301.07041".
  static ref BARE_ID: Regex = Regex::new(r"^(\d+\.\d+)$").unwrap();
}

/// A normalized arXiv paper identifier.
///
/// Immutable once parsed; construct one with [`PaperIdentifier::extract`] or
/// via [`FromStr`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperIdentifier(String);

impl PaperIdentifier {
  /// Extracts an identifier from arbitrary input.
  ///
  /// Tries the three accepted shapes in order and returns the first matching
  /// capture. Returns `None` when nothing matches; "no match" is an expected
  /// outcome, not an error.
  ///
  /// # Examples
  ///
  /// ```
  /// use insight::identifier::PaperIdentifier;
  ///
  /// for input in
  ///   ["https://arxiv.org/abs/2301.07041", "https://arxiv.org/pdf/2301.07041", "2301.07041"]
  /// {
  ///   assert_eq!(PaperIdentifier::extract(input).unwrap().as_str(), "2301.07041");
  /// }
  /// ```
  pub fn extract(input: &str) -> Option<Self> {
    for pattern in [&*ABS_URL, &*PDF_URL, &*BARE_ID] {
      if let Some(found) = pattern.captures(input).and_then(|captures| captures.get(1)) {
        return Some(Self(found.as_str().to_string()));
      }
    }
    None
  }

  /// The canonical download URL for this paper's PDF.
  pub fn pdf_url(&self) -> String { format!("https://arxiv.org/pdf/{}.pdf", self.0) }

  /// The identifier as a plain string slice.
  pub fn as_str(&self) -> &str { &self.0 }
}

impl std::fmt::Display for PaperIdentifier {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}

impl FromStr for PaperIdentifier {
  type Err = InsightError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::extract(s).ok_or(InsightError::InvalidIdentifier)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_extract_from_abstract_url() {
    let id = PaperIdentifier::extract("https://arxiv.org/abs/2301.00001").unwrap();
    assert_eq!(id.as_str(), "2301.00001");
  }

  #[test]
  fn test_extract_from_pdf_url() {
    let id = PaperIdentifier::extract("https://arxiv.org/pdf/2301.00001.pdf").unwrap();
    assert_eq!(id.as_str(), "2301.00001");
  }

  #[test]
  fn test_extract_from_bare_id() {
    let id = PaperIdentifier::extract("2301.00001").unwrap();
    assert_eq!(id.as_str(), "2301.00001");
  }

  #[test]
  fn test_extract_rejects_everything_else() {
    assert!(PaperIdentifier::extract("not-a-url").is_none());
    assert!(PaperIdentifier::extract("https://example.com/abs/2301.00001").is_none());
    assert!(PaperIdentifier::extract("2301.00001v2 with trailing words").is_none());
    assert!(PaperIdentifier::extract("").is_none());
  }

  #[test]
  fn test_from_str_maps_no_match_to_error() {
    let result = "https://doi.org/10.1145/1327452.1327492".parse::<PaperIdentifier>();
    assert!(matches!(result, Err(InsightError::InvalidIdentifier)));
  }

  #[test]
  fn test_pdf_url_is_canonical() {
    let id = PaperIdentifier::extract("2301.07041").unwrap();
    assert_eq!(id.pdf_url(), "https://arxiv.org/pdf/2301.07041.pdf");
  }
}
