//! Plain-text extraction from PDF byte streams.

use lopdf::Document;

use super::*;

/// Extracts the plain text of a PDF, page by page.
///
/// Pages are visited in page order and each page's text is appended to the
/// accumulator followed by a newline. No structure beyond page order is
/// retained. A page whose content stream cannot be decoded contributes only
/// its trailing newline; no page-level error is kept.
///
/// # Errors
///
/// Returns [`InsightError::Extraction`] if the bytes are not a valid PDF
/// container, with no partial output.
pub fn extract_text(bytes: &[u8]) -> Result<String, InsightError> {
  let document = Document::load_mem(bytes)?;
  let pages = document.get_pages();

  let mut text = String::new();
  for page_number in pages.keys() {
    let page_text = document.extract_text(&[*page_number]).unwrap_or_default();
    text.push_str(&page_text);
    text.push('\n');
  }

  debug!("Extracted {} characters from {} pages", text.len(), pages.len());
  Ok(text)
}
