//! Client for downloading paper PDFs from arXiv.org.
//!
//! The remote half of document fetching: given a parsed
//! [`PaperIdentifier`], perform a single bounded HTTP GET of the canonical
//! PDF URL and hand back the raw bytes. The local half (an uploaded file)
//! needs no client at all; callers read the bytes themselves and feed them
//! straight to [`extract`](crate::extract).
//!
//! There is no retry: a failed download is terminal for the request and the
//! caller decides whether to try again.

use super::*;

/// How long to wait on the arXiv server before giving up on a download.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for fetching paper PDFs from arXiv.
///
/// # Examples
///
/// ```no_run
/// # use insight::{fetch::ArxivClient, identifier::PaperIdentifier};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let id: PaperIdentifier = "2301.07041".parse()?;
/// let pdf = ArxivClient::new()?.download_pdf(&id).await?;
/// println!("Downloaded {} bytes", pdf.len());
/// # Ok(())
/// # }
/// ```
pub struct ArxivClient {
  /// Internal web client used to connect to arXiv.
  client: reqwest::Client,
}

impl ArxivClient {
  /// Creates a new arXiv client with a bounded request timeout.
  pub fn new() -> Result<Self, InsightError> {
    let client = reqwest::Client::builder().timeout(DOWNLOAD_TIMEOUT).build()?;
    Ok(Self { client })
  }

  /// Downloads the PDF for a paper.
  ///
  /// # Errors
  ///
  /// Returns [`InsightError::Network`] if the request fails, times out, or
  /// the server answers with a non-success status (a shape-valid identifier
  /// that doesn't exist is caught here as a 404).
  pub async fn download_pdf(&self, identifier: &PaperIdentifier) -> Result<Vec<u8>, InsightError> {
    let url = identifier.pdf_url();
    debug!("Downloading PDF via: {url}");

    let response = self.client.get(&url).send().await?.error_for_status()?;
    let bytes = response.bytes().await?;

    debug!("Downloaded {} bytes for {identifier}", bytes.len());
    Ok(bytes.to_vec())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  // Touches the live arXiv server, so it stays out of the default test run.
  #[ignore]
  #[traced_test]
  #[tokio::test]
  async fn test_download_pdf_from_arxiv() -> anyhow::Result<()> {
    let id: PaperIdentifier = "2301.07041".parse()?;
    let pdf = ArxivClient::new()?.download_pdf(&id).await?;
    assert!(pdf.starts_with(b"%PDF"));
    Ok(())
  }
}
