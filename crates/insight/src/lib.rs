//! A library for distilling academic papers into structured insights.
//!
//! Given an arXiv URL, a bare identifier, or the bytes of a local PDF, this
//! crate downloads the paper, extracts its plain text, and asks an LLM
//! completion endpoint to summarize it into seven fixed sections. The result
//! renders under fixed headings and exports as a timestamped JSON document.
//!
//! # Example
//! ```rust,no_run
//! use insight::{
//!   analysis::AnalysisClient, extract, fetch::ArxivClient, identifier::PaperIdentifier, report,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!   let id: PaperIdentifier = "https://arxiv.org/abs/2301.07041".parse()?;
//!   let pdf = ArxivClient::new()?.download_pdf(&id).await?;
//!   let text = extract::extract_text(&pdf)?;
//!   let record = AnalysisClient::new("sk-...").analyze(&text).await?;
//!   println!("{}", report::render(&record));
//!
//!   Ok(())
//! }
//! ```

#![warn(missing_docs, clippy::missing_docs_in_private_items)]
use std::{
  collections::BTreeMap,
  path::{Path, PathBuf},
  str::FromStr,
  time::Duration,
};

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;
#[cfg(test)] use tracing_test::traced_test;

pub mod analysis;
pub mod errors;
pub mod extract;
pub mod fetch;
pub mod identifier;
pub mod report;
#[cfg(test)] mod tests;

use analysis::AnalysisRecord;
use errors::InsightError;
use identifier::PaperIdentifier;
