use lopdf::{
  content::{Content, Operation},
  dictionary, Document, Object, Stream,
};
use tempfile::tempdir;

use super::*;
use crate::report::{render, AnalysisReport, PaperSource};

/// Builds a minimal PDF in memory with one page of text per entry.
fn sample_pdf(page_texts: &[&str]) -> Vec<u8> {
  let mut doc = Document::with_version("1.5");
  let pages_id = doc.new_object_id();

  let font_id = doc.add_object(dictionary! {
    "Type" => "Font",
    "Subtype" => "Type1",
    "BaseFont" => "Courier",
  });
  let resources_id = doc.add_object(dictionary! {
    "Font" => dictionary! { "F1" => font_id },
  });

  let mut kids: Vec<Object> = Vec::new();
  for text in page_texts {
    let content = Content {
      operations: vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 36.into()]),
        Operation::new("Td", vec![100.into(), 600.into()]),
        Operation::new("Tj", vec![Object::string_literal(*text)]),
        Operation::new("ET", vec![]),
      ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
      "Type" => "Page",
      "Parent" => pages_id,
      "Contents" => content_id,
    });
    kids.push(page_id.into());
  }

  let count = kids.len() as i64;
  doc.objects.insert(pages_id, Object::Dictionary(dictionary! {
    "Type" => "Pages",
    "Kids" => kids,
    "Count" => count,
    "Resources" => resources_id,
    "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
  }));

  let catalog_id = doc.add_object(dictionary! {
    "Type" => "Catalog",
    "Pages" => pages_id,
  });
  doc.trailer.set("Root", catalog_id);

  let mut bytes = Vec::new();
  doc.save_to(&mut bytes).unwrap();
  bytes
}

#[traced_test]
#[test]
fn test_extract_concatenates_pages_in_order() {
  let pdf = sample_pdf(&["First page text", "Second page text", "Third page text"]);
  let text = extract::extract_text(&pdf).unwrap();

  let first = text.find("First page text").unwrap();
  let second = text.find("Second page text").unwrap();
  let third = text.find("Third page text").unwrap();
  assert!(first < second && second < third);
  assert!(text.ends_with('\n'));
}

#[test]
fn test_extract_rejects_invalid_bytes() {
  let result = extract::extract_text(b"this is definitely not a PDF");
  assert!(matches!(result, Err(InsightError::Extraction(_))));
}

#[test]
fn test_extract_to_export_round_trip() -> anyhow::Result<()> {
  // Extraction and everything after the completion call, end to end.
  let pdf = sample_pdf(&["A paper about birds"]);
  let text = extract::extract_text(&pdf)?;
  assert!(text.contains("birds"));

  let reply = r#"Sure! Here is the summary:
{
  "background": "Birds are understudied.",
  "methodology": "Watching birds."
}
Hope this helps."#;
  let record = AnalysisRecord::from_reply(reply);

  let rendered = render(&record);
  assert!(rendered.contains("Birds are understudied."));
  assert!(rendered.contains(report::NOT_AVAILABLE));

  let source = PaperSource::Upload("birds.pdf".to_string());
  let report = AnalysisReport::new(&source, record);

  let dir = tempdir()?;
  let path = report.save(dir.path())?;
  let decoded = AnalysisReport::from_json(&std::fs::read_to_string(path)?)?;
  assert_eq!(decoded, report);
  assert_eq!(decoded.source, "Uploaded: birds.pdf");
  Ok(())
}
