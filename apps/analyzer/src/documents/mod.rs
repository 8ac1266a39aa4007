//! Text Extractor — turns an uploaded résumé or job description into a single string.

pub mod handlers;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Error reading PDF: {0}")]
    Pdf(String),

    #[error("File is not valid UTF-8 text: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Unsupported file type for {slot}: {file_name}")]
    UnsupportedType { slot: DocumentSlot, file_name: String },
}

/// Declared type of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Text,
}

impl DocumentKind {
    /// Derives the kind from the file extension, falling back to the part's content type.
    pub fn detect(file_name: &str, content_type: Option<&str>) -> Option<Self> {
        let lower = file_name.to_lowercase();
        if lower.ends_with(".pdf") {
            return Some(DocumentKind::Pdf);
        }
        if lower.ends_with(".txt") {
            return Some(DocumentKind::Text);
        }
        match content_type {
            Some("application/pdf") => Some(DocumentKind::Pdf),
            Some(ct) if ct.starts_with("text/plain") => Some(DocumentKind::Text),
            _ => None,
        }
    }
}

/// Where a piece of text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentSource {
    UploadedPdf,
    UploadedText,
    Pasted,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentText {
    pub source: DocumentSource,
    pub text: String,
}

impl DocumentText {
    pub fn pasted(text: impl Into<String>) -> Self {
        Self {
            source: DocumentSource::Pasted,
            text: text.into(),
        }
    }

    /// Character count, as shown to the user after an upload.
    pub fn chars(&self) -> usize {
        self.text.chars().count()
    }
}

/// The two inputs an analysis needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentSlot {
    Resume,
    JobDescription,
}

impl DocumentSlot {
    pub fn from_path(segment: &str) -> Option<Self> {
        match segment {
            "resume" => Some(DocumentSlot::Resume),
            "job-description" => Some(DocumentSlot::JobDescription),
            _ => None,
        }
    }

    /// Résumés may be PDF or text; job descriptions are text only.
    pub fn accepts(self, kind: DocumentKind) -> bool {
        match self {
            DocumentSlot::Resume => true,
            DocumentSlot::JobDescription => kind == DocumentKind::Text,
        }
    }
}

impl std::fmt::Display for DocumentSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentSlot::Resume => f.write_str("resume"),
            DocumentSlot::JobDescription => f.write_str("job description"),
        }
    }
}

/// Extracts the full text of a document.
///
/// PDFs are read page by page; each page's text is followed by a newline.
/// Plain text must be UTF-8.
pub fn extract_text(bytes: &[u8], kind: DocumentKind) -> Result<DocumentText, ExtractError> {
    match kind {
        DocumentKind::Pdf => {
            let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
                .map_err(|e| ExtractError::Pdf(e.to_string()))?;
            let mut text = String::new();
            for page in pages {
                text.push_str(&page);
                text.push('\n');
            }
            Ok(DocumentText {
                source: DocumentSource::UploadedPdf,
                text,
            })
        }
        DocumentKind::Text => Ok(DocumentText {
            source: DocumentSource::UploadedText,
            text: String::from_utf8(bytes.to_vec())?,
        }),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    /// Builds a PDF with one page per entry, each showing its text in Courier.
    pub(crate) fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
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

        let mut kids = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Count" => kids.len() as i64,
                "Kids" => kids,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_by_extension() {
        assert_eq!(DocumentKind::detect("CV.PDF", None), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::detect("jd.txt", None), Some(DocumentKind::Text));
    }

    #[test]
    fn test_detect_falls_back_to_content_type() {
        assert_eq!(
            DocumentKind::detect("upload", Some("application/pdf")),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(
            DocumentKind::detect("upload", Some("text/plain; charset=utf-8")),
            Some(DocumentKind::Text)
        );
        assert_eq!(DocumentKind::detect("resume.docx", None), None);
    }

    #[test]
    fn test_job_description_slot_rejects_pdf() {
        assert!(DocumentSlot::Resume.accepts(DocumentKind::Pdf));
        assert!(DocumentSlot::JobDescription.accepts(DocumentKind::Text));
        assert!(!DocumentSlot::JobDescription.accepts(DocumentKind::Pdf));
    }

    #[test]
    fn test_slot_from_path() {
        assert_eq!(DocumentSlot::from_path("resume"), Some(DocumentSlot::Resume));
        assert_eq!(
            DocumentSlot::from_path("job-description"),
            Some(DocumentSlot::JobDescription)
        );
        assert_eq!(DocumentSlot::from_path("cover-letter"), None);
    }

    #[test]
    fn test_plain_text_is_decoded_verbatim() {
        let doc = extract_text("Senior Rust engineer — café".as_bytes(), DocumentKind::Text).unwrap();
        assert_eq!(doc.source, DocumentSource::UploadedText);
        assert_eq!(doc.text, "Senior Rust engineer — café");
        assert_eq!(doc.chars(), 27);
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let err = extract_text(&[0xff, 0xfe, 0x00], DocumentKind::Text).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidUtf8(_)));
    }

    #[test]
    fn test_pdf_pages_are_joined_in_order() {
        let bytes = testing::pdf_with_pages(&["Kubernetes platform", "Terraform automation"]);
        let doc = extract_text(&bytes, DocumentKind::Pdf).unwrap();
        assert_eq!(doc.source, DocumentSource::UploadedPdf);

        let first = doc.text.find("Kubernetes platform").expect("first page text");
        let second = doc.text.find("Terraform automation").expect("second page text");
        assert!(first < second, "pages out of order: {:?}", doc.text);
        assert!(doc.text[first..second].contains('\n'));
        assert!(doc.text.ends_with('\n'));
    }

    #[test]
    fn test_garbage_pdf_is_a_recoverable_error() {
        let err = extract_text(b"definitely not a pdf", DocumentKind::Pdf).unwrap_err();
        assert!(matches!(err, ExtractError::Pdf(_)));
        assert!(err.to_string().starts_with("Error reading PDF"));
    }
}
