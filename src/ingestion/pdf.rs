//! PDF text extraction.
//!
//! Uses lopdf to pull the text layer of every page. The text then goes through the free-text
//! heuristics in [`super::text`].

use lopdf::Document;

use crate::error::ExtractionError;

/// Extract the plain text of all pages, in page order.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let document = Document::load_mem(bytes)?;

    let pages: Vec<u32> = document.get_pages().keys().copied().collect();
    if pages.is_empty() {
        return Err(ExtractionError::Unsupported {
            message: "PDF has no pages".to_string(),
        });
    }

    let text = document.extract_text(&pages)?;
    tracing::debug!(pages = pages.len(), chars = text.len(), "extracted PDF text layer");
    Ok(text)
}
