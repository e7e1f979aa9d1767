//! PDF-backed page source.
//!
//! Wraps `pdfium-render` behind the [`PageSource`] seam. Extraction is eager:
//! loading walks every page once, converts its text segments into positioned
//! tokens and captures its reflowed text, and drops all pdfium handles before
//! returning. The core never touches the PDF library directly.
//!
//! pdfium binds to a native shared library at runtime; when it is missing the
//! load fails with an install hint rather than a panic.

use crate::core::PageSource;
use crate::types::{ExtractError, PageContent, Token};
use log::{debug, warn};
use pdfium_render::prelude::*;
use std::path::Path;

/// All pages of one document, extracted up front.
pub struct PdfiumSource {
    pages: Vec<PageContent>,
}

impl PdfiumSource {
    /// Open a PDF and extract every page's tokens and text.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::PdfOpen`] when the pdfium native library is
    /// unavailable or the document cannot be opened. Per-page extraction
    /// failures degrade to empty pages and are only logged.
    pub fn load(path: &Path) -> Result<Self, ExtractError> {
        let bindings = Pdfium::bind_to_system_library().map_err(|err| {
            ExtractError::pdf_open(
                path.display().to_string(),
                format!(
                    "pdfium library not available: {err:?} \
                     (install the pdfium shared library, e.g. from pdfium-binaries)"
                ),
            )
        })?;
        let pdfium = Pdfium::new(bindings);
        let path_str = path.to_string_lossy().into_owned();
        let document = pdfium
            .load_pdf_from_file(&path_str, None)
            .map_err(|err| ExtractError::pdf_open(path.display().to_string(), format!("{err:?}")))?;

        let mut pages = Vec::new();
        for (index, page) in document.pages().iter().enumerate() {
            pages.push(extract_page(index, &page));
        }
        debug!("loaded {} pages from {}", pages.len(), path.display());
        Ok(PdfiumSource { pages })
    }
}

/// Convert one pdfium page into provider content.
///
/// pdfium rects are bottom-origin; tokens carry top-offsets so that smaller
/// `top` means higher on the page, matching the row grouping's expectations.
fn extract_page(index: usize, page: &PdfPage<'_>) -> PageContent {
    let height = page.height().value as f64;
    let text_page = match page.text() {
        Ok(text) => text,
        Err(err) => {
            warn!("page {}: text extraction failed: {:?}", index, err);
            return PageContent::default();
        }
    };

    let mut tokens = Vec::new();
    for segment in text_page.segments().iter() {
        let text = segment.text();
        if text.trim().is_empty() {
            continue;
        }
        let bounds = segment.bounds();
        tokens.push(Token {
            text,
            top: height - bounds.top.value as f64,
            x0: bounds.left.value as f64,
        });
    }
    tokens.sort_by(|a, b| a.top.total_cmp(&b.top).then(a.x0.total_cmp(&b.x0)));

    let all = text_page.all();
    let text = if all.trim().is_empty() { None } else { Some(all) };
    PageContent { tokens, text }
}

impl PageSource for PdfiumSource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn positioned_tokens(&self, index: usize) -> Vec<Token> {
        self.pages
            .get(index)
            .map(|page| page.tokens.clone())
            .unwrap_or_default()
    }

    fn plain_text(&self, index: usize) -> Option<String> {
        self.pages.get(index).and_then(|page| page.text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reports_pdf_open_error() {
        // Whether pdfium itself is present or not, a nonexistent document
        // must surface as PdfOpen, never a panic.
        let result = PdfiumSource::load(Path::new("/nonexistent/statement.pdf"));
        assert!(matches!(result, Err(ExtractError::PdfOpen { .. })));
    }
}
