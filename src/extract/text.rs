//! Plain text extraction.

use unicode_normalization::UnicodeNormalization;

use crate::error::Result;
use crate::parser::PdfDocument;

/// Extract the document text, one page after another.
pub fn extract_text(doc: &PdfDocument) -> Result<String> {
    let pages = doc.page_texts()?;
    log::debug!("extracted text from {} page(s)", pages.len());
    Ok(join_pages(&pages))
}

/// NFC-normalize each page and join them with a newline.
fn join_pages(pages: &[String]) -> String {
    pages
        .iter()
        .map(|page| page.trim_end().nfc().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_pages() {
        let pages = vec!["First page\n\n".to_string(), "Second page\n".to_string()];
        assert_eq!(join_pages(&pages), "First page\nSecond page");
    }

    #[test]
    fn test_join_pages_normalizes() {
        // "e" + combining acute accent becomes a single "é"
        let pages = vec!["caf\u{0065}\u{0301}".to_string()];
        assert_eq!(join_pages(&pages), "caf\u{00e9}");
    }

    #[test]
    fn test_join_no_pages() {
        assert_eq!(join_pages(&[]), "");
    }
}
