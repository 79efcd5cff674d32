//! Bibliographic extraction: title, authors, year and sectioned text.

use chrono::Datelike;
use regex::Regex;

use crate::error::Result;
use crate::model::{Paper, Section};
use crate::parser::{parse_pdf_date, PdfDocument};

/// Builds a [`Paper`] from document metadata and page text.
pub struct PaperExtractor {
    numbered_heading: Regex,
    named_heading: Regex,
    author_separator: Regex,
}

impl Default for PaperExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PaperExtractor {
    /// Create an extractor with the default heading rules.
    pub fn new() -> Self {
        Self {
            numbered_heading: Regex::new(r"^(?:\d+(?:\.\d+)*\.?|[IVX]+\.)\s+\p{Lu}[^.!?]{0,78}$")
                .expect("numbered heading pattern is valid"),
            named_heading: Regex::new(
                r"(?i)^(?:abstract|introduction|background|related work|methods?|methodology|results|discussion|conclusions?|acknowledge?ments?|references|bibliography|appendix(?:\s+[A-Z])?)$",
            )
            .expect("named heading pattern is valid"),
            author_separator: Regex::new(r"\s*(?:;|,|&|\band\b)\s*")
                .expect("author separator pattern is valid"),
        }
    }

    /// Extract a paper from a loaded document.
    pub fn extract(&self, doc: &PdfDocument) -> Result<Paper> {
        let pages = doc.page_texts()?;

        let name = doc
            .info_string(b"Title")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .or_else(|| first_line(&pages));

        let authors = doc
            .info_string(b"Author")
            .map(|a| self.split_authors(&a))
            .unwrap_or_default();

        let year = doc
            .info_string(b"CreationDate")
            .and_then(|d| parse_pdf_date(&d))
            .map(|d| d.year());

        let paper = Paper {
            name,
            authors,
            year,
            sections: self.sections(&pages),
        };
        log::debug!(
            "paper {:?}: {} author(s), {} section(s), {} paragraph(s)",
            paper.name,
            paper.authors.len(),
            paper.sections.len(),
            paper.paragraph_count()
        );
        Ok(paper)
    }

    /// Whether a trimmed line reads as a section heading.
    pub fn is_heading(&self, line: &str) -> bool {
        self.named_heading.is_match(line) || self.numbered_heading.is_match(line)
    }

    fn split_authors(&self, authors: &str) -> Vec<String> {
        self.author_separator
            .split(authors.trim())
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(String::from)
            .collect()
    }

    /// Group lines into sections and paragraphs. Blank lines end a paragraph;
    /// headings start a new section.
    fn sections(&self, pages: &[String]) -> Vec<Section> {
        let mut sections = vec![Section::new("")];
        let mut paragraph = String::new();

        for line in pages.iter().flat_map(|p| p.lines()).map(str::trim) {
            if line.is_empty() {
                flush(&mut sections, &mut paragraph);
            } else if self.is_heading(line) {
                flush(&mut sections, &mut paragraph);
                sections.push(Section::new(line));
            } else {
                append_line(&mut paragraph, line);
            }
        }
        flush(&mut sections, &mut paragraph);

        if sections.len() > 1 && sections[0].is_empty() {
            sections.remove(0);
        }
        sections
    }
}

/// Extract a paper with the default rules.
pub fn extract_paper(doc: &PdfDocument) -> Result<Paper> {
    PaperExtractor::new().extract(doc)
}

fn first_line(pages: &[String]) -> Option<String> {
    pages
        .first()?
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(String::from)
}

fn flush(sections: &mut [Section], paragraph: &mut String) {
    if paragraph.is_empty() {
        return;
    }
    if let Some(section) = sections.last_mut() {
        section.paragraphs.push(std::mem::take(paragraph));
    }
}

/// Join a line onto a paragraph, undoing end-of-line hyphenation.
fn append_line(paragraph: &mut String, line: &str) {
    if paragraph.is_empty() {
        paragraph.push_str(line);
        return;
    }
    let hyphenated = paragraph.ends_with('-')
        && paragraph
            .chars()
            .rev()
            .nth(1)
            .is_some_and(char::is_alphabetic)
        && line.starts_with(char::is_lowercase);
    if hyphenated {
        paragraph.pop();
    } else {
        paragraph.push(' ');
    }
    paragraph.push_str(line);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_heading() {
        let extractor = PaperExtractor::new();
        for line in ["Abstract", "1 Introduction", "2.3 Related Work", "IV. Results", "REFERENCES"] {
            assert!(extractor.is_heading(line), "{line:?} should be a heading");
        }
        for line in [
            "We study things.",
            "1 the lowercase start",
            "3 Results were good. Very good.",
            "Introduction to the problem of extraction",
        ] {
            assert!(!extractor.is_heading(line), "{line:?} should not be a heading");
        }
    }

    #[test]
    fn test_split_authors() {
        let extractor = PaperExtractor::new();
        assert_eq!(
            extractor.split_authors("Ada Lovelace; Charles Babbage and Alan Turing"),
            vec!["Ada Lovelace", "Charles Babbage", "Alan Turing"]
        );
        assert!(extractor.split_authors("  ").is_empty());
    }

    #[test]
    fn test_sections_and_paragraphs() {
        let extractor = PaperExtractor::new();
        let pages = vec![
            "A Study of Things\nAbstract\nWe study\nthings.\n\nSecond para.\n".to_string(),
            "1 Introduction\nThings are in-\nteresting.\n".to_string(),
        ];
        let sections = extractor.sections(&pages);
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].title, "");
        assert_eq!(sections[0].paragraphs, vec!["A Study of Things"]);
        assert_eq!(sections[1].title, "Abstract");
        assert_eq!(sections[1].paragraphs, vec!["We study things.", "Second para."]);
        assert_eq!(sections[2].title, "1 Introduction");
        assert_eq!(sections[2].paragraphs, vec!["Things are interesting."]);
    }

    #[test]
    fn test_sections_drop_empty_front_matter() {
        let extractor = PaperExtractor::new();
        let sections = extractor.sections(&["Abstract\nText.".to_string()]);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Abstract");
    }

    #[test]
    fn test_append_line_keeps_real_hyphens() {
        let mut paragraph = "state-of-the-".to_string();
        append_line(&mut paragraph, "Art");
        assert_eq!(paragraph, "state-of-the- Art");

        let mut paragraph = "well-".to_string();
        append_line(&mut paragraph, "known");
        assert_eq!(paragraph, "wellknown");
    }

    #[test]
    fn test_first_line() {
        assert_eq!(
            first_line(&["\n  Title Here \nmore".to_string()]).as_deref(),
            Some("Title Here")
        );
        assert_eq!(first_line(&[]), None);
    }
}
