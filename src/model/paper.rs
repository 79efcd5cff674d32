//! Bibliographic structure produced by the `paper` command.

use serde::{Deserialize, Serialize};

/// An academic paper: title, authors and sectioned body text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    /// Paper title
    pub name: Option<String>,

    /// Author names, in document order
    pub authors: Vec<String>,

    /// Publication year, from the creation date
    pub year: Option<i32>,

    /// Body sections
    pub sections: Vec<Section>,
}

impl Paper {
    /// Total number of paragraphs across all sections.
    pub fn paragraph_count(&self) -> usize {
        self.sections.iter().map(|s| s.paragraphs.len()).sum()
    }
}

/// A titled run of paragraphs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text (empty for the front matter before the first heading)
    pub title: String,

    /// Paragraph texts
    pub paragraphs: Vec<String>,
}

impl Section {
    /// Create an empty section.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            paragraphs: Vec::new(),
        }
    }

    /// Whether the section has no paragraphs.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_count() {
        let mut intro = Section::new("1 Introduction");
        intro.paragraphs.push("First.".to_string());
        intro.paragraphs.push("Second.".to_string());
        let paper = Paper {
            name: Some("Title".to_string()),
            sections: vec![intro, Section::new("2 Methods")],
            ..Default::default()
        };
        assert_eq!(paper.paragraph_count(), 2);
        assert!(paper.sections[1].is_empty());
    }

    #[test]
    fn test_json_round_trip() {
        let paper = Paper {
            name: Some("A Study".to_string()),
            authors: vec!["Ada Lovelace".to_string()],
            year: Some(1843),
            sections: vec![Section::new("Abstract")],
        };
        let json = serde_json::to_string(&paper).unwrap();
        let back: Paper = serde_json::from_str(&json).unwrap();
        assert_eq!(paper, back);
    }
}
