//! Markdown-shaped rendition of the pdfium text layer.
//!
//! PDFs carry no structural markup, so this backend reconstructs a light
//! markdown skeleton from layout cues in the extracted text: short standalone
//! lines become headings, common bullet glyphs become list items, and blank
//! lines delimit paragraphs. The shaping is a pure text transform, separate
//! from extraction, so it can be exercised without a PDF.

use crate::backend::PageExtractor;
use crate::backends::pdfium;
use crate::error::Result;
use std::path::Path;

/// Lines at most this long, without terminal punctuation, are treated as
/// headings when surrounded by blank lines.
const HEADING_MAX_CHARS: usize = 60;

const BULLET_PREFIXES: [&str; 4] = ["• ", "◦ ", "- ", "* "];

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn looks_like_heading(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.chars().count() > HEADING_MAX_CHARS {
        return false;
    }
    // A sentence fragment ending in punctuation is prose, not a title.
    if trimmed.ends_with(['.', ',', ';', ':', '?', '!']) {
        return false;
    }
    // Lines that are mostly digits (page numbers, totals) are not headings.
    let alphabetic = trimmed.chars().filter(|c| c.is_alphabetic()).count();
    alphabetic * 2 > trimmed.chars().count()
}

fn as_bullet(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    BULLET_PREFIXES
        .iter()
        .find_map(|prefix| trimmed.strip_prefix(prefix))
        .map(str::trim_start)
}

fn as_numbered_item(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim_start();
    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() || digits.len() > 3 {
        return None;
    }
    let rest = &trimmed[digits.len()..];
    let rest = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')'))?;
    if !rest.starts_with(' ') {
        return None;
    }
    Some((&trimmed[..digits.len()], rest.trim_start()))
}

/// Shape one page of extracted text into markdown.
pub fn text_to_markdown(page_text: &str) -> String {
    let lines: Vec<&str> = page_text.lines().collect();
    let mut output = String::with_capacity(page_text.len() + page_text.len() / 8);

    for (index, line) in lines.iter().enumerate() {
        if is_blank(line) {
            if !output.ends_with("\n\n") && !output.is_empty() {
                output.push('\n');
            }
            continue;
        }

        if let Some(item) = as_bullet(line) {
            output.push_str("- ");
            output.push_str(item);
            output.push('\n');
            continue;
        }

        if let Some((number, item)) = as_numbered_item(line) {
            output.push_str(number);
            output.push_str(". ");
            output.push_str(item);
            output.push('\n');
            continue;
        }

        let prev_blank = index == 0 || is_blank(lines[index - 1]);
        let next_blank = index + 1 >= lines.len() || is_blank(lines[index + 1]);
        if prev_blank && next_blank && looks_like_heading(line) {
            output.push_str("## ");
            output.push_str(line.trim());
            output.push_str("\n\n");
            continue;
        }

        output.push_str(line.trim_end());
        output.push('\n');
    }

    while output.ends_with('\n') {
        output.pop();
    }
    output
}

/// Markdown backend over the pdfium text layer. One page per invocation.
pub struct PdfiumMarkdownBackend;

impl PdfiumMarkdownBackend {
    pub fn new() -> Result<Self> {
        // Same binding probe as the plain text backend.
        super::PdfiumTextBackend::new()?;
        Ok(Self)
    }
}

impl PageExtractor for PdfiumMarkdownBackend {
    fn extract_page(&self, path: &Path, page_index: usize) -> Result<String> {
        let text = pdfium::extract_page_text(path, page_index)?;
        Ok(text_to_markdown(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_standalone_line_becomes_heading() {
        let markdown = text_to_markdown("Introduction\n\nThis chapter covers the basics of parsing.\n");
        assert!(markdown.starts_with("## Introduction\n"));
        assert!(markdown.contains("This chapter covers the basics of parsing."));
    }

    #[test]
    fn sentence_is_not_a_heading() {
        let markdown = text_to_markdown("This is a full sentence.\n\nAnd another one follows it here.");
        assert!(!markdown.contains("## "));
    }

    #[test]
    fn page_number_line_is_not_a_heading() {
        let markdown = text_to_markdown("42\n\nBody text continues on this page as usual.");
        assert!(!markdown.contains("## 42"));
    }

    #[test]
    fn bullets_are_normalized() {
        let markdown = text_to_markdown("• first item\n◦ second item\n* third item");
        assert_eq!(markdown, "- first item\n- second item\n- third item");
    }

    #[test]
    fn numbered_items_are_kept() {
        let markdown = text_to_markdown("1. alpha\n2) beta");
        assert_eq!(markdown, "1. alpha\n2. beta");
    }

    #[test]
    fn year_like_numbering_is_left_alone() {
        let markdown = text_to_markdown("1999. was a year of change in the industry overall");
        assert!(!markdown.starts_with("1999. was"));
        assert!(markdown.contains("1999. was a year of change"));
    }

    #[test]
    fn blank_lines_collapse_to_paragraph_breaks() {
        let markdown = text_to_markdown("first paragraph line one.\n\n\n\nsecond paragraph, line one.");
        assert_eq!(markdown, "first paragraph line one.\n\nsecond paragraph, line one.");
    }

    #[test]
    fn empty_page_yields_empty_markdown() {
        assert_eq!(text_to_markdown(""), "");
        assert_eq!(text_to_markdown("\n\n\n"), "");
    }
}
