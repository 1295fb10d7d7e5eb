//! Line-oriented view of a plan document shared by the parser and the linter.
//!
//! HTML comments are blanked before any structure is detected, so a heading or
//! separator inside `<!-- ... -->` never opens or closes a section. Blanking
//! keeps every line in place: line numbers reported downstream always refer to
//! the document as the author wrote it.

use crate::domain::models::SectionKind;
use regex::Regex;
use std::sync::LazyLock;

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^##\s+(.*?)\s*$").expect("heading pattern compiles"));

const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";
const SEPARATOR: &str = "---";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub title: String,
    pub line: usize,
    pub kind: Option<SectionKind>,
}

/// Location of one recognised section.
///
/// `body_start..body_end` is a half-open range of 1-based line numbers; an
/// empty body has `body_start == body_end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionRange {
    pub kind: SectionKind,
    pub heading_line: usize,
    pub body_start: usize,
    pub body_end: usize,
}

#[derive(Debug, Clone)]
pub struct Document {
    raw: Vec<String>,
    clean: Vec<String>,
}

pub fn normalize_newlines(raw: &str) -> String {
    raw.replace("\r\n", "\n").replace('\r', "\n")
}

/// Blank out HTML comments, carrying open-comment state across lines.
pub fn strip_comments<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut in_comment = false;
    lines
        .iter()
        .map(|line| {
            let mut rest = line.as_ref();
            let mut kept = String::new();
            loop {
                if in_comment {
                    match rest.find(COMMENT_CLOSE) {
                        Some(end) => {
                            rest = &rest[end + COMMENT_CLOSE.len()..];
                            in_comment = false;
                        }
                        None => break,
                    }
                } else {
                    match rest.find(COMMENT_OPEN) {
                        Some(start) => {
                            kept.push_str(&rest[..start]);
                            rest = &rest[start + COMMENT_OPEN.len()..];
                            in_comment = true;
                        }
                        None => {
                            kept.push_str(rest);
                            break;
                        }
                    }
                }
            }
            kept
        })
        .collect()
}

/// Title of a level-2 heading line, if the line is one. A bare `## ` is still
/// a heading; its title is empty.
pub fn heading_title(line: &str) -> Option<&str> {
    HEADING_RE
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

fn is_separator(line: &str) -> bool {
    line.trim() == SEPARATOR
}

impl Document {
    pub fn parse(source: &str) -> Self {
        let raw: Vec<String> = normalize_newlines(source)
            .split('\n')
            .map(str::to_string)
            .collect();
        let clean = strip_comments(&raw);
        Self { raw, clean }
    }

    pub fn line_count(&self) -> usize {
        self.clean.len()
    }

    pub fn line(&self, line: usize) -> &str {
        line.checked_sub(1)
            .and_then(|i| self.clean.get(i))
            .map_or("", String::as_str)
    }

    pub fn raw_lines(&self) -> &[String] {
        &self.raw
    }

    /// Every level-2 heading in document order, recognised or not.
    pub fn headings(&self) -> Vec<Heading> {
        self.clean
            .iter()
            .enumerate()
            .filter_map(|(i, line)| {
                heading_title(line).map(|title| Heading {
                    title: title.to_string(),
                    line: i + 1,
                    kind: SectionKind::from_title(title),
                })
            })
            .collect()
    }

    /// First occurrence of `kind`; later duplicates are ignored.
    pub fn section(&self, kind: SectionKind) -> Option<SectionRange> {
        let heading = self
            .headings()
            .into_iter()
            .find(|h| h.kind == Some(kind))?;
        Some(self.range_after(kind, heading.line))
    }

    fn range_after(&self, kind: SectionKind, heading_line: usize) -> SectionRange {
        let body_start = heading_line + 1;
        let mut body_end = body_start;
        while body_end <= self.clean.len() {
            let line = self.line(body_end);
            if heading_title(line).is_some() || is_separator(line) {
                break;
            }
            body_end += 1;
        }
        SectionRange {
            kind,
            heading_line,
            body_start,
            body_end,
        }
    }

    pub fn body_lines(&self, range: &SectionRange) -> Vec<(usize, &str)> {
        (range.body_start..range.body_end)
            .map(|n| (n, self.line(n)))
            .collect()
    }

    pub fn body_text(&self, range: &SectionRange) -> String {
        self.body_lines(range)
            .iter()
            .map(|(_, l)| *l)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }

    /// Source text with a section body swapped for `body`. Used when `init`
    /// seeds a template goal with the caller's description.
    pub fn replace_body(&self, range: &SectionRange, body: &str) -> String {
        let start = range.body_start - 1;
        let end = (range.body_end - 1).min(self.raw.len());
        let mut out: Vec<&str> = Vec::with_capacity(self.raw.len() + 2);
        out.extend(self.raw[..start].iter().map(String::as_str));
        out.push(body);
        out.push("");
        out.extend(self.raw[end..].iter().map(String::as_str));
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_single_and_multi_line_comments() {
        let lines = ["keep <!-- gone --> kept", "a <!-- open", "still gone", "end --> b"];
        let out = strip_comments(&lines);
        assert_eq!(out, vec!["keep  kept", "a ", "", " b"]);
    }

    #[test]
    fn heading_inside_comment_is_not_a_heading() {
        let doc = Document::parse("## Goal\nreal\n<!--\n## Constraints\n-->\n");
        assert!(doc.section(SectionKind::Constraints).is_none());
        let goal = doc.section(SectionKind::Goal).expect("goal");
        assert_eq!(doc.body_text(&goal), "real");
    }

    #[test]
    fn section_ends_at_separator_or_next_heading() {
        let doc = Document::parse("## Goal\none\n---\ntwo\n## Constraints\n- c\n");
        let goal = doc.section(SectionKind::Goal).expect("goal");
        assert_eq!(goal.body_start, 2);
        assert_eq!(goal.body_end, 3);
        let cons = doc.section(SectionKind::Constraints).expect("constraints");
        assert_eq!(doc.body_lines(&cons), vec![(6, "- c"), (7, "")]);
    }

    #[test]
    fn heading_match_is_case_insensitive_and_first_wins() {
        let doc = Document::parse("## goal\nfirst\n## GOAL\nsecond\n");
        let goal = doc.section(SectionKind::Goal).expect("goal");
        assert_eq!(doc.body_text(&goal), "first");
        assert_eq!(doc.headings().len(), 2);
    }

    #[test]
    fn crlf_is_normalised() {
        let doc = Document::parse("## Goal\r\nText\r\n");
        let goal = doc.section(SectionKind::Goal).expect("goal");
        assert_eq!(doc.body_text(&goal), "Text");
    }

    #[test]
    fn level_three_heading_is_body_text() {
        assert!(heading_title("### Goal").is_none());
        assert!(heading_title("##Goal").is_none());
        assert_eq!(heading_title("##   Out of Scope  "), Some("Out of Scope"));
        assert_eq!(heading_title("##  "), Some(""));
    }

    #[test]
    fn untitled_heading_closes_the_section() {
        let doc = Document::parse("## Goal
x
## Constraints
- a
## 
- b
");
        let cons = doc.section(SectionKind::Constraints).expect("constraints");
        assert_eq!(cons.body_end, 5);
        let untitled = &doc.headings()[2];
        assert_eq!((untitled.title.as_str(), untitled.line, untitled.kind), ("", 5, None));
    }

    #[test]
    fn replace_body_keeps_surrounding_sections() {
        let doc = Document::parse("# T\n\n## Goal\n<!-- hint -->\n\n## Constraints\n- c\n");
        let goal = doc.section(SectionKind::Goal).expect("goal");
        let out = doc.replace_body(&goal, "New goal");
        assert_eq!(out, "# T\n\n## Goal\nNew goal\n\n## Constraints\n- c\n");
    }
}
