use crate::domain::models::{Plan, PlanItem, SectionKind};
use crate::error::StructuralError;
use crate::services::document::Document;
use indexmap::IndexSet;
use regex::Regex;
use std::sync::LazyLock;

static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*•]\s+").expect("bullet pattern compiles"));
static NUMBERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s+").expect("numbered pattern compiles"));

/// Parse a plan document into its goal and list sections.
///
/// Only the Goal section is mandatory. Constraints and Out of Scope default to
/// empty lists when their headings are missing.
pub fn parse_plan(source: &str) -> Result<Plan, StructuralError> {
    if source.is_empty() {
        return Err(StructuralError::EmptyDocument);
    }
    let doc = Document::parse(source);

    let goal_range = doc
        .section(SectionKind::Goal)
        .ok_or(StructuralError::MissingGoal)?;
    let goal = doc.body_text(&goal_range);
    if goal.is_empty() {
        return Err(StructuralError::EmptyGoal {
            line: goal_range.body_start,
        });
    }

    let goal_line = doc
        .body_lines(&goal_range)
        .iter()
        .find(|(_, l)| !l.trim().is_empty())
        .map_or(goal_range.body_start, |&(n, _)| n);

    let items = |kind| {
        doc.section(kind)
            .map(|r| list_items(&doc.body_lines(&r)))
            .unwrap_or_default()
    };

    Ok(Plan {
        goal,
        goal_line,
        constraints: items(SectionKind::Constraints),
        out_of_scope: items(SectionKind::OutOfScope),
    })
}

pub fn extract_section(source: &str, kind: SectionKind) -> Option<(usize, String)> {
    let doc = Document::parse(source);
    let range = doc.section(kind)?;
    Some((range.body_start, doc.body_text(&range)))
}

/// Normalise a section body into distinct list items.
///
/// Each non-blank line loses one bullet marker and then one numbered marker.
/// Duplicates are dropped case-insensitively, keeping the first spelling.
pub fn list_items(body: &[(usize, &str)]) -> Vec<PlanItem> {
    let mut seen = IndexSet::new();
    let mut items = Vec::new();
    for &(line, raw) in body {
        let text = strip_list_marker(raw.trim());
        if text.is_empty() || !seen.insert(text.to_lowercase()) {
            continue;
        }
        items.push(PlanItem {
            text: text.to_string(),
            line,
        });
    }

    if items.is_empty() {
        let text = body
            .iter()
            .map(|(_, l)| *l)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string();
        if let Some(&(line, _)) = body.iter().find(|(_, l)| !l.trim().is_empty()) {
            items.push(PlanItem { text, line });
        }
    }
    items
}

fn strip_list_marker(line: &str) -> &str {
    let line = BULLET_RE.find(line).map_or(line, |m| &line[m.end()..]);
    let line = NUMBERED_RE.find(line).map_or(line, |m| &line[m.end()..]);
    line.trim()
}
