use crate::domain::constants::{MIN_GOAL_CHARS, MIN_GOAL_WORDS, VAGUE_TERMS};
use crate::domain::models::{Diagnostic, SectionKind, Severity};
use crate::services::document::{Document, SectionRange};
use crate::services::parser::list_items;
use indexmap::IndexSet;
use regex::Regex;
use std::sync::LazyLock;

static VAGUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b(?:{})\b", VAGUE_TERMS.join("|"))).expect("vague-term pattern compiles")
});

fn diag(severity: Severity, code: &str, message: impl Into<String>, line: usize) -> Diagnostic {
    Diagnostic {
        severity,
        code: code.to_string(),
        message: message.into(),
        line,
        column: 1,
    }
}

pub fn is_goal_too_short(goal: &str) -> bool {
    goal.chars().count() < MIN_GOAL_CHARS || goal.split_whitespace().count() < MIN_GOAL_WORDS
}

pub fn is_vague(text: &str) -> bool {
    VAGUE_RE.is_match(&text.to_lowercase())
}

/// Advisory checks over a plan document. Never fails; an empty result means
/// the plan is clean.
pub fn lint_plan(source: &str) -> Vec<Diagnostic> {
    if source.is_empty() {
        return vec![diag(Severity::Error, "PF100", "plan content is empty", 1)];
    }
    let doc = Document::parse(source);
    let mut out = Vec::new();

    let mut seen = IndexSet::new();
    for heading in doc.headings() {
        match heading.kind {
            None if heading.title.is_empty() => out.push(diag(
                Severity::Error,
                "PF103",
                "section heading has no title",
                heading.line,
            )),
            None => out.push(diag(
                Severity::Error,
                "PF103",
                format!("unknown section heading: {}", heading.title),
                heading.line,
            )),
            Some(kind) if !seen.insert(kind) => out.push(diag(
                Severity::Error,
                "PF102",
                format!("duplicate section heading: {}", heading.title),
                heading.line,
            )),
            Some(_) => {}
        }
    }

    match doc.section(SectionKind::Goal) {
        None => out.push(diag(
            Severity::Error,
            "PF100",
            "missing required section: Goal",
            1,
        )),
        Some(range) => {
            let goal = doc.body_text(&range);
            if goal.is_empty() {
                out.push(diag(
                    Severity::Error,
                    "PF101",
                    "Goal section is empty",
                    range.heading_line,
                ));
            } else if is_goal_too_short(&goal) {
                out.push(diag(
                    Severity::Warn,
                    "PF202",
                    "Goal looks too short; add more detail",
                    range.heading_line,
                ));
            }
        }
    }

    if let Some(range) = check_list_section(&doc, SectionKind::Constraints, "PF200", &mut out) {
        for item in list_items(&doc.body_lines(&range)) {
            if is_vague(&item.text) {
                out.push(diag(
                    Severity::Warn,
                    "PF203",
                    "Constraint looks vague; avoid words like 'etc' or 'various'",
                    item.line,
                ));
            }
        }
    }
    check_list_section(&doc, SectionKind::OutOfScope, "PF201", &mut out);

    tracing::debug!(diagnostics = out.len(), "linted plan");
    out
}

/// Warn when an optional list section is missing or has no items. Returns the
/// range when the section has content worth inspecting further.
fn check_list_section(
    doc: &Document,
    kind: SectionKind,
    code: &str,
    out: &mut Vec<Diagnostic>,
) -> Option<SectionRange> {
    let Some(range) = doc.section(kind) else {
        out.push(diag(
            Severity::Warn,
            code,
            format!("{kind} section is missing"),
            1,
        ));
        return None;
    };
    if list_items(&doc.body_lines(&range)).is_empty() {
        out.push(diag(
            Severity::Warn,
            code,
            format!("{kind} section is empty"),
            range.heading_line,
        ));
        return None;
    }
    Some(range)
}

pub fn count(diagnostics: &[Diagnostic], severity: Severity) -> usize {
    diagnostics.iter().filter(|d| d.severity == severity).count()
}
