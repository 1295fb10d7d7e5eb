use crate::domain::constants::{MAX_SUFFIX_ATTEMPTS, SCOPE_FILLER_WORDS, STOP_WORDS};
use indexmap::IndexSet;
use regex::Regex;
use std::sync::LazyLock;

static DOES_NOT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*does\s+not\s+").expect("does-not pattern compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Rule,
    FailureMode,
}

impl IdKind {
    pub fn prefix(self) -> &'static str {
        match self {
            IdKind::Rule => "constraint-",
            IdKind::FailureMode => "out-of-scope-",
        }
    }

    fn max_tokens(self) -> usize {
        match self {
            IdKind::Rule => 3,
            IdKind::FailureMode => 2,
        }
    }

    pub fn max_slug_len(self) -> usize {
        match self {
            IdKind::Rule => 30,
            IdKind::FailureMode => 25,
        }
    }

    pub fn positional(self, index: usize) -> String {
        format!("{}{index}", self.prefix())
    }
}

/// Readable identifier for `text`, ignoring collisions.
pub fn base_id(kind: IdKind, text: &str, index: usize) -> String {
    let text = match kind {
        IdKind::Rule => text,
        IdKind::FailureMode => DOES_NOT_RE.find(text).map_or(text, |m| &text[m.end()..]),
    };
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    let tokens: Vec<&str> = cleaned
        .split_whitespace()
        .filter(|w| !STOP_WORDS.contains(w))
        .filter(|w| kind == IdKind::Rule || !SCOPE_FILLER_WORDS.contains(w))
        .take(kind.max_tokens())
        .collect();

    let mut slug = tokens.join("-");
    // ASCII only at this point, so byte truncation is safe.
    slug.truncate(kind.max_slug_len());
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        kind.positional(index)
    } else {
        format!("{}{slug}", kind.prefix())
    }
}

#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    taken: IndexSet<String>,
}

impl IdAllocator {
    pub fn with_reserved<'a>(reserved: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            taken: reserved.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn is_taken(&self, id: &str) -> bool {
        self.taken.contains(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.taken.iter().map(String::as_str)
    }

    pub fn allocate(&mut self, kind: IdKind, text: &str, index: usize) -> String {
        let id = self.resolve(kind, &base_id(kind, text, index), index);
        self.taken.insert(id.clone());
        id
    }

    fn resolve(&self, kind: IdKind, base: &str, index: usize) -> String {
        if !self.is_taken(base) {
            return base.to_string();
        }
        for n in 1..=MAX_SUFFIX_ATTEMPTS {
            let candidate = format!("{base}-{n}");
            if !self.is_taken(&candidate) {
                return candidate;
            }
        }
        let positional = kind.positional(index);
        if !self.is_taken(&positional) {
            return positional;
        }
        // The set is finite, so this terminates.
        let mut n = 1;
        loop {
            let candidate = format!("{positional}-{n}");
            if !self.is_taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}
