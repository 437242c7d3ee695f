// Ant-style pattern matching for mount-point / path classification.
// `*` matches within one path segment, `**` crosses separators, `?` is one
// character. Compiled to anchored regexes once at startup.

use anyhow::Context;
use regex::Regex;
use serde::Deserialize;

/// A named glob expression from configuration. Declaration order matters:
/// classification returns the first matching name.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedPattern {
    pub name: String,
    pub pattern: String,
}

/// The compiled, immutable pattern set. Safe for concurrent reads.
#[derive(Debug)]
pub struct PatternSet {
    entries: Vec<(String, Regex)>,
}

impl PatternSet {
    pub fn compile(patterns: &[NamedPattern]) -> anyhow::Result<Self> {
        let mut entries = Vec::with_capacity(patterns.len());
        for p in patterns {
            let regex = Regex::new(&ant_to_regex(&p.pattern))
                .with_context(|| format!("pattern '{}': invalid expression {:?}", p.name, p.pattern))?;
            entries.push((p.name.clone(), regex));
        }
        Ok(Self { entries })
    }

    /// Returns the name of the first pattern whose expression fully matches
    /// `path`, in declaration order. First match wins, not best match.
    pub fn classify(&self, path: &str) -> Option<&str> {
        for (name, regex) in &self.entries {
            if regex.is_match(path) {
                tracing::debug!(path, pattern = %name, "path classified");
                return Some(name);
            }
        }
        None
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Translates one Ant-style glob into an anchored regex. A single scan keeps
/// the operators from colliding: a naive replace pipeline would rewrite the
/// `*` inside the `.*` that `**` just produced.
fn ant_to_regex(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len() + 8);
    out.push('^');
    let mut chars = glob.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => {
                if chars.peek() == Some(&'*') {
                    chars.next();
                    out.push_str(".*");
                } else {
                    out.push_str("[^/]*");
                }
            }
            '?' => out.push('.'),
            other => out.push_str(&regex::escape(&other.to_string())),
        }
    }
    out.push('$');
    out
}
