//! Umlaut expansion for transliterated answers.
//!
//! Players typed `ae`, `oe` and `ue` for `ä`, `ö` and `ü`. Rules are applied
//! one after another over the whole cell. The `ue` rule is skipped where the
//! `u` belongs to a `qu`, so `quelle` and `queue` survive: a match is guarded
//! when the vowels directly before it are preceded by `q`. Patterns and the
//! guard are case-sensitive, so a capitalized `Quelle` still becomes `Qülle`.

use std::borrow::Cow;

use regex::{NoExpand, Regex};

use crate::error::Result;

/// Vowels that may sit between a guard character and a guarded match.
const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'ä', 'ö', 'ü'];

/// A single substitution rule.
#[derive(Debug, Clone)]
struct Rule {
    pattern: Regex,
    replacement: String,
    /// Skip matches preceded by this character, ignoring vowels in between.
    unless_after: Option<char>,
}

impl Rule {
    fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let Some(guard) = self.unless_after else {
            return self.pattern.replace_all(text, NoExpand(&self.replacement));
        };

        let mut out: Option<String> = None;
        let mut last = 0;
        for m in self.pattern.find_iter(text) {
            if text[..m.start()].chars().rev().find(|c| !VOWELS.contains(c)) == Some(guard) {
                continue;
            }
            let out = out.get_or_insert_with(|| String::with_capacity(text.len()));
            out.push_str(&text[last..m.start()]);
            out.push_str(&self.replacement);
            last = m.end();
        }

        match out {
            Some(mut out) => {
                out.push_str(&text[last..]);
                Cow::Owned(out)
            }
            None => Cow::Borrowed(text),
        }
    }
}

/// Ordered set of substitution rules applied to dataset cells.
#[derive(Debug, Clone)]
pub struct UmlautNormalizer {
    rules: Vec<Rule>,
}

impl UmlautNormalizer {
    /// Create an empty normalizer that leaves text unchanged.
    #[must_use]
    pub const fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule replacing every match of `pattern` with `replacement`.
    ///
    /// # Errors
    ///
    /// Returns an error if `pattern` is not a valid regular expression.
    pub fn with_rule(mut self, pattern: &str, replacement: &str) -> Result<Self> {
        self.rules.push(Rule {
            pattern: Regex::new(pattern)?,
            replacement: replacement.to_owned(),
            unless_after: None,
        });
        Ok(self)
    }

    /// Append a rule that skips matches preceded by `guard`, possibly with
    /// vowels in between.
    ///
    /// # Errors
    ///
    /// Returns an error if `pattern` is not a valid regular expression.
    pub fn with_guarded_rule(mut self, pattern: &str, replacement: &str, guard: char) -> Result<Self> {
        self.rules.push(Rule {
            pattern: Regex::new(pattern)?,
            replacement: replacement.to_owned(),
            unless_after: Some(guard),
        });
        Ok(self)
    }

    /// Apply all rules in order.
    #[must_use]
    pub fn normalize<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let mut current = Cow::Borrowed(text);
        for rule in &self.rules {
            let replaced = match rule.apply(&current) {
                Cow::Owned(s) => Some(s),
                Cow::Borrowed(_) => None,
            };
            if let Some(s) = replaced {
                current = Cow::Owned(s);
            }
        }
        current
    }
}

impl Default for UmlautNormalizer {
    #[allow(clippy::unwrap_used)]
    fn default() -> Self {
        let rule = |pattern: &str, replacement: &str, unless_after| Rule {
            pattern: Regex::new(pattern).unwrap(),
            replacement: replacement.to_owned(),
            unless_after,
        };
        Self { rules: vec![rule("ae", "ä", None), rule("oe", "ö", None), rule("ue", "ü", Some('q'))] }
    }
}
