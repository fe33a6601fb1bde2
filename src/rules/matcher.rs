use regex::{Regex, RegexSet};

use super::{Rule, RuleScope};
use crate::error::{CompatError, Result};

/// All patterns of one scope compiled into a single `RegexSet`.
///
/// `owners[i]` is the declaration index of the rule that contributed pattern
/// `i`. Patterns are added rule by rule, so `owners` is non-decreasing.
#[derive(Debug)]
pub struct LineMatcher {
    set: RegexSet,
    owners: Vec<usize>,
}

impl LineMatcher {
    pub(super) fn build<'a>(
        rules: impl Iterator<Item = (usize, &'a Rule)>,
        scope: RuleScope,
    ) -> Result<Self> {
        let mut sources = Vec::new();
        let mut owners = Vec::new();

        for (index, rule) in rules.filter(|(_, r)| r.scope == scope) {
            for pattern in &rule.patterns {
                let source = pattern.regex_source();
                // Compile individually first so the error names the rule.
                Regex::new(&source).map_err(|e| CompatError::InvalidRegex {
                    id: rule.id.clone(),
                    pattern: pattern.as_str().to_string(),
                    source: e,
                })?;
                sources.push(source);
                owners.push(index);
            }
        }

        let set = RegexSet::new(&sources).map_err(|e| {
            CompatError::Config(format!("rule patterns could not be combined: {e}"))
        })?;

        Ok(Self { set, owners })
    }

    /// Call `on_match` once for every rule with at least one pattern matching
    /// `line`, in ascending declaration order.
    pub fn for_each_match(&self, line: &str, mut on_match: impl FnMut(usize)) {
        let mut last = None;
        for pattern_index in self.set.matches(line).iter() {
            let owner = self.owners[pattern_index];
            if last != Some(owner) {
                on_match(owner);
                last = Some(owner);
            }
        }
    }

    /// Number of compiled patterns.
    #[must_use]
    pub fn pattern_count(&self) -> usize {
        self.owners.len()
    }
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
