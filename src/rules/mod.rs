//! Declarative rule table.
//!
//! A [`Rule`] maps a set of OR-combined patterns to a severity [`Category`]
//! and a message template. The [`RuleTable`] owns every active rule in
//! declaration order and the compiled line matchers for each [`RuleScope`].
//! A table that exists has already passed validation: unique ids, at least
//! one pattern per rule, compilable regexes.

mod builtin;
mod matcher;

pub use builtin::builtin_rules;
pub use matcher::LineMatcher;

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::{CustomRule, MatchMode, RulesConfig};
use crate::error::{CompatError, Result};

/// Placeholder substituted with the occurrence count when rendering.
pub const COUNT_PLACEHOLDER: &str = "{count}";

/// Severity tier, ordered by blocking impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Critical,
    Warning,
    Info,
    Compatible,
}

impl Category {
    /// All tiers in report order.
    pub const ALL: [Self; 4] = [Self::Critical, Self::Warning, Self::Info, Self::Compatible];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Compatible => "compatible",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which lines a rule is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleScope {
    /// Lines of source files selected by the extension allowlist.
    #[default]
    Source,
    /// Lines of dependency manifests such as `package.json`.
    Manifest,
}

impl RuleScope {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Manifest => "manifest",
        }
    }
}

/// One alternative of a rule's pattern set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// Plain substring, matched literally.
    Substring(String),
    /// Regular expression (`regex` crate syntax).
    Regex(String),
}

impl Pattern {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Substring(s) | Self::Regex(s) => s,
        }
    }

    /// Regex source equivalent to this pattern.
    pub(crate) fn regex_source(&self) -> String {
        match self {
            Self::Substring(s) => regex::escape(s),
            Self::Regex(r) => r.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub id: String,
    pub patterns: Vec<Pattern>,
    pub category: Category,
    pub scope: RuleScope,
    pub message_template: String,
}

impl Rule {
    /// Render the message template for `count` occurrences.
    #[must_use]
    pub fn render_message(&self, count: usize) -> String {
        self.message_template
            .replace(COUNT_PLACEHOLDER, &count.to_string())
    }

    fn from_custom(custom: &CustomRule) -> Self {
        let patterns = custom
            .patterns
            .iter()
            .map(|p| match custom.match_mode {
                MatchMode::Substring => Pattern::Substring(p.clone()),
                MatchMode::Regex => Pattern::Regex(p.clone()),
            })
            .collect();

        Self {
            id: custom.id.clone(),
            patterns,
            category: custom.category,
            scope: custom.scope,
            message_template: custom.message.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(CompatError::RuleTable {
                id: self.id.clone(),
                reason: "rule id must not be empty".to_string(),
            });
        }
        if self.patterns.is_empty() {
            return Err(CompatError::RuleTable {
                id: self.id.clone(),
                reason: "rule has no patterns".to_string(),
            });
        }
        if let Some(empty) = self.patterns.iter().find(|p| p.as_str().is_empty()) {
            return Err(CompatError::RuleTable {
                id: self.id.clone(),
                reason: format!("empty pattern {empty:?} would match every line"),
            });
        }
        if !self.message_template.contains(COUNT_PLACEHOLDER) {
            return Err(CompatError::RuleTable {
                id: self.id.clone(),
                reason: format!("message template must contain {COUNT_PLACEHOLDER}"),
            });
        }
        Ok(())
    }
}

/// Validated, compiled set of active rules.
#[derive(Debug)]
pub struct RuleTable {
    rules: IndexMap<String, Rule>,
    source: LineMatcher,
    manifest: LineMatcher,
}

impl RuleTable {
    /// Build a table from rules in declaration order.
    ///
    /// # Errors
    /// Returns `RuleTable` for a rule with no patterns, an empty id, a
    /// duplicate id or a template without `{count}`, and `InvalidRegex` for a
    /// pattern that does not compile.
    pub fn new(rules: Vec<Rule>) -> Result<Self> {
        let mut by_id = IndexMap::with_capacity(rules.len());
        for rule in rules {
            rule.validate()?;
            if by_id.contains_key(&rule.id) {
                return Err(CompatError::RuleTable {
                    id: rule.id,
                    reason: "duplicate rule id".to_string(),
                });
            }
            by_id.insert(rule.id.clone(), rule);
        }

        let source = LineMatcher::build(by_id.values().enumerate(), RuleScope::Source)?;
        let manifest = LineMatcher::build(by_id.values().enumerate(), RuleScope::Manifest)?;

        Ok(Self {
            rules: by_id,
            source,
            manifest,
        })
    }

    /// The built-in Workers compatibility rules.
    ///
    /// # Errors
    /// Only fails if the built-in table itself is malformed.
    pub fn builtin() -> Result<Self> {
        Self::new(builtin_rules())
    }

    /// Built-in rules minus `rules.disable`, followed by `rules.custom`.
    ///
    /// # Errors
    /// Returns a configuration error for an unknown id in `disable`, and the
    /// errors of [`RuleTable::new`] for malformed custom rules.
    pub fn from_config(config: &RulesConfig) -> Result<Self> {
        let builtin = builtin_rules();

        if let Some(unknown) = config
            .disable
            .iter()
            .find(|id| !builtin.iter().any(|r| &r.id == *id))
        {
            return Err(CompatError::Config(format!(
                "rules.disable references unknown rule '{unknown}'"
            )));
        }

        let mut rules: Vec<Rule> = builtin
            .into_iter()
            .filter(|r| !config.disable.contains(&r.id))
            .collect();
        rules.extend(config.custom.iter().map(Rule::from_custom));

        Self::new(rules)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule at a declaration index.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Rule> {
        self.rules.get_index(index).map(|(_, r)| r)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.get(id)
    }

    /// Declaration index of a rule id.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.rules.get_index_of(id)
    }

    /// Rules in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    /// Compiled matcher for the lines of one scope.
    #[must_use]
    pub const fn matcher(&self, scope: RuleScope) -> &LineMatcher {
        match scope {
            RuleScope::Source => &self.source,
            RuleScope::Manifest => &self.manifest,
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
