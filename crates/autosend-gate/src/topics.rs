use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GateError;

/// How a forbidden-topic pattern is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatcherKind {
    /// Plain substring.
    Literal,
    /// Regular expression (`regex` crate syntax).
    Regex,
}

/// Configured forbidden-topic pattern, before compilation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicPattern {
    pub id: String,
    pub kind: MatcherKind,
    pub pattern: String,
    #[serde(default = "default_true")]
    pub case_insensitive: bool,
}

fn default_true() -> bool {
    true
}

impl TopicPattern {
    pub fn literal(id: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: MatcherKind::Literal,
            pattern: pattern.into(),
            case_insensitive: true,
        }
    }

    pub fn regex(id: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: MatcherKind::Regex,
            pattern: pattern.into(),
            case_insensitive: true,
        }
    }
}

/// Patterns shipped with the engine: money amounts and the commercial/legal
/// subjects that always need a human.
pub fn default_patterns() -> Vec<TopicPattern> {
    vec![
        TopicPattern::regex("currency_amount", r"[$€£]\s?\d"),
        TopicPattern::regex("pricing", r"\b(?:pricing|price quotes?|discounts?)\b"),
        TopicPattern::regex("refund", r"\brefund(?:s|ed|ing)?\b"),
        TopicPattern::regex("invoice", r"\binvoic(?:e|es|ed|ing)\b"),
        TopicPattern::regex("contract", r"\bcontracts?\b"),
        TopicPattern::regex("legal", r"\b(?:legal|lawsuits?|attorneys?|lawyers?)\b"),
    ]
}

/// A single hit reported by the scanner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicHit {
    pub id: String,
    pub matched: String,
}

#[derive(Clone, Debug)]
struct TopicMatcher {
    id: String,
    regex: Regex,
}

/// Ordered set of compiled forbidden-topic matchers.
#[derive(Clone, Debug)]
pub struct ForbiddenTopicScanner {
    matchers: Vec<TopicMatcher>,
}

impl ForbiddenTopicScanner {
    /// Compile the given patterns, preserving their order.
    pub fn new(patterns: &[TopicPattern]) -> Result<Self, GateError> {
        let matchers = patterns
            .iter()
            .map(|p| {
                let source = match p.kind {
                    MatcherKind::Literal => regex::escape(&p.pattern),
                    MatcherKind::Regex => p.pattern.clone(),
                };
                RegexBuilder::new(&source)
                    .case_insensitive(p.case_insensitive)
                    .build()
                    .map(|regex| TopicMatcher {
                        id: p.id.clone(),
                        regex,
                    })
                    .map_err(|source| GateError::InvalidPattern {
                        id: p.id.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { matchers })
    }

    /// Scanner with [`default_patterns`].
    pub fn with_defaults() -> Result<Self, GateError> {
        Self::new(&default_patterns())
    }

    /// Scanner that never matches.
    pub fn empty() -> Self {
        Self {
            matchers: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// First match of each matcher, in configured order.
    pub fn scan(&self, text: &str) -> Vec<TopicHit> {
        let hits: Vec<TopicHit> = self
            .matchers
            .iter()
            .filter_map(|m| {
                m.regex.find(text).map(|found| TopicHit {
                    id: m.id.clone(),
                    matched: found.as_str().to_string(),
                })
            })
            .collect();

        if !hits.is_empty() {
            debug!(hits = hits.len(), "Forbidden topics found in draft");
        }
        hits
    }
}
