//! Condition mini-language
//!
//! Conditions are short strings attached to tree nodes:
//!
//! ```text
//! Health < 30%        comparison: subject, operator, literal
//! EnemyVisible        boolean flag: subject only
//! Not EnemyVisible    negated flag (word marker, any case)
//! !HasRocket          negated flag (symbol marker)
//! ```
//!
//! Parsing never fails. Anything that does not look like a comparison becomes
//! a flag whose subject is the whole trimmed text.

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Comparison operators understood by the condition grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ComparisonOp {
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
}

impl ComparisonOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOp::Lt => "<",
            ComparisonOp::Gt => ">",
            ComparisonOp::Le => "<=",
            ComparisonOp::Ge => ">=",
            ComparisonOp::Eq => "==",
            ComparisonOp::Ne => "!=",
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComparisonOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "<" => Ok(ComparisonOp::Lt),
            ">" => Ok(ComparisonOp::Gt),
            "<=" => Ok(ComparisonOp::Le),
            ">=" => Ok(ComparisonOp::Ge),
            "==" => Ok(ComparisonOp::Eq),
            "!=" => Ok(ComparisonOp::Ne),
            other => Err(format!("unknown comparison operator '{}'", other)),
        }
    }
}

/// Structured form of a raw condition string
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ParsedCondition {
    /// What the condition talks about (e.g. "Health", "EnemyVisible")
    pub subject: String,

    /// Comparison operator, `None` for boolean flags
    pub operator: Option<ComparisonOp>,

    /// Right-hand side of a comparison (e.g. "30%")
    pub literal: Option<String>,

    /// Whether a negation marker was stripped
    pub negated: bool,
}

impl ParsedCondition {
    /// A flag has no operator, only a subject
    pub fn is_flag(&self) -> bool {
        self.operator.is_none()
    }
}

fn comparison_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Alternation order makes the two-character operators win.
    PATTERN.get_or_init(|| {
        Regex::new(r"^([A-Za-z0-9_]+)\s*(<=|>=|==|!=|<|>)\s*(.+)$")
            .expect("comparison pattern is a valid regex")
    })
}

/// Strip one leading negation marker, returning the trimmed remainder
///
/// Recognizes the word `Not` (any case) followed by whitespace and the
/// symbol `!`. A `!` that starts `!=` is an operator, not a marker.
pub fn strip_negation(text: &str) -> Option<&str> {
    let text = text.trim_start();
    if let Some(rest) = text.strip_prefix('!') {
        if !rest.starts_with('=') {
            return Some(rest.trim());
        }
    }
    let (word, rest) = text.split_at_checked(3)?;
    if word.eq_ignore_ascii_case("not") && rest.starts_with(char::is_whitespace) {
        return Some(rest.trim());
    }
    None
}

/// Parse a raw condition string
pub fn parse_condition(raw: &str) -> ParsedCondition {
    let trimmed = raw.trim();
    let (negated, body) = match strip_negation(trimmed) {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    match comparison_pattern().captures(body) {
        Some(caps) => ParsedCondition {
            subject: caps[1].to_string(),
            operator: caps[2].parse().ok(),
            literal: Some(caps[3].trim().to_string()),
            negated,
        },
        None => ParsedCondition {
            subject: body.to_string(),
            operator: None,
            literal: None,
            negated,
        },
    }
}

/// Whether two conditions are explicit negations of each other
///
/// Purely syntactic: one side must equal the other with a negation marker in
/// front. `Health < 30%` and `Health >= 30%` are not detected.
pub fn are_negations(a: &str, b: &str) -> bool {
    let a = a.trim();
    let b = b.trim();
    if a.is_empty() || b.is_empty() {
        return false;
    }
    strip_negation(a) == Some(b) || strip_negation(b) == Some(a)
}
