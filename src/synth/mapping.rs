//! Condition and action vocabulary
//!
//! Both dispatches are closed enums with a single fallback variant. Unknown
//! condition subjects become `bool` configuration fields; unknown actions
//! become placeholder comments. Neither ever fails.

use super::fields::ensure_field;
use super::lower::TraitBuilder;
use crate::capability::CapabilityRecord;
use crate::condition::{parse_condition, ComparisonOp};
use log::{debug, warn};
use regex::Regex;
use std::sync::OnceLock;

/// Vitality keyword, resolved against the engine's `Health` trait
const VITALITY_KEYWORD: &str = "Health";

/// Keywords answered by scanning the actor's cell for enemies
const ADVERSARY_KEYWORDS: &[&str] = &["EnemyVisible", "EnemyNearby"];

const DEFAULT_HEALTH_THRESHOLD: &str = "50";
const DEFAULT_WAIT_TICKS: &str = "25";

/// What a condition's subject refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionSubject {
    /// A trait the actor may carry
    Capability(CapabilityRecord),
    /// The actor's hit points
    Vitality,
    /// Whether an enemy shares the actor's cell
    AdversaryVisible,
    /// Anything else, backed by a `bool` configuration field
    Flag,
}

/// Recognized action families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Wait,
    Attack,
    Move,
    Unmapped,
}

impl ActionKind {
    fn from_method(method: &str) -> Self {
        match method.to_ascii_lowercase().as_str() {
            "wait" | "delay" => ActionKind::Wait,
            "attack" | "pursue" | "hunt" => ActionKind::Attack,
            "move" | "moveto" => ActionKind::Move,
            _ => ActionKind::Unmapped,
        }
    }
}

/// An action split into method name and arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionCall {
    pub method: String,
    pub args: Vec<String>,
    /// Text between the outer parentheses
    pub raw_args: String,
    pub kind: ActionKind,
}

fn call_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\s*(?:\((.*)\))?$")
            .expect("call pattern is a valid regex")
    })
}

fn coordinate_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:\(\s*(-?\d+)\s*,\s*(-?\d+)\s*\)|(-?\d+)\s*,\s*(-?\d+))$")
            .expect("coordinate pattern is a valid regex")
    })
}

/// Split an action into method name and arguments
///
/// # Examples
/// ```
/// use traitsynth::synth::{classify_action, ActionKind};
///
/// let call = classify_action("MoveTo(10, 20)");
/// assert_eq!(call.kind, ActionKind::Move);
/// assert_eq!(call.args, vec!["10", "20"]);
/// ```
pub fn classify_action(raw: &str) -> ActionCall {
    let trimmed = raw.trim();
    match call_pattern().captures(trimmed) {
        Some(caps) => {
            let method = caps[1].to_string();
            let raw_args = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
            ActionCall {
                kind: ActionKind::from_method(&method),
                method,
                args: raw_args
                    .split(',')
                    .map(str::trim)
                    .filter(|a| !a.is_empty())
                    .map(String::from)
                    .collect(),
                raw_args: raw_args.to_string(),
            }
        }
        None => ActionCall {
            method: trimmed.to_string(),
            args: Vec::new(),
            raw_args: String::new(),
            kind: ActionKind::Unmapped,
        },
    }
}

/// `30%` or `30` as a hit-point fraction, `None` for non-numeric literals
fn percent_fraction(literal: &str) -> Option<String> {
    let number = literal.trim().trim_end_matches('%').trim();
    let value: f64 = number.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    let fraction = (value / 100.0 * 10_000.0).round() / 10_000.0;
    Some(format!("{}", fraction))
}

impl TraitBuilder<'_> {
    /// Resolve a subject, consulting the capability lookup once per subject
    pub(super) fn classify_subject(&mut self, subject: &str) -> ConditionSubject {
        let lookup = self.lookup;
        let record = self
            .resolved
            .entry(subject.to_string())
            .or_insert_with(|| {
                debug!("resolving capability '{}'", subject);
                lookup.lookup_capability(subject, true)
            })
            .clone();

        if let Some(record) = record {
            return ConditionSubject::Capability(record);
        }
        if subject.eq_ignore_ascii_case(VITALITY_KEYWORD) {
            return ConditionSubject::Vitality;
        }
        if ADVERSARY_KEYWORDS
            .iter()
            .any(|k| subject.eq_ignore_ascii_case(k))
        {
            return ConditionSubject::AdversaryVisible;
        }
        ConditionSubject::Flag
    }

    /// Translate a condition into a C# boolean expression
    pub(crate) fn map_condition(&mut self, raw: &str) -> String {
        let parsed = parse_condition(raw);

        let expr = match self.classify_subject(&parsed.subject) {
            ConditionSubject::Capability(record) => {
                self.dependencies.insert(record.dependency.clone());
                format!(
                    "self.TraitsImplementing<{}>().Any(t => !t.IsTraitDisabled && !t.IsTraitPaused)",
                    record.name
                )
            }
            ConditionSubject::Vitality => {
                self.dependencies.insert(VITALITY_KEYWORD.to_string());
                let op = parsed.operator.unwrap_or(ComparisonOp::Lt);
                let literal = parsed.literal.as_deref().unwrap_or("");
                let threshold = match percent_fraction(literal) {
                    Some(fraction) => fraction,
                    None => {
                        let raw_name = if literal.is_empty() {
                            "HealthThreshold"
                        } else {
                            literal
                        };
                        let field = ensure_field(
                            &mut self.config,
                            raw_name,
                            "int",
                            Some(DEFAULT_HEALTH_THRESHOLD.into()),
                            &format!("Health percentage threshold for '{}'.", raw.trim()),
                        );
                        format!("(Info.{} / 100f)", field)
                    }
                };
                format!(
                    "self.Trait<Health>().HP {} self.Trait<Health>().MaxHP * {}",
                    op, threshold
                )
            }
            ConditionSubject::AdversaryVisible => "self.World.ActorMap.GetActorsAt(self.Location)\
                .Any(a => a.Owner.RelationshipWith(self.Owner) == PlayerRelationship.Enemy)"
                .to_string(),
            ConditionSubject::Flag => {
                let field = ensure_field(
                    &mut self.config,
                    &parsed.subject,
                    "bool",
                    Some("false".into()),
                    &format!("Enables behavior guarded by '{}'.", parsed.subject),
                );
                debug!("condition '{}' backed by field {}", raw.trim(), field);
                format!("Info.{}", field)
            }
        };

        if parsed.negated {
            format!("!({})", expr)
        } else {
            expr
        }
    }

    /// Translate an action into update-hook lines
    pub(crate) fn map_action(&mut self, raw: &str) -> Vec<String> {
        let call = classify_action(raw);
        match call.kind {
            ActionKind::Wait => {
                let ticks = match call.args.first() {
                    Some(arg) if arg.parse::<i64>().is_ok() => arg.clone(),
                    first => {
                        let raw_name = first.map(String::as_str).unwrap_or("WaitTicks");
                        let field = ensure_field(
                            &mut self.config,
                            raw_name,
                            "int",
                            Some(DEFAULT_WAIT_TICKS.into()),
                            "Ticks to wait.",
                        );
                        format!("Info.{}", field)
                    }
                };
                vec![format!("self.QueueActivity(new Wait({}));", ticks)]
            }
            ActionKind::Attack => {
                for dependency in ["Armament", "AttackBase", "AutoTarget"] {
                    self.dependencies.insert(dependency.to_string());
                }
                vec!["self.QueueActivity(new Hunt(self));".to_string()]
            }
            ActionKind::Move => {
                self.dependencies.insert("Mobile".to_string());
                let target = coordinate_pattern().captures(&call.raw_args).and_then(|caps| {
                    let x = caps.get(1).or_else(|| caps.get(3))?;
                    let y = caps.get(2).or_else(|| caps.get(4))?;
                    Some((x.as_str().to_string(), y.as_str().to_string()))
                });
                match target {
                    Some((x, y)) => vec![format!(
                        "self.QueueActivity(new Move(self, new CPos({}, {})));",
                        x, y
                    )],
                    None => {
                        warn!("move target '{}' is not a coordinate pair", call.raw_args);
                        vec![
                            format!(
                                "// WARNING: move target '{}' is not a coordinate pair, staying in place",
                                call.raw_args
                            ),
                            "self.QueueActivity(new Move(self, self.Location));".to_string(),
                        ]
                    }
                }
            }
            ActionKind::Unmapped => {
                warn!("unmapped action '{}'", raw.trim());
                vec![format!("// Unmapped action: {}", raw.trim())]
            }
        }
    }
}
