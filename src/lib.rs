// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # traitsynth - behavior trees to OpenRA traits
//!
//! Turns a declarative behavior tree into two artifacts for an OpenRA mod:
//!
//! - a C# trait: a logic class with a paired `Info` configuration class,
//!   the tree lowered into the per-tick update hook
//! - a MiniYaml actor definition that attaches the trait to a unit and
//!   lists every tunable the trait exposes
//!
//! ## Quick Start
//!
//! ```rust
//! use traitsynth::{generate, SynthConfig};
//!
//! let tree = r#"{
//!   "id": "root",
//!   "condition": "Health < 50%",
//!   "children": [{ "id": "flee", "action": "Move(10, 20)" }]
//! }"#;
//!
//! let config = SynthConfig::default();
//! let table = config.capability_table();
//! let out = generate(tree, &config, &table, "FleeBehavior", "Rifleman")?;
//!
//! assert!(out.csharp.contains("class FleeBehaviorInfo"));
//! assert!(out.miniyaml.starts_with("RIFLEMAN:"));
//! assert!(out.diagnostics.is_empty());
//! # Ok::<(), traitsynth::Error>(())
//! ```
//!
//! ## Tree Format
//!
//! ```json
//! {
//!   "id": "root",
//!   "children": [
//!     { "id": "brave", "condition": "IsBrave", "action": "Attack()" },
//!     { "id": "coward", "condition": "Not IsBrave", "action": "Move(0, 0)" }
//!   ]
//! }
//! ```
//!
//! Conditions are either a comparison (`Health < 30%`) or a flag
//! (`EnemyVisible`), optionally negated with `Not ` or `!`. Siblings that
//! negate each other are merged into one `if`/`else`.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                                                             │
//! │  TREE (JSON)                                                │
//! │       │                                                     │
//! │       ├──► validate(root) ──► diagnostics                   │
//! │       │                                                     │
//! │       └──► TraitSynthesizer::synthesize ──► SynthesizedTrait│
//! │                                   │                         │
//! │                                   ├──► render_trait ──► C#  │
//! │                                   │                         │
//! │                                   └──► synthesize_document  │
//! │                                          └──► MiniYaml      │
//! │                                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```

// Input model
pub mod condition;
pub mod error;
pub mod tree;
pub mod util;

// Engine knowledge and output model
pub mod capability;
pub mod document;
pub mod model;

// Operations
pub mod actor;
pub mod pipeline;
pub mod render;
pub mod synth;
pub mod validate;

// Project configuration
pub mod config;

// Re-exports
pub use actor::synthesize_document;
pub use capability::{CapabilityLookup, CapabilityRecord, CapabilityTable};
pub use condition::{are_negations, parse_condition, ComparisonOp, ParsedCondition};
pub use config::{ActorDefaults, SynthConfig};
pub use document::ConfigDocumentNode;
pub use error::{Error, Result};
pub use model::{ClassDescriptor, FieldDescriptor, MethodDescriptor, Parameter, Statement};
pub use pipeline::{generate, generate_from_tree, Artifacts};
pub use render::{render_actor, render_trait, RenderConfig};
pub use synth::{ensure_field, SynthesisOptions, SynthesizedTrait, TraitSynthesizer};
pub use tree::BehaviorNode;
pub use validate::{validate, validate_report, ValidationIssue, ValidationReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
