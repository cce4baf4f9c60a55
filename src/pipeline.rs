//! End-to-end generation: tree JSON in, C# trait and actor MiniYaml out

use crate::actor::synthesize_document;
use crate::capability::CapabilityLookup;
use crate::config::SynthConfig;
use crate::error::Result;
use crate::render::{render_actor, render_trait, RenderConfig};
use crate::synth::{SynthesisOptions, TraitSynthesizer};
use crate::tree::BehaviorNode;
use crate::validate::validate;
use log::{info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Everything one generation run produces
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Artifacts {
    /// Generated trait class name
    pub trait_name: String,

    /// Suggested file name for the C# source
    pub csharp_file: String,
    pub csharp: String,

    /// Suggested file name for the actor document
    pub miniyaml_file: String,
    pub miniyaml: String,

    /// Structural findings; generation proceeds regardless
    pub diagnostics: Vec<String>,

    /// Engine traits the actor needs, sorted
    pub dependencies: Vec<String>,
}

/// Parse, validate, synthesize and render
///
/// Fails only on a missing or malformed root, an unusable trait name, or a
/// formatter error. Validation findings are reported in
/// [`Artifacts::diagnostics`] and never stop generation.
pub fn generate(
    json: &str,
    config: &SynthConfig,
    lookup: &dyn CapabilityLookup,
    trait_name: &str,
    actor_name: &str,
) -> Result<Artifacts> {
    let root = BehaviorNode::from_json(json)?;
    generate_from_tree(&root, config, lookup, trait_name, actor_name)
}

/// [`generate`] for an already parsed tree
pub fn generate_from_tree(
    root: &BehaviorNode,
    config: &SynthConfig,
    lookup: &dyn CapabilityLookup,
    trait_name: &str,
    actor_name: &str,
) -> Result<Artifacts> {
    info!("generating trait '{}' from tree '{}'", trait_name, root.id);

    let diagnostics = validate(root);
    for diagnostic in &diagnostics {
        warn!("{}", diagnostic);
    }

    let synthesized = TraitSynthesizer::with_options(lookup, SynthesisOptions::from(config))
        .synthesize(root, trait_name)?;
    let csharp = render_trait(&synthesized, &RenderConfig::from(config))?;

    let document = synthesize_document(root, &synthesized, actor_name, &config.actor);
    let miniyaml = render_actor(&document);

    info!(
        "generated {} ({} bytes) and actor {} ({} bytes)",
        synthesized.class_name(),
        csharp.len(),
        document.key,
        miniyaml.len()
    );

    Ok(Artifacts {
        trait_name: synthesized.class_name().to_string(),
        csharp_file: format!("{}.cs", synthesized.class_name()),
        csharp,
        miniyaml_file: format!("{}.yaml", document.key.to_lowercase()),
        miniyaml,
        diagnostics,
        dependencies: synthesized.dependencies().iter().cloned().collect(),
    })
}
