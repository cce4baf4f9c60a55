//! Artifact rendering: C# trait source and MiniYaml actor documents
//!
//! Both emitters are pure functions of their input: the same descriptors
//! always produce byte-identical text. Nothing time- or environment-dependent
//! goes into the output.

pub mod csharp;
pub mod miniyaml;

use crate::config::SynthConfig;
use crate::document::ConfigDocumentNode;
use crate::error::Result;
use crate::synth::SynthesizedTrait;

/// Render configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Include provenance header
    pub provenance: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { provenance: true }
    }
}

impl From<&SynthConfig> for RenderConfig {
    fn from(config: &SynthConfig) -> Self {
        Self {
            provenance: config.render.provenance,
        }
    }
}

/// Source of a generated file, written into its header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    pub source_id: String,
    pub source_hash: String,
}

impl Provenance {
    pub fn of(synthesized: &SynthesizedTrait) -> Self {
        Self {
            source_id: synthesized.source_id().to_string(),
            source_hash: synthesized.source_hash().to_string(),
        }
    }
}

/// Render a synthesized trait to C#
pub fn render_trait(synthesized: &SynthesizedTrait, config: &RenderConfig) -> Result<String> {
    let provenance = config.provenance.then(|| Provenance::of(synthesized));
    csharp::render(synthesized.logic(), provenance.as_ref())
}

/// Render an actor document to MiniYaml
pub fn render_actor(document: &ConfigDocumentNode) -> String {
    miniyaml::render(document)
}
