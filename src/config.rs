//! traitsynth configuration
//!
//! Handles loading of `traitsynth.yaml`, which sets generation defaults for a
//! mod: target namespace, render options, update-hook guards, actor document
//! defaults and extra capabilities layered over the built-in table.

use crate::capability::{CapabilityRecord, CapabilityTable};
use crate::error::{Error, Result};
use crate::model::DEFAULT_NAMESPACE;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name searched for in a directory
pub const CONFIG_FILE_NAME: &str = "traitsynth.yaml";

/// Root configuration (`traitsynth.yaml`)
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SynthConfig {
    /// Schema version for migrations
    pub version: u32,

    /// Namespace for generated classes
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Render options
    #[serde(default)]
    pub render: RenderOptions,

    /// Update-hook options
    #[serde(default, rename = "trait")]
    pub trait_options: TraitOptions,

    /// Actor document defaults
    #[serde(default)]
    pub actor: ActorDefaults,

    /// Extra capabilities, layered over the built-in table
    #[serde(default)]
    pub capabilities: Vec<CapabilityRecord>,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_true() -> bool {
    true
}

/// Options for the C# emitter
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RenderOptions {
    /// Emit the provenance header
    #[serde(default = "default_true")]
    pub provenance: bool,

    /// Emit a `// node: <id>` comment before each lowered node
    #[serde(default = "default_true")]
    pub comments: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            provenance: true,
            comments: true,
        }
    }
}

/// Options shaping the generated update hook
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TraitOptions {
    /// Skip ticks while the actor is busy with an activity
    #[serde(default = "default_true")]
    pub idle_guard: bool,

    /// Evaluate the tree every N ticks instead of every tick
    #[serde(default)]
    pub scan_interval: Option<u32>,
}

impl Default for TraitOptions {
    fn default() -> Self {
        Self {
            idle_guard: true,
            scan_interval: None,
        }
    }
}

/// Fixed entries of the generated actor document
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ActorDefaults {
    /// Template the actor inherits from
    #[serde(default = "default_inherits")]
    pub inherits: String,

    /// Tooltip generic name
    #[serde(default = "default_generic_name")]
    pub generic_name: String,

    /// Sprite image
    #[serde(default = "default_image")]
    pub image: String,
}

fn default_inherits() -> String {
    "^Soldier".to_string()
}

fn default_generic_name() -> String {
    "Infantry".to_string()
}

fn default_image() -> String {
    "e1".to_string()
}

impl Default for ActorDefaults {
    fn default() -> Self {
        Self {
            inherits: default_inherits(),
            generic_name: default_generic_name(),
            image: default_image(),
        }
    }
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            version: 1,
            namespace: default_namespace(),
            render: RenderOptions::default(),
            trait_options: TraitOptions::default(),
            actor: ActorDefaults::default(),
            capabilities: Vec::new(),
        }
    }
}

impl SynthConfig {
    /// Parse configuration from YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: SynthConfig = serde_norway::from_str(yaml)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e)))?;

        if config.version != 1 {
            return Err(Error::Config(format!(
                "Unsupported {} version: {}",
                CONFIG_FILE_NAME, config.version
            )));
        }
        if config.trait_options.scan_interval == Some(0) {
            return Err(Error::Config("trait.scan_interval must be at least 1".into()));
        }

        Ok(config)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(Error::Io)?;
        Self::from_yaml(&content)
    }

    /// Load `traitsynth.yaml` from a directory, `None` if absent
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let file = dir.join(CONFIG_FILE_NAME);
        if !file.exists() {
            return Ok(None);
        }
        Self::load(&file).map(Some)
    }

    /// Built-in capabilities with this config's records layered on top
    pub fn capability_table(&self) -> CapabilityTable {
        let mut table = CapabilityTable::builtin();
        table.extend(self.capabilities.iter().cloned());
        table
    }
}
