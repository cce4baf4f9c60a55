//! Trait synthesis: lowering a behavior tree into an engine trait
//!
//! Produces a logic class (`<Name>`) that carries its paired configuration
//! class (`<Name>Info`). The tree is lowered into the logic class's update
//! hook; identifiers the tree uses but the engine does not know become
//! configuration fields on the Info class.
//!
//! ## Generated shape
//!
//! ```text
//! public class FleeInfo : ConditionalTraitInfo
//! {
//!     public readonly BooleanExpression RequiresCondition;
//!     public override object Create(ActorInitializer init) { ... }
//! }
//!
//! public class Flee : ConditionalTrait<FleeInfo>, ITick, INotifyCreated
//! {
//!     public Flee(Actor self, FleeInfo info) : base(info) { }
//!     void INotifyCreated.Created(Actor self) { ... }
//!     void ITick.Tick(Actor self)
//!     {
//!         if (IsTraitDisabled) return;
//!         ...lowered tree...
//!     }
//! }
//! ```

mod fields;
mod lower;
mod mapping;

pub use fields::ensure_field;
pub use mapping::{classify_action, ActionCall, ActionKind, ConditionSubject};

use crate::capability::CapabilityLookup;
use crate::config::SynthConfig;
use crate::error::{Error, Result};
use crate::model::{ClassDescriptor, FieldDescriptor, MethodDescriptor, DEFAULT_NAMESPACE};
use crate::tree::BehaviorNode;
use crate::util::{strip_non_alphanumeric, to_pascal_case};
use log::{debug, info};
use std::collections::BTreeSet;

use lower::TraitBuilder;

/// Name of the universal enable/disable gate on every Info class
pub const GATE_FIELD: &str = "RequiresCondition";

/// Engine interface providing the per-tick hook
pub const UPDATE_CAPABILITY: &str = "ITick";

/// Engine interface providing the creation hook
pub const CREATION_CAPABILITY: &str = "INotifyCreated";

/// Private cooldown counter on the logic class
const COOLDOWN_COUNTER: &str = "ticksUntilNextScan";

/// Knobs for the generated update hook
#[derive(Debug, Clone)]
pub struct SynthesisOptions {
    /// Namespace for both classes
    pub namespace: String,
    /// Return early while the actor has queued activities
    pub idle_guard: bool,
    /// Evaluate every N ticks via an exposed `ScanInterval` field
    pub scan_interval: Option<u32>,
    /// Emit `// node: <id>` markers in the lowered body
    pub node_comments: bool,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            idle_guard: true,
            scan_interval: None,
            node_comments: true,
        }
    }
}

impl From<&SynthConfig> for SynthesisOptions {
    fn from(config: &SynthConfig) -> Self {
        Self {
            namespace: config.namespace.clone(),
            idle_guard: config.trait_options.idle_guard,
            scan_interval: config.trait_options.scan_interval,
            node_comments: config.render.comments,
        }
    }
}

/// Output of trait synthesis
///
/// Only [`TraitSynthesizer::synthesize`] can build one, so anything that takes
/// a `&SynthesizedTrait` is guaranteed to see the same lowering the C#
/// artifact came from.
#[derive(Debug, Clone)]
pub struct SynthesizedTrait {
    logic: ClassDescriptor,
    source_id: String,
    source_hash: String,
}

impl SynthesizedTrait {
    /// The logic class, carrying its paired Info class
    pub fn logic(&self) -> &ClassDescriptor {
        &self.logic
    }

    /// The paired Info class
    pub fn config(&self) -> Option<&ClassDescriptor> {
        self.logic.paired_config.as_deref()
    }

    /// Logic class name, also the actor document block key
    pub fn class_name(&self) -> &str {
        &self.logic.name
    }

    /// Engine traits the actor needs for the generated code to work
    pub fn dependencies(&self) -> &BTreeSet<String> {
        &self.logic.required_runtime_dependencies
    }

    /// Exposed Info fields in declaration order
    pub fn exposed_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.logic
            .paired_config
            .iter()
            .flat_map(|config| config.exposed_fields())
    }

    /// Id of the tree root this trait came from
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// Content hash of the source tree
    pub fn source_hash(&self) -> &str {
        &self.source_hash
    }

    pub fn into_logic(self) -> ClassDescriptor {
        self.logic
    }
}

/// Lowers behavior trees into trait class descriptors
pub struct TraitSynthesizer<'a> {
    lookup: &'a dyn CapabilityLookup,
    options: SynthesisOptions,
}

impl<'a> TraitSynthesizer<'a> {
    pub fn new(lookup: &'a dyn CapabilityLookup) -> Self {
        Self {
            lookup,
            options: SynthesisOptions::default(),
        }
    }

    pub fn with_options(lookup: &'a dyn CapabilityLookup, options: SynthesisOptions) -> Self {
        Self { lookup, options }
    }

    /// Synthesize the trait for `root` under the given trait name
    ///
    /// Fails only when `name` cannot become a class name. Unknown vocabulary
    /// in the tree degrades to configuration fields and placeholder comments.
    pub fn synthesize(&self, root: &BehaviorNode, name: &str) -> Result<SynthesizedTrait> {
        let class_name = class_name_for(name)?;
        let info_name = format!("{}Info", class_name);
        debug!(
            "synthesizing trait {} from tree '{}' ({} nodes)",
            class_name,
            root.id,
            root.node_count()
        );

        let mut config = ClassDescriptor::new(&info_name, "ConditionalTraitInfo");
        config.namespace = self.options.namespace.clone();
        config.fields.push(FieldDescriptor::exposed(
            GATE_FIELD,
            "BooleanExpression",
            None,
            "Condition required to enable this trait.",
        ));
        let mut create = MethodDescriptor::new("Create", "object").with_param("ActorInitializer", "init");
        create.is_override = true;
        create.push(0, format!("return new {}(init.Self, this);", class_name));
        config.methods.push(create);

        let mut logic =
            ClassDescriptor::new(&class_name, format!("ConditionalTrait<{}>", info_name));
        logic.namespace = self.options.namespace.clone();
        logic.add_capability(UPDATE_CAPABILITY);
        logic.add_capability(CREATION_CAPABILITY);

        let mut ctor = MethodDescriptor::constructor(&class_name)
            .with_param("Actor", "self")
            .with_param(&info_name, "info");
        ctor.base_initializer = Some("base(info)".into());
        logic.methods.push(ctor);

        let mut created = MethodDescriptor::new("Created", "void")
            .with_param("Actor", "self")
            .bound_to(CREATION_CAPABILITY);
        created.push(0, "// Resolve trait references here.");
        logic.methods.push(created);

        let mut tick = MethodDescriptor::new("Tick", "void")
            .with_param("Actor", "self")
            .bound_to(UPDATE_CAPABILITY);
        tick.push(0, "if (IsTraitDisabled) return;");
        if self.options.idle_guard {
            tick.push(0, "if (!self.IsIdle) return;");
        }
        if let Some(interval) = self.options.scan_interval {
            let field = ensure_field(
                &mut config,
                "ScanInterval",
                "int",
                Some(interval.to_string()),
                "Ticks between evaluations of the behavior tree.",
            );
            logic
                .fields
                .push(FieldDescriptor::private_state(COOLDOWN_COUNTER, "int"));
            tick.push(0, format!("if (--{} > 0) return;", COOLDOWN_COUNTER));
            tick.push(0, format!("{} = Info.{};", COOLDOWN_COUNTER, field));
        }

        let mut builder = TraitBuilder::new(self.lookup, config, self.options.node_comments);
        builder.lower_node(root, 0, false);
        let (config, body, dependencies) = builder.finish();

        tick.body.extend(body);
        logic.methods.push(tick);
        logic.required_runtime_dependencies = dependencies;
        logic.paired_config = Some(Box::new(config));

        info!(
            "synthesized trait {} ({} dependencies)",
            class_name,
            logic.required_runtime_dependencies.len()
        );

        Ok(SynthesizedTrait {
            logic,
            source_id: root.id.clone(),
            source_hash: root.hash(),
        })
    }
}

/// Turn a user-supplied trait name into a class name
fn class_name_for(name: &str) -> Result<String> {
    let class_name = strip_non_alphanumeric(&to_pascal_case(name.trim()));
    match class_name.chars().next() {
        None => Err(Error::Other(format!(
            "Trait name '{}' has no identifier characters",
            name
        ))),
        Some(c) if c.is_ascii_digit() => Err(Error::Other(format!(
            "Trait name '{}' must not start with a digit",
            name
        ))),
        Some(_) => Ok(class_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::CapabilityTable;

    fn synth(root: &BehaviorNode) -> SynthesizedTrait {
        let table = CapabilityTable::builtin();
        TraitSynthesizer::new(&table)
            .synthesize(root, "FleeBehavior")
            .unwrap()
    }

    fn tick_lines(t: &SynthesizedTrait) -> Vec<String> {
        t.logic()
            .method("Tick")
            .unwrap()
            .body
            .iter()
            .map(|s| s.text.clone())
            .collect()
    }

    #[test]
    fn test_class_pair_shape() {
        let t = synth(&BehaviorNode::new("root"));
        let logic = t.logic();
        let config = t.config().unwrap();

        assert_eq!(logic.name, "FleeBehavior");
        assert_eq!(logic.base_type, "ConditionalTrait<FleeBehaviorInfo>");
        assert_eq!(logic.implemented_capabilities, vec!["ITick", "INotifyCreated"]);
        assert_eq!(config.name, "FleeBehaviorInfo");
        assert_eq!(config.base_type, "ConditionalTraitInfo");
        assert_eq!(config.fields.len(), 1);
        assert_eq!(config.fields[0].name, GATE_FIELD);
        assert!(config.fields[0].exposed_to_config);
        assert!(config.method("Create").unwrap().is_override);
    }

    #[test]
    fn test_boilerplate_methods() {
        let t = synth(&BehaviorNode::new("root"));
        let names: Vec<_> = t.logic().methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["FleeBehavior", "Created", "Tick"]);

        let ctor = &t.logic().methods[0];
        assert!(ctor.is_constructor());
        assert_eq!(ctor.base_initializer.as_deref(), Some("base(info)"));

        let tick = t.logic().method("Tick").unwrap();
        assert_eq!(tick.explicit_capability_binding.as_deref(), Some("ITick"));
        assert_eq!(tick.body[0].text, "if (IsTraitDisabled) return;");
        assert_eq!(tick.body[1].text, "if (!self.IsIdle) return;");
    }

    #[test]
    fn test_scan_interval_adds_cooldown() {
        let table = CapabilityTable::builtin();
        let options = SynthesisOptions {
            idle_guard: false,
            scan_interval: Some(20),
            ..Default::default()
        };
        let t = TraitSynthesizer::with_options(&table, options)
            .synthesize(&BehaviorNode::new("root"), "Scout")
            .unwrap();

        let field = t.config().unwrap().field("ScanInterval").unwrap();
        assert_eq!(field.default_value.as_deref(), Some("20"));
        assert!(t.logic().field(COOLDOWN_COUNTER).is_some());
        let lines = tick_lines(&t);
        assert!(!lines.iter().any(|l| l.contains("IsIdle")));
        assert!(lines.contains(&"if (--ticksUntilNextScan > 0) return;".to_string()));
        assert!(lines.contains(&"ticksUntilNextScan = Info.ScanInterval;".to_string()));
    }

    #[test]
    fn test_health_and_move_tree() {
        let root = BehaviorNode::new("root")
            .with_condition("Health < 50%")
            .with_child(BehaviorNode::new("flee").with_action("Move(10, 20)"));
        let t = synth(&root);
        let lines = tick_lines(&t);

        assert!(lines
            .iter()
            .any(|l| l == "if (self.Trait<Health>().HP < self.Trait<Health>().MaxHP * 0.5)"));
        assert!(lines
            .iter()
            .any(|l| l == "self.QueueActivity(new Move(self, new CPos(10, 20)));"));
        assert_eq!(t.config().unwrap().fields.len(), 1);
        assert!(t.dependencies().contains("Health"));
        assert!(t.dependencies().contains("Mobile"));
    }

    #[test]
    fn test_class_name_normalization() {
        assert_eq!(class_name_for("flee_behavior").unwrap(), "FleeBehavior");
        assert_eq!(class_name_for(" Medic ").unwrap(), "Medic");
        assert!(class_name_for("!!").is_err());
        assert!(class_name_for("9lives").is_err());
    }

    #[test]
    fn test_source_provenance() {
        let root = BehaviorNode::new("root").with_condition("EnemyVisible");
        let t = synth(&root);
        assert_eq!(t.source_id(), "root");
        assert_eq!(t.source_hash(), root.hash());
    }
}
