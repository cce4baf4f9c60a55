//! Actor document synthesis
//!
//! Builds the MiniYaml actor definition that attaches a synthesized trait to
//! a unit. The trait block is derived from the exposed fields of the trait's
//! Info class, so the document and the C# always agree.

use crate::config::ActorDefaults;
use crate::document::ConfigDocumentNode;
use crate::synth::SynthesizedTrait;
use crate::tree::BehaviorNode;
use log::debug;

/// Build the actor document for `entity_name` carrying `synthesized`
pub fn synthesize_document(
    root: &BehaviorNode,
    synthesized: &SynthesizedTrait,
    entity_name: &str,
    defaults: &ActorDefaults,
) -> ConfigDocumentNode {
    let entity_name = entity_name.trim();
    debug!(
        "building actor {} for trait {} (tree '{}')",
        entity_name,
        synthesized.class_name(),
        root.id
    );

    let mut trait_block = ConfigDocumentNode::block(synthesized.class_name());
    for field in synthesized.exposed_fields() {
        let mut entry = ConfigDocumentNode::entry(&field.name, field.document_value());
        if !field.description.is_empty() {
            entry = entry.with_comment(&field.description);
        }
        trait_block.children.push(entry);
    }

    ConfigDocumentNode::block(entity_name.to_uppercase())
        .with_child(ConfigDocumentNode::entry("Inherits", &defaults.inherits))
        .with_child(
            ConfigDocumentNode::block("Tooltip")
                .with_child(ConfigDocumentNode::entry(
                    "Name",
                    format!("{} (AI Controlled)", entity_name),
                ))
                .with_child(ConfigDocumentNode::entry(
                    "GenericName",
                    &defaults.generic_name,
                )),
        )
        .with_child(
            ConfigDocumentNode::block("RenderSprites")
                .with_child(ConfigDocumentNode::entry("Image", &defaults.image)),
        )
        .with_child(trait_block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::CapabilityTable;
    use crate::synth::TraitSynthesizer;
    use pretty_assertions::assert_eq;

    fn document(root: &BehaviorNode) -> ConfigDocumentNode {
        let table = CapabilityTable::builtin();
        let synthesized = TraitSynthesizer::new(&table)
            .synthesize(root, "Medic")
            .unwrap();
        synthesize_document(root, &synthesized, "medic", &ActorDefaults::default())
    }

    #[test]
    fn test_fixed_entries() {
        let doc = document(&BehaviorNode::new("root"));
        assert_eq!(doc.key, "MEDIC");
        let keys: Vec<_> = doc.children.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["Inherits", "Tooltip", "RenderSprites", "Medic"]);
        assert_eq!(doc.child("Inherits").unwrap().value.as_deref(), Some("^Soldier"));
        let tooltip = doc.child("Tooltip").unwrap();
        assert_eq!(
            tooltip.child("Name").unwrap().value.as_deref(),
            Some("medic (AI Controlled)")
        );
        assert_eq!(
            doc.child("RenderSprites")
                .and_then(|r| r.child("Image"))
                .and_then(|i| i.value.as_deref()),
            Some("e1")
        );
    }

    #[test]
    fn test_trait_block_mirrors_exposed_fields() {
        let root = BehaviorNode::new("root")
            .with_condition("IsBrave")
            .with_child(BehaviorNode::new("wait").with_action("Wait(Patience)"));
        let doc = document(&root);
        let block = doc.child("Medic").unwrap();

        let entries: Vec<_> = block
            .children
            .iter()
            .map(|c| (c.key.as_str(), c.value.as_deref().unwrap_or("")))
            .collect();
        assert_eq!(
            entries,
            vec![("RequiresCondition", ""), ("IsBrave", "false"), ("Patience", "25")]
        );
        assert_eq!(
            block.child("RequiresCondition").unwrap().comment.as_deref(),
            Some("Condition required to enable this trait.")
        );
    }

    #[test]
    fn test_configured_defaults() {
        let table = CapabilityTable::builtin();
        let root = BehaviorNode::new("root");
        let synthesized = TraitSynthesizer::new(&table)
            .synthesize(&root, "Tank")
            .unwrap();
        let defaults = ActorDefaults {
            inherits: "^Tank".into(),
            generic_name: "Tank".into(),
            image: "2tnk".into(),
        };
        let doc = synthesize_document(&root, &synthesized, "HeavyTank", &defaults);
        assert_eq!(doc.key, "HEAVYTANK");
        assert_eq!(doc.child("Inherits").unwrap().value.as_deref(), Some("^Tank"));
    }
}
