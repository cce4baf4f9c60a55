//! End-to-end tests: tree JSON to C# trait and MiniYaml actor

use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;
use traitsynth::{
    generate, synthesize_document, BehaviorNode, CapabilityTable, Error, SynthConfig,
    TraitSynthesizer,
};

const FLEE_TREE: &str = r#"{
  "id": "root",
  "condition": "Health < 50%",
  "children": [
    { "id": "flee", "action": "Move(10, 20)" }
  ]
}"#;

fn run(json: &str, trait_name: &str, actor_name: &str) -> traitsynth::Artifacts {
    let config = SynthConfig::default();
    let table = config.capability_table();
    generate(json, &config, &table, trait_name, actor_name).unwrap()
}

fn trimmed_lines(code: &str) -> Vec<&str> {
    code.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
}

// ============================================================================
// Flee example
// ============================================================================

#[test]
fn test_flee_trait_classes() {
    let out = run(FLEE_TREE, "FleeBehavior", "Rifleman");

    assert!(out.csharp.contains("public class FleeBehaviorInfo : ConditionalTraitInfo"));
    assert!(out.csharp.contains(
        "public class FleeBehavior : ConditionalTrait<FleeBehaviorInfo>, ITick, INotifyCreated"
    ));
    assert!(out.csharp.contains("public readonly BooleanExpression RequiresCondition;"));
    assert!(out
        .csharp
        .contains("public override object Create(ActorInitializer init)"));
    assert!(out
        .csharp
        .contains("return new FleeBehavior(init.Self, this);"));
    assert!(out.csharp.contains("void INotifyCreated.Created(Actor self)"));
    assert_eq!(out.dependencies, vec!["Health", "Mobile"]);
    assert!(out.diagnostics.is_empty());
}

#[test]
fn test_flee_update_hook() {
    let out = run(FLEE_TREE, "FleeBehavior", "Rifleman");
    let lines = trimmed_lines(&out.csharp);
    let start = lines
        .iter()
        .position(|l| *l == "void ITick.Tick(Actor self)")
        .unwrap();

    assert_eq!(
        lines[start + 1..start + 12].to_vec(),
        vec![
            "{",
            "if (IsTraitDisabled) return;",
            "if (!self.IsIdle) return;",
            "// node: root",
            "if (self.Trait<Health>().HP < self.Trait<Health>().MaxHP * 0.5)",
            "{",
            "// node: flee",
            "self.QueueActivity(new Move(self, new CPos(10, 20)));",
            "}",
            "}",
            "}",
        ]
    );
    assert!(out
        .csharp
        .contains("                self.QueueActivity(new Move(self, new CPos(10, 20)));"));
}

#[test]
fn test_flee_actor_document() {
    let out = run(FLEE_TREE, "FleeBehavior", "Rifleman");
    assert_eq!(
        out.miniyaml,
        "RIFLEMAN:\n\
         \tInherits: ^Soldier\n\
         \tTooltip:\n\
         \t\tName: Rifleman (AI Controlled)\n\
         \t\tGenericName: Infantry\n\
         \tRenderSprites:\n\
         \t\tImage: e1\n\
         \tFleeBehavior:\n\
         \t\tRequiresCondition: # Condition required to enable this trait.\n"
    );
    assert_eq!(out.csharp_file, "FleeBehavior.cs");
    assert_eq!(out.miniyaml_file, "rifleman.yaml");
}

#[test]
fn test_generation_is_deterministic() {
    let first = run(FLEE_TREE, "FleeBehavior", "Rifleman");
    let second = run(FLEE_TREE, "FleeBehavior", "Rifleman");
    assert_eq!(first.csharp, second.csharp);
    assert_eq!(first.miniyaml, second.miniyaml);
}

// ============================================================================
// Document and trait agree
// ============================================================================

#[test]
fn test_document_lists_exactly_the_exposed_fields() {
    let root = BehaviorNode::from_json(
        r#"{
          "id": "root",
          "children": [
            { "id": "brave", "condition": "IsBrave", "action": "Attack()" },
            { "id": "coward", "condition": "Not IsBrave", "action": "Wait(Patience)" },
            { "id": "hurt", "condition": "Health < Critical", "action": "Move(Home)" }
          ]
        }"#,
    )
    .unwrap();

    let table = CapabilityTable::builtin();
    let synthesized = TraitSynthesizer::new(&table)
        .synthesize(&root, "Medic")
        .unwrap();
    let document = synthesize_document(&root, &synthesized, "Medic", &Default::default());

    let field_names: Vec<&str> = synthesized
        .exposed_fields()
        .map(|f| f.name.as_str())
        .collect();
    let block_keys: Vec<&str> = document
        .child("Medic")
        .unwrap()
        .children
        .iter()
        .map(|c| c.key.as_str())
        .collect();

    assert_eq!(
        field_names,
        vec!["RequiresCondition", "IsBrave", "Patience", "Critical"]
    );
    assert_eq!(block_keys, field_names);
}

// ============================================================================
// Lowering behavior
// ============================================================================

#[test]
fn test_negated_siblings_become_if_else() {
    let out = run(
        r#"{
          "id": "root",
          "children": [
            { "id": "brave", "condition": "IsBrave", "action": "Attack()" },
            { "id": "coward", "condition": "!IsBrave", "action": "Move(0, 0)" }
          ]
        }"#,
        "Courage",
        "E1",
    );
    let lines = trimmed_lines(&out.csharp);
    let start = lines.iter().position(|l| *l == "// node: brave").unwrap();

    assert_eq!(
        lines[start..start + 10].to_vec(),
        vec![
            "// node: brave",
            "if (Info.IsBrave)",
            "{",
            "self.QueueActivity(new Hunt(self));",
            "}",
            "else",
            "{",
            "// node: coward",
            "self.QueueActivity(new Move(self, new CPos(0, 0)));",
            "}",
        ]
    );
    assert_eq!(out.dependencies, vec!["Armament", "AttackBase", "AutoTarget", "Mobile"]);
    assert!(out.miniyaml.contains("\t\tIsBrave: false # "));
}

#[test]
fn test_unknown_vocabulary_degrades() {
    let out = run(
        r#"{
          "id": "root",
          "condition": "IsBrave",
          "children": [
            { "id": "dance", "action": "Dance()" },
            { "id": "home", "action": "Move(Home)" }
          ]
        }"#,
        "Odd",
        "E1",
    );

    assert!(out.csharp.contains("if (Info.IsBrave)"));
    assert!(out.csharp.contains("public readonly bool IsBrave = false;"));
    assert!(out.csharp.contains("// Unmapped action: Dance()"));
    assert!(out.csharp.contains("// WARNING: move target 'Home'"));
    assert!(out
        .csharp
        .contains("self.QueueActivity(new Move(self, self.Location));"));
    assert_eq!(out.dependencies, vec!["Mobile"]);
}

#[test]
fn test_line_breaks_in_tree_text_stay_inert() {
    let out = run(
        r#"{
          "id": "x\nself.Kill();",
          "condition": "Is\nBrave",
          "children": [
            { "id": "dance", "action": "Dance()\nself.Kill();" }
          ]
        }"#,
        "Odd",
        "E1",
    );

    let lines = trimmed_lines(&out.csharp);
    assert!(!lines.contains(&"self.Kill();"));
    assert!(lines.contains(&"// node: x self.Kill();"));
    assert!(lines.contains(&"// Unmapped action: Dance() self.Kill();"));
    assert!(lines.contains(&"[Desc(\"Enables behavior guarded by 'Is Brave'.\")]"));

    for line in out.miniyaml.lines().skip(1) {
        assert!(line.starts_with('\t'), "line escaped its block: {:?}", line);
    }
    assert!(out
        .miniyaml
        .contains("\t\tIsBrave: false # Enables behavior guarded by 'Is Brave'.\n"));
}

#[test]
fn test_capability_condition_records_dependency() {
    let out = run(
        r#"{"id": "root", "condition": "Not cloak", "action": "Wait(15)"}"#,
        "Reveal",
        "E1",
    );
    assert!(out.csharp.contains(
        "if (!(self.TraitsImplementing<Cloak>().Any(t => !t.IsTraitDisabled && !t.IsTraitPaused)))"
    ));
    assert!(out.csharp.contains("self.QueueActivity(new Wait(15));"));
    assert_eq!(out.dependencies, vec!["Cloak"]);
}

#[test]
fn test_leaf_children_are_reported_and_noted() {
    let out = run(
        r#"{
          "id": "root",
          "children": [
            { "id": "attack", "action": "Attack()", "children": [{ "id": "x", "action": "Wait(1)" }] }
          ]
        }"#,
        "Greedy",
        "E1",
    );
    assert_eq!(out.diagnostics.len(), 1);
    assert!(out.diagnostics[0].contains("'attack'"));
    assert!(out
        .csharp
        .contains("// NOTE: 1 child node(s) of leaf 'attack' were not lowered"));
    assert!(!out.csharp.contains("new Wait(1)"));
}

#[test]
fn test_tree_keys_are_case_insensitive() {
    let out = run(
        r#"{"ID": "root", "Condition": "EnemyNearby", "CHILDREN": [{"Id": "hit", "Action": "hunt"}]}"#,
        "Guard",
        "E1",
    );
    assert!(out
        .csharp
        .contains("PlayerRelationship.Enemy"));
    assert!(out.csharp.contains("self.QueueActivity(new Hunt(self));"));
}

// ============================================================================
// Fatal input
// ============================================================================

#[test]
fn test_fatal_inputs() {
    let config = SynthConfig::default();
    let table = config.capability_table();

    assert!(matches!(
        generate("null", &config, &table, "A", "B"),
        Err(Error::MissingRoot)
    ));
    assert!(matches!(
        generate("[1, 2]", &config, &table, "A", "B"),
        Err(Error::TreeParse(_))
    ));
    assert!(matches!(
        generate("{ not json", &config, &table, "A", "B"),
        Err(Error::TreeParse(_))
    ));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_from_directory_shapes_output() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("traitsynth.yaml"),
        r#"
version: 1
namespace: OpenRA.Mods.Example.Traits
render:
  provenance: false
  comments: false
trait:
  idle_guard: false
  scan_interval: 30
actor:
  inherits: ^Infantry
capabilities:
  - name: Disguise
    dependency: Disguise
"#,
    )
    .unwrap();

    let config = SynthConfig::load_from_dir(dir.path()).unwrap().unwrap();
    let table = config.capability_table();
    let out = generate(
        r#"{"id": "root", "condition": "Disguise", "action": "Wait(5)"}"#,
        &config,
        &table,
        "Spy",
        "Spy",
    )
    .unwrap();

    assert!(out.csharp.starts_with("using System;"));
    assert!(out.csharp.contains("namespace OpenRA.Mods.Example.Traits"));
    assert!(!out.csharp.contains("self.IsIdle"));
    assert!(!out.csharp.contains("// node:"));
    assert!(out.csharp.contains("if (--ticksUntilNextScan > 0) return;"));
    assert!(out.csharp.contains("TraitsImplementing<Disguise>()"));
    assert_eq!(out.dependencies, vec!["Disguise"]);
    assert!(out.miniyaml.contains("\tInherits: ^Infantry\n"));
    assert!(out
        .miniyaml
        .contains("\t\tScanInterval: 30 # Ticks between evaluations of the behavior tree.\n"));
}

#[test]
fn test_provenance_header_is_stable() {
    let out = run(FLEE_TREE, "FleeBehavior", "Rifleman");
    let root = BehaviorNode::from_json(FLEE_TREE).unwrap();
    assert!(out
        .csharp
        .starts_with("// GENERATED FROM behavior tree 'root'\n"));
    assert!(out
        .csharp
        .contains(&format!("// TREE HASH: {}", root.hash())));
}
