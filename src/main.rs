//! traitsynth CLI - Command-line interface
//!
//! Commands:
//!   parse      - Parse and validate a behavior tree
//!   condition  - Show how a condition string is parsed
//!   trait      - Generate the C# trait
//!   actor      - Generate the MiniYaml actor definition
//!   generate   - Generate both artifacts

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use traitsynth::util::to_pascal_case;
use traitsynth::*;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    let result = match args[1].as_str() {
        "parse" => cmd_parse(&args[2..]),
        "condition" => cmd_condition(&args[2..]),
        "trait" => cmd_trait(&args[2..]),
        "actor" => cmd_actor(&args[2..]),
        "generate" => cmd_generate(&args[2..]),
        "schema" => cmd_schema(&args[2..]),
        "version" | "--version" | "-v" => {
            println!("traitsynth {}", VERSION);
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            Err("Unknown command".into())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"
traitsynth - Behavior trees to OpenRA traits

USAGE:
    traitsynth <COMMAND> [OPTIONS]

COMMANDS:
    parse <tree.json> [--json]        Parse and validate a behavior tree
    condition "<text>"                Show how a condition is parsed
    trait <tree.json>                 Generate the C# trait
    actor <tree.json>                 Generate the MiniYaml actor definition
    generate <tree.json> [--json]     Generate both artifacts
    schema [tree|config|artifacts]    Print JSON schema
    version                           Print version

OPTIONS:
    --name <Trait>                    Trait class name (default: tree file name)
    --actor <Actor>                   Actor name (default: trait name)
    --config <file>                   Config file (default: ./traitsynth.yaml)
    --output <file>                   Output file (default: stdout)
    --out-dir <dir>                   Write generated files into a directory
    --json                            JSON output format (parse, generate)

ENVIRONMENT:
    RUST_LOG=debug                    Log lowering decisions to stderr

EXAMPLES:
    traitsynth parse flee.json
    traitsynth condition "Not Health < 30%"
    traitsynth trait flee.json --name FleeBehavior --output FleeBehavior.cs
    traitsynth generate flee.json --actor Rifleman --out-dir mods/ra
"#
    );
}

fn cmd_parse(args: &[String]) -> Result<()> {
    if args.is_empty() {
        return Err("Usage: traitsynth parse <tree.json> [--json]".into());
    }

    let root = load_tree(&args[0])?;
    let report = validate_report(&root);

    if args.contains(&"--json".to_string()) {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.to_report());
    }

    if report.is_valid {
        Ok(())
    } else {
        Err("Tree has structural issues".into())
    }
}

fn cmd_condition(args: &[String]) -> Result<()> {
    let Some(text) = args.first() else {
        return Err("Usage: traitsynth condition \"<text>\"".into());
    };
    let parsed = parse_condition(text);
    println!("{}", serde_json::to_string_pretty(&parsed)?);
    Ok(())
}

fn cmd_trait(args: &[String]) -> Result<()> {
    if args.is_empty() {
        return Err("Usage: traitsynth trait <tree.json> [--name N] [--output F]".into());
    }

    let artifacts = run_pipeline(args)?;
    write_output(&parse_output_arg(args), &artifacts.csharp)
}

fn cmd_actor(args: &[String]) -> Result<()> {
    if args.is_empty() {
        return Err(
            "Usage: traitsynth actor <tree.json> [--name N] [--actor A] [--output F]".into(),
        );
    }

    let artifacts = run_pipeline(args)?;
    write_output(&parse_output_arg(args), &artifacts.miniyaml)
}

fn cmd_generate(args: &[String]) -> Result<()> {
    if args.is_empty() {
        return Err(
            "Usage: traitsynth generate <tree.json> [--name N] [--actor A] [--json] [--out-dir D]"
                .into(),
        );
    }

    let artifacts = run_pipeline(args)?;

    if let Some(dir) = parse_flag_value(args, "--out-dir", None) {
        let dir = PathBuf::from(dir);
        fs::create_dir_all(&dir).map_err(Error::Io)?;
        for (name, content) in [
            (&artifacts.csharp_file, &artifacts.csharp),
            (&artifacts.miniyaml_file, &artifacts.miniyaml),
        ] {
            let path = dir.join(name);
            fs::write(&path, content).map_err(Error::Io)?;
            eprintln!("Written to: {}", path.display());
        }
    } else if args.contains(&"--json".to_string()) {
        println!("{}", serde_json::to_string_pretty(&artifacts)?);
        return Ok(());
    } else {
        println!("// ===== {} =====", artifacts.csharp_file);
        println!("{}", artifacts.csharp);
        println!("# ===== {} =====", artifacts.miniyaml_file);
        println!("{}", artifacts.miniyaml);
    }

    if !artifacts.dependencies.is_empty() {
        eprintln!("Required traits: {}", artifacts.dependencies.join(", "));
    }
    for diagnostic in &artifacts.diagnostics {
        eprintln!("⚠ {}", diagnostic);
    }
    Ok(())
}

fn cmd_schema(args: &[String]) -> Result<()> {
    let schema_name = args.first().map(|s| s.as_str()).unwrap_or("list");

    match schema_name {
        "list" => {
            println!("Available schemas: tree, config, artifacts, validate, condition");
            Ok(())
        }
        "tree" => print_schema::<BehaviorNode>(),
        "config" => print_schema::<SynthConfig>(),
        "artifacts" => print_schema::<Artifacts>(),
        "validate" => print_schema::<ValidationReport>(),
        "condition" => print_schema::<ParsedCondition>(),
        _ => Err(format!("Unknown schema: {}", schema_name).into()),
    }
}

fn print_schema<T: schemars::JsonSchema>() -> Result<()> {
    let schema = schemars::schema_for!(T);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn run_pipeline(args: &[String]) -> Result<Artifacts> {
    let tree_path = &args[0];
    let config = load_config(args)?;
    let table = config.capability_table();

    let default_name = Path::new(tree_path)
        .file_stem()
        .map(|s| to_pascal_case(&s.to_string_lossy()))
        .unwrap_or_else(|| "Behavior".to_string());
    let trait_name = parse_flag_value(args, "--name", Some("-n")).unwrap_or(default_name);
    let actor_name = parse_flag_value(args, "--actor", Some("-a")).unwrap_or_else(|| trait_name.clone());

    let json = fs::read_to_string(tree_path).map_err(Error::Io)?;
    generate(&json, &config, &table, &trait_name, &actor_name)
}

fn load_tree(path: &str) -> Result<BehaviorNode> {
    let json = fs::read_to_string(path).map_err(Error::Io)?;
    BehaviorNode::from_json(&json)
}

fn load_config(args: &[String]) -> Result<SynthConfig> {
    if let Some(path) = parse_flag_value(args, "--config", Some("-c")) {
        return SynthConfig::load(Path::new(&path));
    }
    let cwd = std::env::current_dir().map_err(Error::Io)?;
    Ok(SynthConfig::load_from_dir(&cwd)?.unwrap_or_default())
}

fn parse_flag_value(args: &[String], long: &str, short: Option<&str>) -> Option<String> {
    for (i, arg) in args.iter().enumerate() {
        if arg == long || Some(arg.as_str()) == short {
            if let Some(value) = args.get(i + 1) {
                return Some(value.clone());
            }
        }
    }
    None
}

fn parse_output_arg(args: &[String]) -> Option<PathBuf> {
    parse_flag_value(args, "--output", Some("-o")).map(PathBuf::from)
}

fn write_output(path: &Option<PathBuf>, content: &str) -> Result<()> {
    match path {
        Some(p) => {
            fs::write(p, content).map_err(Error::Io)?;
            eprintln!("Written to: {}", p.display());
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
