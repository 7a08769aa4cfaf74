// Command-line interface for unpage
//
// This binary turns the rendered HTML of a paginated document back into markdown.
//
// Exporting:
//
// The whole document is exported by default. --pages restricts the export to a page selection
// ("3", "2-5", "1,4,7"). Output goes to stdout unless -o names a file.
// Usage:
//  unpage <input> [--pages <sel>] [-o <file>]          - Export (default)
//  unpage export <input> [--pages <sel>] [-o <file>]   - Same as above (explicit)
//  unpage inspect <input> [<view>] [--json]            - Show an intermediate stage (defaults to "tree")
//  unpage --list-packs                                 - List available rule packs
//
// Extra Parameters:
//
// Configuration keys can be overridden with --extra-<key> <value>, on top of unpage.toml and
// --config. Example:
//  unpage book.html --extra-packs commonmark,footnotes --extra-escapes false

use unpage_cli::inspect;
use unpage_cli::sink::{FileSink, StdoutSink};

use clap::{Arg, ArgAction, Command, ValueHint};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use unpage_config::{Loader, UnpageConfig};
use unpage_core::{
    parse_html, Document, Exporter, PackRegistry, PageSelection, Sink, Trigger, Warning,
    DEFAULT_PACK_ORDER,
};

const SUBCOMMANDS: &[&str] = &["export", "inspect", "help"];

/// Split `--extra-<key> [value]` pairs out of the raw arguments.
///
/// A key with no value (end of arguments or followed by another flag) means "true".
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut iter = args.iter().peekable();

    while let Some(arg) = iter.next() {
        let Some(key) = arg.strip_prefix("--extra-") else {
            cleaned_args.push(arg.clone());
            continue;
        };
        let value = match iter.peek() {
            Some(next) if !next.starts_with('-') => iter.next().cloned(),
            _ => None,
        };
        extra_params.insert(key.to_string(), value.unwrap_or_else(|| "true".to_string()));
    }

    (cleaned_args, extra_params)
}

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Rendered HTML file")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn build_cli() -> Command {
    Command::new("unpage")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Export paginated HTML back to markdown")
        .long_about(
            "unpage reads the HTML a pagination engine rendered, removes the layout\n\
            scaffolding, stitches elements split across pages back together and\n\
            serializes the result as markdown.\n\n\
            Commands:\n  \
            - export:  Markdown for the whole document or a page selection (default)\n  \
            - inspect: View an intermediate stage (merged tree, fragments, pages, rules)\n\n\
            Extra Parameters:\n  \
            Use --extra-<key> [value] to override configuration keys:\n  \
            packs, reference, split-prefix, root-tag, escapes.\n\n\
            Examples:\n  \
            unpage book.html                         # Markdown to stdout\n  \
            unpage book.html --pages 3-5 -o part.md  # Pages 3 to 5 into a file\n  \
            unpage inspect book.html fragments       # Which elements were split",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-packs")
                .long("list-packs")
                .help("List available rule packs")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an unpage.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("export")
                .about("Export to markdown (default command)")
                .long_about(
                    "Export the document, or the selected pages, to markdown.\n\n\
                    Page selections use the numbers the layout engine gave the pages:\n  \
                    3        a single page\n  \
                    2-5      an inclusive range\n  \
                    1,4,7    a list, exported in the order given\n\n\
                    A selection that matches no page produces no output and fails.",
                )
                .arg(input_arg())
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("pages")
                        .long("pages")
                        .value_name("SELECTION")
                        .help("Pages to export, e.g. 3, 2-5 or 1,4,7")
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect intermediate stages of an export")
                .arg(input_arg())
                .arg(
                    Arg::new("view")
                        .help("View to show. Defaults to 'tree'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            inspect::AVAILABLE_VIEWS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the view as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    // No subcommand given: treat the first positional as the input of "export"
    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "export".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);
                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    if matches.get_flag("list-packs") {
        handle_list_packs_command();
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);
    if let Some(key) = extra_params.keys().next() {
        eprintln!("Unknown option --extra-{key}");
        std::process::exit(1);
    }

    let registry = PackRegistry::with_defaults();
    let (exporter, config_warnings) = config.exporter(&registry).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    report_warnings(&config_warnings);

    match matches.subcommand() {
        Some(("export", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            let pages = sub_matches.get_one::<String>("pages").map(|s| s.as_str());
            handle_export_command(&exporter, input, output, pages);
        }
        Some(("inspect", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let view = sub_matches
                .get_one::<String>("view")
                .map(|s| s.as_str())
                .unwrap_or(inspect::DEFAULT_VIEW);
            handle_inspect_command(&exporter, input, view, sub_matches.get_flag("json"));
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn read_document(path: &str) -> Document {
    let source = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    });
    parse_html(&source).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    })
}

/// Handle the export command
fn handle_export_command(exporter: &Exporter, input: &str, output: Option<&str>, pages: Option<&str>) {
    let doc = read_document(input);

    let filename = match output {
        Some(path) => Path::new(path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string()),
        None => default_filename(input),
    };

    let trigger = match pages {
        Some(raw) => {
            let selection: PageSelection = raw.parse().unwrap_or_else(|e| {
                eprintln!("Error: {e}");
                std::process::exit(1);
            });
            Trigger::ExportRange {
                filename,
                selection,
            }
        }
        None => Trigger::ExportDocument { filename },
    };

    let (payload, warnings) = exporter.handle(&doc, &trigger);
    report_warnings(&warnings);

    let Some(payload) = payload else {
        eprintln!("Nothing to export: no page matches '{}'", pages.unwrap_or(""));
        std::process::exit(1);
    };

    let result = match output {
        Some(path) => {
            let dir = Path::new(path).parent().unwrap_or_else(|| Path::new(""));
            FileSink::new(dir).emit(payload)
        }
        None => StdoutSink.emit(payload),
    };
    if let Err(e) = result {
        eprintln!("Error writing output: {e}");
        std::process::exit(1);
    }
}

/// Handle the inspect command
fn handle_inspect_command(exporter: &Exporter, input: &str, view: &str, as_json: bool) {
    let doc = read_document(input);
    let output = inspect::execute_view(&doc, exporter, view, as_json).unwrap_or_else(|e| {
        eprintln!("Inspect error: {e}");
        std::process::exit(1);
    });
    if !as_json {
        report_warnings(&output.warnings);
    }
    print!("{}", output.text);
}

/// Handle the list-packs command
fn handle_list_packs_command() {
    let registry = PackRegistry::with_defaults();
    println!("Available rule packs:\n");
    for name in registry.list_packs() {
        let description = registry.get(&name).map(|pack| pack.description()).unwrap_or("");
        println!("  {name:<12} {description}");
    }
    println!("\nDefault order (later packs override earlier ones):");
    println!("  {}", DEFAULT_PACK_ORDER.join(", "));
}

fn default_filename(input: &str) -> String {
    let stem = Path::new(input)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "export".to_string());
    format!("{stem}.md")
}

fn report_warnings(warnings: &[Warning]) {
    for warning in warnings {
        eprintln!("warning: {warning}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> UnpageConfig {
    let loader = Loader::new().with_optional_file("unpage.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };
    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn apply_config_overrides(config: &mut UnpageConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = extra_params.remove("packs") {
        config.rules.packs = raw
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
    }
    if let Some(raw) = extra_params.remove("escapes") {
        config.rules.default_escapes = parse_bool_arg("escapes", &raw);
    }
    if let Some(raw) = extra_params.remove("reference") {
        config.markers.reference = raw;
    }
    if let Some(raw) = take_override(extra_params, &["split-prefix", "split"]) {
        config.markers.split_prefix = raw;
    }
    if let Some(raw) = take_override(extra_params, &["root-tag", "root"]) {
        config.cleanup.root_tag = raw;
    }
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}
