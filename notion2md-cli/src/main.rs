// Command-line interface for notion2md
//
// This binary converts Notion JSON dumps into Markdown. Fetching the JSON is someone else's job:
// the input is a directory holding database.json (the page listing with properties) and one
// <page-id>.json per page with its block forest, children already inlined.
//
// Usage:
//  notion2md <json-dir> [-o <md-dir>]                              - Export a directory (default)
//  notion2md convert <json-dir> [-o <md-dir>]                      - Same as above (explicit)
//  notion2md page <blocks.json> [--page <page.json>] [-o <file>]   - Convert a single page
//
// Configuration is layered: built-in defaults, ./notion2md.toml, the file given with --config,
// then command-line flags.
//
// Extra Parameters:
//
// Render options can be passed using --extra-<parameter-name> <value>.
// Example:
//  notion2md ./json --extra-indent "  " --extra-caption alt --extra-delimiter ", "

use clap::{Arg, Command, ValueHint};
use notion2md_config::{Loader, Notion2mdConfig, LOCAL_CONFIG_FILE};
use notion2md_render::{
    convert_blocks, convert_page, export, CaptionMode, ExportArtifact, ExportSpec, RenderOptions,
};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &["convert", "page", "help"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            // A value that looks like a flag belongs to the next option. Whitespace-only
            // values (indent strings) never do.
            let has_value = args
                .get(i + 1)
                .is_some_and(|next| !next.starts_with('-') || next.trim().is_empty());

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("notion2md")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Notion JSON exports to Markdown")
        .long_about(
            "notion2md turns a directory of Notion page JSON into Markdown files.\n\n\
            Commands:\n  \
            - convert: Export every page listed in database.json (default command)\n  \
            - page:    Convert a single page file\n\n\
            Extra Parameters:\n  \
            --extra-indent <STR>      Prefix for nested list children\n  \
            --extra-caption <MODE>    Image captions: alt, em or none\n  \
            --extra-delimiter <STR>   Joins multi-valued properties\n\n\
            Examples:\n  \
            notion2md ./json                         # Export ./json into ./md\n  \
            notion2md ./json -o ./content            # Export into ./content\n  \
            notion2md page page-id.json              # Print one page to stdout\n\n\
            Logging goes to stderr; set RUST_LOG (e.g. RUST_LOG=debug) for more detail."
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a notion2md.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("extension")
                .long("extension")
                .value_name("EXT")
                .help("Extension of written Markdown files (default: md)")
                .global(true),
        )
        .arg(
            Arg::new("strip-meta-chars")
                .long("strip-meta-chars")
                .value_name("CHARS")
                .help("Characters removed from frontmatter values")
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Export a JSON directory to Markdown files (default command)")
                .long_about(
                    "Convert every page listed in <json-dir>/database.json.\n\n\
                    Each <page-id>.json becomes <md-dir>/<page-id>.<extension>. Page files\n\
                    without a database entry are skipped. Directories default to the\n\
                    [export] section of the configuration.\n\n\
                    Examples:\n  \
                    notion2md convert ./json -o ./md\n  \
                    notion2md ./json                  # 'convert' is optional"
                )
                .arg(
                    Arg::new("json-dir")
                        .help("Directory holding database.json and the page files")
                        .index(1)
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_name("MD_DIR")
                        .help("Directory receiving the Markdown files")
                        .value_hint(ValueHint::DirPath),
                ),
        )
        .subcommand(
            Command::new("page")
                .about("Convert a single page file")
                .long_about(
                    "Convert one block file to Markdown.\n\n\
                    With --page, the page object (id and properties) supplies the\n\
                    frontmatter and title. Output goes to stdout unless -o is given.\n\n\
                    Examples:\n  \
                    notion2md page blocks.json\n  \
                    notion2md page blocks.json --page page.json -o post.md"
                )
                .arg(
                    Arg::new("blocks")
                        .help("JSON file with the page's blocks")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("page")
                        .long("page")
                        .value_name("PAGE_JSON")
                        .help("JSON file with the page object")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // `notion2md ./json` means `notion2md convert ./json`
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
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

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    if let Some(extension) = matches.get_one::<String>("extension") {
        config.export.extension = extension.trim_start_matches('.').to_string();
    }
    if let Some(chars) = matches.get_one::<String>("strip-meta-chars") {
        config.render.strip_meta_chars = chars.clone();
    }
    apply_config_overrides(&mut config, &mut extra_params);
    for key in extra_params.keys() {
        tracing::warn!("ignoring unknown parameter --extra-{key}");
    }

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let json_dir = sub_matches
                .get_one::<String>("json-dir")
                .map(PathBuf::from)
                .unwrap_or_else(|| config.export.json_dir.clone());
            let md_dir = sub_matches
                .get_one::<String>("output")
                .map(PathBuf::from)
                .unwrap_or_else(|| config.export.md_dir.clone());
            handle_convert_command(&json_dir, &md_dir, &config);
        }
        Some(("page", sub_matches)) => {
            let Some(blocks) = sub_matches.get_one::<String>("blocks") else {
                eprintln!("Error: missing <blocks> argument");
                std::process::exit(1);
            };
            let page = sub_matches.get_one::<String>("page").map(|s| s.as_str());
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_page_command(blocks, page, output, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Handle the convert command: directory to directory export
fn handle_convert_command(json_dir: &Path, md_dir: &Path, config: &Notion2mdConfig) {
    let spec = ExportSpec::new(json_dir, md_dir).with_options(RenderOptions::from(config));
    let result = export(spec).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    tracing::info!(
        pages = result.pages.len(),
        single = matches!(result.artifact, ExportArtifact::File(_)),
        "Exported to {}",
        result.artifact.path().display()
    );
}

/// Handle the page command: one block file to stdout or a file
fn handle_page_command(
    blocks_path: &str,
    page_path: Option<&str>,
    output: Option<&str>,
    config: &Notion2mdConfig,
) {
    let options = RenderOptions::from(config);
    let blocks = read_json(blocks_path);

    let converted = match page_path {
        Some(path) => convert_page(&read_json(path), &blocks, &options),
        None => convert_blocks(&blocks, &options),
    };
    let markdown = converted.unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    match output {
        Some(path) => {
            fs::write(path, &markdown).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
            tracing::info!("Exported to {path}");
        }
        None => print!("{markdown}"),
    }
}

fn read_json(path: &str) -> Value {
    let source = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    });
    serde_json::from_str(&source).unwrap_or_else(|e| {
        eprintln!("Invalid JSON in '{path}': {e}");
        std::process::exit(1);
    })
}

fn load_cli_config(explicit_path: Option<&str>) -> Notion2mdConfig {
    let loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
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

fn apply_config_overrides(
    config: &mut Notion2mdConfig,
    extra_params: &mut HashMap<String, String>,
) {
    if let Some(indent) = take_override(extra_params, &["indent", "indent-string"]) {
        config.render.indent_string = indent;
    }

    if let Some(raw) = take_override(extra_params, &["caption", "image-caption"]) {
        config.render.image_caption = parse_caption_arg(&raw);
    }

    if let Some(delimiter) = take_override(extra_params, &["delimiter", "list-delimiter"]) {
        config.render.list_delimiter = delimiter;
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

fn parse_caption_arg(raw: &str) -> CaptionMode {
    CaptionMode::parse(&raw.to_lowercase()).unwrap_or_else(|| {
        eprintln!("Invalid caption mode '{raw}' for --extra-caption (expected alt, em or none)");
        std::process::exit(1);
    })
}
