// Command-line interface for scribe
//
// This binary renders a finished document tree, serialized as JSON by an upstream tool, into
// Markdown. The heavy lifting lives in the scribe-md library; this crate only deals with the
// shell: arguments, configuration files, stdin/stdout and exit codes.
//
// Usage:
//  scribe <input.json>                                  - Render to stdout
//  scribe <input.json> -o <file>                        - Render to a file
//  scribe <input.json> --outdir <dir> [--docname <name>] - Render to <dir>/<name>.<suffix>
//  scribe - < input.json                                - Read the tree from stdin
//  scribe --list-kinds                                  - List the node kinds with a renderer
//
// Configuration:
//
// Defaults come from the embedded scribe.default.toml, then ./scribe.toml if present, then the
// file given with --config. Flags such as --newlines and --heading-char override all of them.

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use scribe_config::{Loader, ScribeConfig};
use scribe_md::publish::{publish, PublishArtifact, PublishSpec};
use scribe_md::{HandlerRegistry, MarkdownWriter, Node, RenderOptions};
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::Path;
use tracing_subscriber::EnvFilter;

const STDIN_MARKER: &str = "-";

fn build_cli() -> Command {
    Command::new("scribe")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render document trees to Markdown")
        .long_about(
            "scribe renders a finished document tree (JSON) into Markdown text.\n\n\
            The input is the JSON form of the tree: every node has a \"kind\", and optionally\n\
            \"children\", \"text\" (text leaves only) and \"attributes\".\n\
            Node kinds without a renderer are dropped with their subtree and logged.\n\n\
            Examples:\n  \
            scribe doc.json                          # Render to stdout\n  \
            scribe doc.json -o doc.md                # Render to a file\n  \
            scribe doc.json --outdir build           # Writes build/doc.md\n  \
            scribe - --newlines crlf < doc.json      # Read stdin, CRLF output\n  \
            scribe --list-kinds                      # Show supported node kinds",
        )
        .arg_required_else_help(true)
        .arg(
            Arg::new("input")
                .help("Path to the JSON document tree, or '-' for stdin")
                .required_unless_present("list-kinds")
                .index(1)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("FILE")
                .help("Output file path (defaults to stdout)")
                .conflicts_with("outdir")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("outdir")
                .long("outdir")
                .value_name("DIR")
                .help("Write <DIR>/<docname>.<suffix>")
                .value_hint(ValueHint::DirPath),
        )
        .arg(
            Arg::new("docname")
                .long("docname")
                .value_name("NAME")
                .help("Document name used with --outdir (defaults to the input file stem)")
                .requires("outdir"),
        )
        .arg(
            Arg::new("newlines")
                .long("newlines")
                .value_name("STYLE")
                .help("Line terminator of the output")
                .value_parser(["lf", "crlf", "native"]),
        )
        .arg(
            Arg::new("heading-char")
                .long("heading-char")
                .value_name("CHAR")
                .help("Character repeated to mark heading depth")
                .value_parser(clap::value_parser!(char)),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a scribe.toml configuration file")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log more (repeat for debug output)")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("list-kinds")
                .long("list-kinds")
                .help("List the node kinds that have a renderer")
                .action(ArgAction::SetTrue),
        )
}

fn main() {
    let matches = build_cli().get_matches();

    init_logging(matches.get_count("verbose"));

    if matches.get_flag("list-kinds") {
        handle_list_kinds_command();
        return;
    }

    let config = load_cli_config(&matches);
    let input = matches
        .get_one::<String>("input")
        .map(String::as_str)
        .unwrap_or(STDIN_MARKER);
    handle_render_command(input, &matches, &config);
}

/// Log to stderr. `RUST_LOG` wins over `-v`.
fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn handle_list_kinds_command() {
    let registry = HandlerRegistry::with_defaults();
    for kind in registry.list_kinds() {
        println!("{kind}");
    }
}

fn handle_render_command(input: &str, matches: &ArgMatches, config: &ScribeConfig) {
    let source = read_input(input).unwrap_or_else(|e| {
        eprintln!("Error reading input '{input}': {e}");
        std::process::exit(1);
    });

    let document = Node::from_json(&source).unwrap_or_else(|e| {
        eprintln!("Invalid document tree in '{input}': {e}");
        std::process::exit(1);
    });
    tracing::debug!(nodes = document.size(), "document tree loaded");

    let writer = MarkdownWriter::new(RenderOptions::from(&config.render));
    let spec = publish_spec(&document, input, matches, config).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    match publish(spec, &writer) {
        Ok(result) => {
            // Files are reported by the publisher's own log event.
            if let PublishArtifact::InMemory(text) = result.artifact {
                print!("{text}");
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn read_input(input: &str) -> io::Result<String> {
    if input == STDIN_MARKER {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        fs::read_to_string(input)
    }
}

fn publish_spec<'a>(
    document: &'a Node,
    input: &str,
    matches: &ArgMatches,
    config: &ScribeConfig,
) -> Result<PublishSpec<'a>, String> {
    let docname = match matches.get_one::<String>("docname") {
        Some(name) => name.clone(),
        None => default_docname(input).unwrap_or_default(),
    };
    let spec = PublishSpec::new(document, docname).with_suffix(config.output.suffix.as_str());

    if let Some(output) = matches.get_one::<String>("output") {
        return Ok(spec.with_output_path(output));
    }
    if let Some(outdir) = matches.get_one::<String>("outdir") {
        if spec.docname.is_empty() {
            return Err("--outdir needs --docname when reading from stdin".to_string());
        }
        return Ok(spec.with_outdir(outdir));
    }
    Ok(spec)
}

/// File stem of the input, if it is a file.
fn default_docname(input: &str) -> Option<String> {
    if input == STDIN_MARKER {
        return None;
    }
    Path::new(input)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
}

fn load_cli_config(matches: &ArgMatches) -> ScribeConfig {
    let loader = Loader::new().with_optional_file("scribe.toml");
    let loader = match matches.get_one::<String>("config") {
        Some(path) => loader.with_file(path),
        None => loader,
    };

    apply_config_overrides(loader, matches)
        .and_then(Loader::build)
        .unwrap_or_else(|err| {
            eprintln!("Failed to load configuration: {err}");
            std::process::exit(1);
        })
}

fn apply_config_overrides(
    mut loader: Loader,
    matches: &ArgMatches,
) -> Result<Loader, scribe_config::ConfigError> {
    if let Some(newlines) = matches.get_one::<String>("newlines") {
        loader = loader.set_override("render.line_terminator", newlines.as_str())?;
    }
    if let Some(marker) = matches.get_one::<char>("heading-char") {
        loader = loader.set_override("render.heading_char", marker.to_string())?;
    }
    Ok(loader)
}
