use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the argument set in src/main.rs.
// Build scripts can't access src/ modules, so it is duplicated here.
const NEWLINE_STYLES: &[&str] = &["lf", "crlf", "native"];

fn main() -> Result<(), Error> {
    println!("cargo:rerun-if-changed=build.rs");

    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("scribe")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render document trees to Markdown")
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
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("outdir")
                .long("outdir")
                .value_hint(ValueHint::DirPath),
        )
        .arg(Arg::new("docname").long("docname"))
        .arg(
            Arg::new("newlines")
                .long("newlines")
                .value_parser(clap::builder::PossibleValuesParser::new(NEWLINE_STYLES)),
        )
        .arg(Arg::new("heading-char").long("heading-char"))
        .arg(
            Arg::new("config")
                .long("config")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("list-kinds")
                .long("list-kinds")
                .help("List the node kinds that have a renderer")
                .action(ArgAction::SetTrue),
        );

    generate_to(Bash, &mut cmd, "scribe", &outdir)?;
    generate_to(Zsh, &mut cmd, "scribe", &outdir)?;
    generate_to(Fish, &mut cmd, "scribe", &outdir)?;

    Ok(())
}
