use clap::{Arg, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the command tree in src/main.rs; build scripts can't access src/ modules.
fn build_cli() -> Command {
    Command::new("notion2md")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Notion JSON exports to Markdown")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("extension")
                .long("extension")
                .value_name("EXT")
                .global(true),
        )
        .arg(
            Arg::new("strip-meta-chars")
                .long("strip-meta-chars")
                .value_name("CHARS")
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Export a JSON directory to Markdown files")
                .arg(
                    Arg::new("json-dir")
                        .index(1)
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::DirPath),
                ),
        )
        .subcommand(
            Command::new("page")
                .about("Convert a single page file")
                .arg(
                    Arg::new("blocks")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("page")
                        .long("page")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = build_cli();

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "notion2md", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "notion2md", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "notion2md", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
