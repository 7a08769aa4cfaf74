use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of src/inspect.rs: build scripts can't access src/ modules
const AVAILABLE_VIEWS: &[&str] = &["tree", "fragments", "pages", "rules"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let input = || {
        Arg::new("input")
            .help("Rendered HTML file")
            .required(true)
            .index(1)
            .value_hint(ValueHint::FilePath)
    };

    let mut cmd = Command::new("unpage")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Export paginated HTML back to markdown")
        .arg(
            Arg::new("list-packs")
                .long("list-packs")
                .help("List available rule packs")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .value_hint(ValueHint::FilePath),
        )
        .subcommand(
            Command::new("export")
                .arg(input())
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                )
                .arg(Arg::new("pages").long("pages").value_hint(ValueHint::Other)),
        )
        .subcommand(
            Command::new("inspect")
                .arg(input())
                .arg(
                    Arg::new("view")
                        .index(2)
                        .value_parser(clap::builder::PossibleValuesParser::new(AVAILABLE_VIEWS)),
                )
                .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
        );

    generate_to(Bash, &mut cmd, "unpage", &outdir)?;
    generate_to(Zsh, &mut cmd, "unpage", &outdir)?;
    generate_to(Fish, &mut cmd, "unpage", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
