//! Clap command tree for the `recpack` binary.

use clap::{Arg, ArgAction, ArgGroup, Command};

/// Build the top-level command.
pub fn build_cli() -> Command {
    Command::new("recpack")
        .about("Package recording session directories into compressed archives")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Log each step of the close sequence"),
        )
        .subcommand(pack_command())
        .subcommand(list_command())
}

fn pack_command() -> Command {
    Command::new("pack")
        .about("Archive a populated working directory and remove it")
        .arg(
            Arg::new("work-dir")
                .long("work-dir")
                .value_name("DIR")
                .help("Directory holding the session artifacts"),
        )
        .arg(
            Arg::new("dest")
                .long("dest")
                .value_name("FILE")
                .requires("work-dir")
                .help("Archive to write [default: DIR with the codec's extension]"),
        )
        .arg(
            Arg::new("codec")
                .long("codec")
                .value_name("CODEC")
                .value_parser(["gzip", "gz", "zstd", "zst"])
                .help("Compression codec [default: gzip]"),
        )
        .arg(
            Arg::new("level")
                .long("level")
                .value_name("N")
                .value_parser(clap::value_parser!(i32))
                .allow_negative_numbers(true)
                .help("Codec-specific compression level"),
        )
        .arg(
            Arg::new("spec")
                .long("spec")
                .value_name("FILE")
                .conflicts_with_all(["work-dir", "dest", "codec", "level"])
                .help("Read the recording spec from a JSON file"),
        )
        .group(
            ArgGroup::new("source")
                .args(["work-dir", "spec"])
                .required(true),
        )
}

fn list_command() -> Command {
    Command::new("list")
        .about("List the entries of an archive")
        .arg(
            Arg::new("archive")
                .value_name("ARCHIVE")
                .required(true)
                .help("Archive to read (gzip or zstd, detected)"),
        )
}
