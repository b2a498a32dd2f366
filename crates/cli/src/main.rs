//! recpack CLI: packages recording session directories.
//!
//! - `recpack pack --work-dir DIR [--dest FILE] [--codec C] [--level N]`
//! - `recpack pack --spec spec.json`
//! - `recpack list ARCHIVE`

mod commands;
mod parse;

use std::path::Path;
use std::process;

use recpack::{ArchiveReader, Delivery, RecordingSession};
use tracing::Level;

use commands::build_cli;
use parse::{matches_to_action, CliAction, PackSource};

fn main() {
    let matches = build_cli().get_matches();

    let level = if matches.get_flag("verbose") {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match matches_to_action(&matches) {
        Ok(CliAction::Pack(source)) => run_pack(source),
        Ok(CliAction::List { archive }) => run_list(&archive),
        Err(e) => {
            eprintln!("(error) {}", e);
            1
        }
    };
    process::exit(exit_code);
}

fn run_pack(source: PackSource) -> i32 {
    let spec = match source.into_spec() {
        Ok(spec) => spec,
        Err(e) => {
            eprintln!("(error) {}", e);
            return 1;
        }
    };
    if !spec.is_recording() {
        eprintln!("(error) spec has recording disabled, nothing to pack");
        return 1;
    }
    if !spec.working_dir().is_dir() {
        eprintln!(
            "(error) working directory {} does not exist",
            spec.working_dir().display()
        );
        return 1;
    }

    let mut session = match RecordingSession::open(spec) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("(error) {}", e);
            return 1;
        }
    };

    match session.close() {
        Ok(report) => {
            println!("{}", report);
            for skipped in &report.skipped {
                eprintln!("skipped {}: {}", skipped.path.display(), skipped.reason);
            }
            match report.delivery {
                Delivery::Failed { reason } => {
                    eprintln!("(error) {}", reason);
                    1
                }
                _ => 0,
            }
        }
        Err(e) => {
            eprintln!("(error) {}", e);
            1
        }
    }
}

fn run_list(archive: &Path) -> i32 {
    let listing = ArchiveReader::detect_codec(archive)
        .and_then(|codec| ArchiveReader::list(archive).map(|entries| (codec, entries)));
    match listing {
        Ok((codec, entries)) => {
            println!("{} ({}, {} entries)", archive.display(), codec, entries.len());
            for entry in entries {
                println!("{:>10}  {}", entry.size, entry.name);
            }
            0
        }
        Err(e) => {
            eprintln!("(error) {}", e);
            1
        }
    }
}
