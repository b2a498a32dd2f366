//! ArgMatches → CliAction conversion.
//!
//! Translates clap's parsed arguments into the action to run:
//! - `pack` → `CliAction::Pack` with either a JSON spec file or an
//!   explicit working directory and destination
//! - `list` → `CliAction::List`

use std::path::{Path, PathBuf};

use clap::ArgMatches;
use recpack::{Codec, RecordingSpec, SpecError};

/// The result of parsing the command line.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Archive a working directory.
    Pack(PackSource),
    /// Print the entries of an archive.
    List { archive: PathBuf },
}

/// Where `pack` gets its recording spec from.
#[derive(Debug, PartialEq)]
pub enum PackSource {
    SpecFile(PathBuf),
    Directory {
        work_dir: PathBuf,
        destination: PathBuf,
        codec: Option<Codec>,
        level: Option<i32>,
    },
}

impl PackSource {
    /// Resolve into a recording spec.
    pub fn into_spec(self) -> Result<RecordingSpec, SpecError> {
        match self {
            PackSource::SpecFile(path) => RecordingSpec::from_json_file(&path),
            PackSource::Directory {
                work_dir,
                destination,
                codec,
                level,
            } => {
                let mut builder = RecordingSpec::builder(destination).working_dir(work_dir);
                if let Some(codec) = codec {
                    builder = builder.codec(codec);
                }
                if let Some(level) = level {
                    builder = builder.compression_level(level);
                }
                Ok(builder.build())
            }
        }
    }
}

/// Convert clap ArgMatches into a CliAction.
pub fn matches_to_action(matches: &ArgMatches) -> Result<CliAction, String> {
    let (sub_name, sub_matches) = matches
        .subcommand()
        .ok_or_else(|| "No command provided".to_string())?;

    match sub_name {
        "pack" => parse_pack(sub_matches),
        "list" => {
            let archive = sub_matches
                .get_one::<String>("archive")
                .ok_or("Missing archive path")?;
            Ok(CliAction::List {
                archive: PathBuf::from(archive),
            })
        }
        other => Err(format!("Unknown command: {}", other)),
    }
}

fn parse_pack(m: &ArgMatches) -> Result<CliAction, String> {
    if let Some(spec) = m.get_one::<String>("spec") {
        return Ok(CliAction::Pack(PackSource::SpecFile(PathBuf::from(spec))));
    }

    let work_dir = m
        .get_one::<String>("work-dir")
        .map(PathBuf::from)
        .ok_or("Either --spec or --work-dir is required")?;
    let codec = m
        .get_one::<String>("codec")
        .map(|s| s.parse::<Codec>())
        .transpose()?;
    let level = m.get_one::<i32>("level").copied();
    let destination = match m.get_one::<String>("dest") {
        Some(dest) => PathBuf::from(dest),
        None => default_destination(&work_dir, codec.unwrap_or_default())?,
    };

    Ok(CliAction::Pack(PackSource::Directory {
        work_dir,
        destination,
        codec,
        level,
    }))
}

/// `runs/mission1` -> `runs/mission1.tar.gz`, next to the working directory
fn default_destination(work_dir: &Path, codec: Codec) -> Result<PathBuf, String> {
    let name = work_dir.file_name().ok_or_else(|| {
        format!(
            "Cannot derive an archive name from {}; pass --dest",
            work_dir.display()
        )
    })?;
    let mut file_name = name.to_os_string();
    file_name.push(".");
    file_name.push(codec.extension());
    Ok(work_dir.with_file_name(file_name))
}
