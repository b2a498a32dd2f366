//! Core types for recpack
//!
//! This crate defines the data shared by every other recpack crate:
//! - RecordingSpec: what a session records and where its archive goes
//! - RecordingSpecBuilder: constructs recording-enabled specs
//! - Codec: compression applied to the finished archive
//! - SpecError: failures loading a spec from JSON
//!
//! Nothing here touches the filesystem except `RecordingSpec::from_json_file`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod error;
pub mod spec;

pub use codec::Codec;
pub use error::{SpecError, SpecResult};
pub use spec::{artifact_names, RecordingSpec, RecordingSpecBuilder};
