//! Recording specification
//!
//! A `RecordingSpec` describes one recording session: whether anything is
//! recorded at all, which artifacts the producers should emit and where,
//! the working directory those artifacts land in, and the destination of
//! the finished archive.
//!
//! ## Inert specs
//!
//! `RecordingSpec::default()` is the inert spec: `is_recording == false`.
//! Every other field of an inert spec is ignored, and a session holding
//! one never touches the filesystem.
//!
//! ## Artifact layout
//!
//! Specs produced by [`RecordingSpecBuilder`] place every artifact directly
//! inside the working directory:
//!
//! ```text
//! <working_dir>/
//! ├── video.mp4           # when recording mp4
//! ├── observations.txt    # when recording observations
//! ├── rewards.txt         # when recording rewards
//! ├── commands.txt        # when recording commands
//! └── missionInit.xml     # always
//! ```

use crate::codec::Codec;
use crate::error::{SpecError, SpecResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Fixed artifact file names inside a working directory
pub mod artifact_names {
    /// Encoded video stream
    pub const MP4: &str = "video.mp4";
    /// Observation log
    pub const OBSERVATIONS: &str = "observations.txt";
    /// Reward log
    pub const REWARDS: &str = "rewards.txt";
    /// Command log
    pub const COMMANDS: &str = "commands.txt";
    /// Mission initialization document
    pub const MISSION_INIT: &str = "missionInit.xml";
    /// Parent directory (under the system temp dir) for generated working dirs
    pub const WORKING_ROOT: &str = "recpack";
}

/// Default mp4 frame rate
pub const DEFAULT_MP4_FPS: u32 = 20;

/// Default mp4 bit rate (bits per second)
pub const DEFAULT_MP4_BIT_RATE: u64 = 400_000;

/// Immutable description of what to record and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordingSpec {
    is_recording: bool,
    working_dir: PathBuf,
    destination: PathBuf,

    is_recording_mp4: bool,
    mp4_path: PathBuf,
    mp4_bit_rate: u64,
    mp4_fps: u32,

    is_recording_observations: bool,
    observations_path: PathBuf,

    is_recording_rewards: bool,
    rewards_path: PathBuf,

    is_recording_commands: bool,
    commands_path: PathBuf,

    mission_init_path: PathBuf,

    codec: Codec,
    compression_level: Option<i32>,
}

impl Default for RecordingSpec {
    fn default() -> Self {
        RecordingSpec {
            is_recording: false,
            working_dir: PathBuf::new(),
            destination: PathBuf::new(),
            is_recording_mp4: false,
            mp4_path: PathBuf::new(),
            mp4_bit_rate: DEFAULT_MP4_BIT_RATE,
            mp4_fps: DEFAULT_MP4_FPS,
            is_recording_observations: false,
            observations_path: PathBuf::new(),
            is_recording_rewards: false,
            rewards_path: PathBuf::new(),
            is_recording_commands: false,
            commands_path: PathBuf::new(),
            mission_init_path: PathBuf::new(),
            codec: Codec::default(),
            compression_level: None,
        }
    }
}

impl RecordingSpec {
    /// The inert spec (recording disabled)
    pub fn inert() -> Self {
        Self::default()
    }

    /// Start building a recording-enabled spec that delivers to `destination`
    pub fn builder(destination: impl Into<PathBuf>) -> RecordingSpecBuilder {
        RecordingSpecBuilder::new(destination)
    }

    /// Parse a spec from a JSON document
    ///
    /// Missing fields take their inert defaults, so `{}` is the inert spec.
    pub fn from_json_str(json: &str) -> SpecResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON spec file
    pub fn from_json_file(path: &Path) -> SpecResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| SpecError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Master switch. When false nothing else in the spec is acted upon.
    pub fn is_recording(&self) -> bool {
        self.is_recording
    }

    /// Directory holding the session's artifacts while it is open
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Where the compressed archive is written on close
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Whether video is recorded
    pub fn is_recording_mp4(&self) -> bool {
        self.is_recording_mp4
    }

    /// Video output path
    pub fn mp4_path(&self) -> &Path {
        &self.mp4_path
    }

    /// Video bit rate in bits per second
    pub fn mp4_bit_rate(&self) -> u64 {
        self.mp4_bit_rate
    }

    /// Video frame rate
    pub fn mp4_frames_per_second(&self) -> u32 {
        self.mp4_fps
    }

    /// Whether observations are recorded
    pub fn is_recording_observations(&self) -> bool {
        self.is_recording_observations
    }

    /// Observation log path
    pub fn observations_path(&self) -> &Path {
        &self.observations_path
    }

    /// Whether rewards are recorded
    pub fn is_recording_rewards(&self) -> bool {
        self.is_recording_rewards
    }

    /// Reward log path
    pub fn rewards_path(&self) -> &Path {
        &self.rewards_path
    }

    /// Whether commands are recorded
    pub fn is_recording_commands(&self) -> bool {
        self.is_recording_commands
    }

    /// Command log path
    pub fn commands_path(&self) -> &Path {
        &self.commands_path
    }

    /// Mission initialization document path
    pub fn mission_init_path(&self) -> &Path {
        &self.mission_init_path
    }

    /// Archive compression codec
    pub fn codec(&self) -> Codec {
        self.codec
    }

    /// Codec-specific compression level, `None` for the codec default
    pub fn compression_level(&self) -> Option<i32> {
        self.compression_level
    }
}

/// Builder for recording-enabled specs.
///
/// # Example
///
/// ```ignore
/// let spec = RecordingSpec::builder("./mission.tgz")
///     .record_mp4(30, 2_000_000)
///     .record_rewards()
///     .build();
/// assert!(spec.is_recording());
/// ```
#[derive(Debug, Clone)]
pub struct RecordingSpecBuilder {
    destination: PathBuf,
    working_dir: Option<PathBuf>,
    mp4: Option<(u32, u64)>,
    observations: bool,
    rewards: bool,
    commands: bool,
    codec: Codec,
    compression_level: Option<i32>,
}

impl RecordingSpecBuilder {
    /// Create a builder delivering to `destination`
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        RecordingSpecBuilder {
            destination: destination.into(),
            working_dir: None,
            mp4: None,
            observations: false,
            rewards: false,
            commands: false,
            codec: Codec::default(),
            compression_level: None,
        }
    }

    /// Use an explicit working directory instead of a generated one
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Record video at `fps` frames per second and `bit_rate` bits per second
    pub fn record_mp4(mut self, fps: u32, bit_rate: u64) -> Self {
        self.mp4 = Some((fps, bit_rate));
        self
    }

    /// Record observations
    pub fn record_observations(mut self) -> Self {
        self.observations = true;
        self
    }

    /// Record rewards
    pub fn record_rewards(mut self) -> Self {
        self.rewards = true;
        self
    }

    /// Record commands
    pub fn record_commands(mut self) -> Self {
        self.commands = true;
        self
    }

    /// Archive compression codec
    pub fn codec(mut self, codec: Codec) -> Self {
        self.codec = codec;
        self
    }

    /// Codec-specific compression level
    pub fn compression_level(mut self, level: i32) -> Self {
        self.compression_level = Some(level);
        self
    }

    /// Finish the spec.
    ///
    /// Without an explicit working directory a fresh one is chosen under
    /// `<temp>/recpack/<uuid>`. The directory is not created here.
    pub fn build(self) -> RecordingSpec {
        let working_dir = self.working_dir.unwrap_or_else(|| {
            std::env::temp_dir()
                .join(artifact_names::WORKING_ROOT)
                .join(Uuid::new_v4().to_string())
        });
        let (mp4_fps, mp4_bit_rate) = self
            .mp4
            .unwrap_or((DEFAULT_MP4_FPS, DEFAULT_MP4_BIT_RATE));

        RecordingSpec {
            is_recording: true,
            destination: self.destination,
            is_recording_mp4: self.mp4.is_some(),
            mp4_path: working_dir.join(artifact_names::MP4),
            mp4_bit_rate,
            mp4_fps,
            is_recording_observations: self.observations,
            observations_path: working_dir.join(artifact_names::OBSERVATIONS),
            is_recording_rewards: self.rewards,
            rewards_path: working_dir.join(artifact_names::REWARDS),
            is_recording_commands: self.commands,
            commands_path: working_dir.join(artifact_names::COMMANDS),
            mission_init_path: working_dir.join(artifact_names::MISSION_INIT),
            codec: self.codec,
            compression_level: self.compression_level,
            working_dir,
        }
    }
}
