//! Convenient imports for recpack.
//!
//! ```ignore
//! use recpack::prelude::*;
//!
//! let mut session = RecordingSession::open(RecordingSpec::builder("out.tgz").build())?;
//! session.close()?;
//! ```

// Session lifecycle
pub use crate::session::RecordingSession;
pub use crate::report::{CloseReport, Delivery};

// Error handling
pub use crate::error::{Error, Result};

// Configuration
pub use recpack_core::{Codec, RecordingSpec, RecordingSpecBuilder};
