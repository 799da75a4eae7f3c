//! Mock implementations for batch tests
//!
//! Scripted platform client, recording reporter and scripted confirmer so the
//! batch loop can be exercised without a network or a terminal.

pub mod mock_platform;

#[allow(unused_imports)]
pub use mock_platform::{DownloadBehavior, MockPlatformClient, RecordingReporter, ScriptedConfirmer};
