//! Core types and configuration shared across the motorcade ecosystem.
//!
//! This crate is engine-independent: it holds the fleet configuration,
//! the placement math for car instances, and the common error type.

pub mod config;
pub mod placement;

pub use config::{CameraTuning, CarPlacement, DriveTuning, RoadPlacement, ShowroomConfig};
pub use placement::{CLONE_ROTATIONS, clone_poses, primary_translation};

/// Common error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Configuration contents are unusable
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;
