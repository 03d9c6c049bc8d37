use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SupervisorError {
    #[error("Failed to spawn backend {program}: {source} {location}")]
    SpawnFailure {
        program: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Supervisor control task is no longer running {location}")]
    ControlChannelClosed { location: ErrorLocation },
}

impl SupervisorError {
    #[track_caller]
    pub fn spawn_failure(program: PathBuf, source: std::io::Error) -> Self {
        Self::SpawnFailure {
            program,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn control_channel_closed() -> Self {
        Self::ControlChannelClosed {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::SpawnFailure { source, .. }
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                "The backend interpreter could not be found. \
                   Install Python 3, bundle a virtual environment, or set PYTHON."
            }
            Self::SpawnFailure { .. } => {
                "The backend interpreter could not be started. \
                   Check that it is executable and that the script exists."
            }
            Self::ControlChannelClosed { .. } => {
                "The backend supervisor has shut down. Restart the application."
            }
        }
    }
}

pub type SupervisorResult<T> = std::result::Result<T, SupervisorError>;
