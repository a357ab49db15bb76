//! Error types for the controller crate.

use std::fmt;

/// Result type for controller operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A handle the controller needs before it can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    /// The player's rigid body.
    RigidBody,
    /// The player's own transform (receives yaw).
    Transform,
    /// The child camera transform (receives pitch).
    Camera,
    /// The point the ground check sphere is centered on.
    GroundProbe,
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Reference::RigidBody => "rigid body",
            Reference::Transform => "transform",
            Reference::Camera => "camera",
            Reference::GroundProbe => "ground probe",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while assembling a controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A required handle was not supplied.
    MissingReference(Reference),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingReference(reference) => {
                write!(f, "player rig is missing its {reference}")
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_reference_message() {
        let err = Error::MissingReference(Reference::GroundProbe);
        assert_eq!(err.to_string(), "player rig is missing its ground probe");
    }
}
