//! Physics error types

use std::fmt;

use rapier3d::prelude::RigidBodyHandle;

/// Error type for physics operations
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// The physics world could not be created from the given configuration
    InvalidConfig(String),
    /// The handle does not refer to a live rigid body
    UnknownBody(RigidBodyHandle),
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsError::InvalidConfig(msg) => write!(f, "Invalid physics config: {}", msg),
            PhysicsError::UnknownBody(handle) => write!(f, "Unknown rigid body: {:?}", handle),
        }
    }
}

impl std::error::Error for PhysicsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_display() {
        let err = PhysicsError::InvalidConfig("timestep must be positive".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("Invalid physics config"));
        assert!(msg.contains("timestep must be positive"));
    }

    #[test]
    fn test_unknown_body_display() {
        let err = PhysicsError::UnknownBody(RigidBodyHandle::invalid());
        assert!(format!("{}", err).starts_with("Unknown rigid body"));
    }
}
