//! Validation errors raised by the estimation model.

/// Errors surfaced by profile construction, configuration and simulation.
///
/// All variants describe bad local input. None of them are transient.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("Invalid profile `{device}`: {reason}")]
    InvalidProfile { device: String, reason: String },

    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl ModelError {
    pub(crate) fn profile(device: &str, reason: impl Into<String>) -> Self {
        Self::InvalidProfile {
            device: device.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type ModelResult<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_device() {
        let e = ModelError::profile("Kettle", "rated power must be positive");
        assert_eq!(
            e.to_string(),
            "Invalid profile `Kettle`: rated power must be positive"
        );
    }

    #[test]
    fn test_display_names_parameter() {
        let e = ModelError::parameter("sample_count", "must be at least 1");
        assert!(e.to_string().contains("sample_count"));
    }
}
