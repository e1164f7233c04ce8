//! Iteration and walking configuration.

use std::error::Error;
use std::fmt;

/// Tunables shared by [`TrackIterator`](crate::TrackIterator) and
/// [`TrackWalkingPoint`](crate::TrackWalkingPoint).
///
/// Call [`validate`](Self::validate) on configurations built from outside
/// input. The iterator and walker constructors take a valid configuration
/// for granted and assert it in debug builds.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackConfig {
    /// Maximum number of pieces a track iterator steps before reporting
    /// the end of track. Default: 16000.
    pub max_distance: u32,
    /// Stop at the edge of the loaded region instead of reading unloaded
    /// cells. Default: false.
    pub only_in_loaded_region: bool,
    /// Stop a walking point when it re-enters a piece it already passed.
    /// Default: false.
    pub loop_filter: bool,
    /// Refuse walking legs that pass through unloaded cells. Default: false.
    pub check_loaded_cells: bool,
}

impl TrackConfig {
    /// Default cap on iterator steps.
    pub const DEFAULT_MAX_DISTANCE: u32 = 16000;

    /// Check the configuration for values the iterators cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_distance == 0 {
            return Err(ConfigError::ZeroMaxDistance);
        }
        Ok(())
    }

    pub(crate) fn debug_check(&self) {
        debug_assert!(
            self.validate().is_ok(),
            "invalid track configuration: {:?}",
            self.validate()
        );
    }
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            max_distance: Self::DEFAULT_MAX_DISTANCE,
            only_in_loaded_region: false,
            loop_filter: false,
            check_loaded_cells: false,
        }
    }
}

/// Errors from invalid track configuration or walking parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// `max_distance` is zero; no step could ever be taken.
    ZeroMaxDistance,
    /// Placement spacing must be finite and positive.
    InvalidSpacing {
        /// The rejected spacing.
        spacing: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMaxDistance => write!(f, "max_distance must be at least 1"),
            Self::InvalidSpacing { spacing } => {
                write!(f, "spacing must be finite and positive, got {spacing}")
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let cfg = TrackConfig::default();
        assert_eq!(cfg.max_distance, 16000);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_max_distance_rejected() {
        let cfg = TrackConfig {
            max_distance: 0,
            ..TrackConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroMaxDistance));
    }
}
