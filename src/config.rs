//! Run configuration and its validation.

use std::path::Path;

use crate::error::ConfigError;

/// Default search radius in metres.
pub const DEFAULT_RADIUS_M: f64 = 800.0;

/// Default vertex count for rendered radius circles.
pub const DEFAULT_SEGMENTS: usize = 48;

/// Prefectures searched when no region is given (admin level 4).
pub const DEFAULT_REGIONS: [&str; 4] = ["大阪府", "京都府", "奈良県", "兵庫県"];

/// Immutable settings for one search run.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub radius_m: f64,
    /// Query the external service per station. The offline variant is a
    /// seam only; no precomputed backend ships.
    pub live: bool,
    pub include_universities: bool,
    pub delay_ms: u64,
    pub concurrency: usize,
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_radius(self.radius_m)?;
        if self.concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency);
        }
        if !self.live {
            return Err(ConfigError::OfflineUnsupported);
        }
        Ok(())
    }
}

pub fn validate_radius(radius_m: f64) -> Result<(), ConfigError> {
    if !radius_m.is_finite() || radius_m <= 0.0 {
        return Err(ConfigError::InvalidRadius(radius_m));
    }
    Ok(())
}

pub fn validate_segments(segments: usize) -> Result<(), ConfigError> {
    if segments < 8 {
        return Err(ConfigError::InvalidSegments(segments));
    }
    Ok(())
}

pub fn require_file(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        Ok(())
    } else {
        Err(ConfigError::MissingInput(path.to_path_buf()))
    }
}

/// The default region set as owned strings, for callers that take `Vec`.
pub fn default_regions() -> Vec<String> {
    DEFAULT_REGIONS.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(radius_m: f64) -> SearchConfig {
        SearchConfig {
            radius_m,
            live: true,
            include_universities: false,
            delay_ms: 0,
            concurrency: 1,
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(config(800.0).validate().is_ok());
    }

    #[test]
    fn test_rejects_nonpositive_radius() {
        assert!(matches!(
            config(0.0).validate(),
            Err(ConfigError::InvalidRadius(_))
        ));
        assert!(matches!(
            config(-5.0).validate(),
            Err(ConfigError::InvalidRadius(_))
        ));
        assert!(matches!(
            config(f64::NAN).validate(),
            Err(ConfigError::InvalidRadius(_))
        ));
    }

    #[test]
    fn test_rejects_offline_mode() {
        let mut c = config(800.0);
        c.live = false;
        assert!(matches!(c.validate(), Err(ConfigError::OfflineUnsupported)));
    }

    #[test]
    fn test_rejects_degenerate_circle() {
        assert!(validate_segments(48).is_ok());
        assert!(matches!(
            validate_segments(4),
            Err(ConfigError::InvalidSegments(4))
        ));
    }
}
