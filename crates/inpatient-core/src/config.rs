//! Registry runtime configuration.
//!
//! Resolved once at startup and handed to the query engine and its
//! collaborators. Nothing in the core reads configuration from the
//! environment.

use std::time::Duration;

use thiserror::Error;

/// Rows shown per table page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page-number buttons shown in the navigation window.
pub const DEFAULT_MAX_VISIBLE_PAGES: usize = 5;

/// How far ahead an admission may be booked, in days.
pub const DEFAULT_INTAKE_WINDOW_DAYS: i64 = 30;

/// Upper bound accepted for the intake window, in days.
pub const MAX_INTAKE_WINDOW_DAYS: i64 = 3650;

/// Simulated latency of the demo seed.
pub const DEFAULT_SEED_DELAY: Duration = Duration::from_millis(500);

/// Configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("page size must be at least 1")]
    InvalidPageSize,

    #[error("invalid window: {0}")]
    InvalidWindow(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Registry configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    page_size: usize,
    max_visible_pages: usize,
    intake_window_days: i64,
    seed_delay: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_visible_pages: DEFAULT_MAX_VISIBLE_PAGES,
            intake_window_days: DEFAULT_INTAKE_WINDOW_DAYS,
            seed_delay: DEFAULT_SEED_DELAY,
        }
    }
}

impl RegistryConfig {
    /// Create a validated configuration.
    pub fn new(
        page_size: usize,
        max_visible_pages: usize,
        intake_window_days: i64,
        seed_delay: Duration,
    ) -> ConfigResult<Self> {
        if page_size == 0 {
            return Err(ConfigError::InvalidPageSize);
        }
        if max_visible_pages == 0 {
            return Err(ConfigError::InvalidWindow(
                "max_visible_pages must be at least 1".into(),
            ));
        }
        if intake_window_days < 0 {
            return Err(ConfigError::InvalidWindow(
                "intake_window_days cannot be negative".into(),
            ));
        }
        if intake_window_days > MAX_INTAKE_WINDOW_DAYS {
            return Err(ConfigError::InvalidWindow(format!(
                "intake_window_days cannot exceed {MAX_INTAKE_WINDOW_DAYS}"
            )));
        }

        Ok(Self {
            page_size,
            max_visible_pages,
            intake_window_days,
            seed_delay,
        })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn max_visible_pages(&self) -> usize {
        self.max_visible_pages
    }

    pub fn intake_window_days(&self) -> i64 {
        self.intake_window_days
    }

    pub fn seed_delay(&self) -> Duration {
        self.seed_delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.page_size(), 10);
        assert_eq!(config.max_visible_pages(), 5);
        assert_eq!(config.intake_window_days(), 30);
        assert_eq!(config.seed_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let result = RegistryConfig::new(0, 5, 30, Duration::ZERO);
        assert_eq!(result, Err(ConfigError::InvalidPageSize));
    }

    #[test]
    fn test_rejects_bad_windows() {
        assert!(matches!(
            RegistryConfig::new(10, 0, 30, Duration::ZERO),
            Err(ConfigError::InvalidWindow(_))
        ));
        assert!(matches!(
            RegistryConfig::new(10, 5, -1, Duration::ZERO),
            Err(ConfigError::InvalidWindow(_))
        ));
    }

    #[test]
    fn test_intake_window_upper_bound() {
        assert!(RegistryConfig::new(10, 5, MAX_INTAKE_WINDOW_DAYS, Duration::ZERO).is_ok());
        assert!(matches!(
            RegistryConfig::new(10, 5, MAX_INTAKE_WINDOW_DAYS + 1, Duration::ZERO),
            Err(ConfigError::InvalidWindow(_))
        ));
        assert!(matches!(
            RegistryConfig::new(10, 5, i64::MAX / 2, Duration::ZERO),
            Err(ConfigError::InvalidWindow(_))
        ));
    }
}
