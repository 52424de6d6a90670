//! Tests for the global configuration snapshot.

use super::*;

/// Ensures default constants are sane and positive.
///
/// # Examples
/// ```
/// use config::constants::GlobalConfig;
/// let cfg = GlobalConfig::default();
/// assert!(cfg.tolerance > 0.0);
/// ```
#[test]
fn default_constants_are_valid() {
    let cfg = GlobalConfig::default();
    assert!(cfg.tolerance > 0.0);
    assert_eq!(cfg.capacity, DEFAULT_CAPACITY);
}

/// Validates the builder rejects invalid values.
///
/// # Examples
/// ```
/// use config::constants::GlobalConfig;
/// assert!(GlobalConfig::new(0.0, 24).is_err());
/// ```
#[test]
fn new_validates_inputs() {
    assert_eq!(
        GlobalConfig::new(0.0, 24).unwrap_err(),
        ConfigError::InvalidTolerance(0.0)
    );
    assert_eq!(
        GlobalConfig::new(1.0e-9, 0).unwrap_err(),
        ConfigError::InvalidCapacity(0)
    );
    assert!(GlobalConfig::new(f64::INFINITY, 8).is_err());
}

#[test]
fn config_error_display_names_the_value() {
    let message = ConfigError::InvalidCapacity(0).to_string();
    assert!(message.contains("capacity"));
}
