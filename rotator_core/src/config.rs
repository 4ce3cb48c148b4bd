// Copyright 2026 the Rotator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rotator configuration and validation.
//!
//! [`RotatorConfig`] is a plain struct with one field per recognized option.
//! Every field is independently settable; omitted options take the defaults
//! from [`Default`]. Validation happens exactly once, at construction of the
//! [`Rotator`](crate::rotation::Rotator), and rejects invalid values with a
//! typed [`ConfigError`] rather than coercing them.

use alloc::string::String;
use core::fmt;

use crate::time::Millis;

/// Scope options applied when the persisted index entry is written.
///
/// Mirrors the scoping surface of cookie-style client storage: an optional
/// path, an optional domain, and a secure flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersistScope {
    /// Path the entry is scoped to. `None` leaves the host default.
    pub path: Option<String>,
    /// Domain the entry is scoped to. `None` leaves the host default.
    pub domain: Option<String>,
    /// Whether the entry is restricted to secure contexts.
    pub secure: bool,
}

impl Default for PersistScope {
    fn default() -> Self {
        Self {
            path: Some(String::from("/")),
            domain: None,
            secure: false,
        }
    }
}

/// Configuration for a [`Rotator`](crate::rotation::Rotator).
///
/// Immutable once the rotator is constructed. Durations are in seconds and
/// must be finite, positive, and at least one millisecond long; the persist
/// key must be non-empty.
#[derive(Clone, Debug, PartialEq)]
pub struct RotatorConfig {
    /// How long each element stays fully visible, in seconds.
    pub show_duration: f64,
    /// How long the cross-fade runs, in seconds.
    pub fade_duration: f64,
    /// Align transition starts to a wall-clock grid shared by all instances.
    pub clock_sync: bool,
    /// Persist the current index across page loads.
    pub persist_index: bool,
    /// Name of the persisted entry holding the current index.
    pub persist_key: String,
    /// Scope options for the persisted entry.
    pub persist_scope: PersistScope,
}

impl RotatorConfig {
    /// Default show duration in seconds.
    pub const DEFAULT_SHOW_DURATION: f64 = 5.0;
    /// Default fade duration in seconds.
    pub const DEFAULT_FADE_DURATION: f64 = 1.0;
    /// Default persisted entry name.
    pub const DEFAULT_PERSIST_KEY: &'static str = "elementrotator";

    /// Checks every option, returning the first violation found.
    ///
    /// Field order: `show_duration`, `fade_duration`, `persist_key`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::check_duration(DurationField::Show, self.show_duration)?;
        Self::check_duration(DurationField::Fade, self.fade_duration)?;
        if self.persist_key.is_empty() {
            return Err(ConfigError::EmptyPersistKey);
        }
        Ok(())
    }

    fn check_duration(field: DurationField, value: f64) -> Result<(), ConfigError> {
        if !(value.is_finite() && value > 0.0) {
            return Err(ConfigError::NonPositiveDuration { field, value });
        }
        // Durations are handled in whole milliseconds downstream; a value
        // that truncates to zero would mean a zero-period schedule.
        if Millis::from_secs(value) == Millis::ZERO {
            return Err(ConfigError::DurationTooShort { field, value });
        }
        Ok(())
    }

    /// The full show period (`1000 * show_duration`) in milliseconds.
    #[must_use]
    pub fn show_period(&self) -> Millis {
        Millis::from_secs(self.show_duration)
    }

    /// The fade duration in milliseconds.
    #[must_use]
    pub fn fade_period(&self) -> Millis {
        Millis::from_secs(self.fade_duration)
    }
}

impl Default for RotatorConfig {
    fn default() -> Self {
        Self {
            show_duration: Self::DEFAULT_SHOW_DURATION,
            fade_duration: Self::DEFAULT_FADE_DURATION,
            clock_sync: false,
            persist_index: false,
            persist_key: String::from(Self::DEFAULT_PERSIST_KEY),
            persist_scope: PersistScope::default(),
        }
    }
}

/// Which duration option failed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DurationField {
    /// `show_duration`.
    Show,
    /// `fade_duration`.
    Fade,
}

impl DurationField {
    /// Returns the option name for error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Show => "show_duration",
            Self::Fade => "fade_duration",
        }
    }
}

/// A configuration option failed its check.
///
/// Fatal to construction; surfaced to the caller and never swallowed.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A duration was not a finite, positive number of seconds.
    NonPositiveDuration {
        /// Which duration option was rejected.
        field: DurationField,
        /// The rejected value.
        value: f64,
    },
    /// A duration was positive but shorter than one millisecond.
    DurationTooShort {
        /// Which duration option was rejected.
        field: DurationField,
        /// The rejected value.
        value: f64,
    },
    /// The persist key was empty.
    EmptyPersistKey,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveDuration { field, value } => {
                write!(
                    f,
                    "{} must be a finite, positive number of seconds (got {value})",
                    field.name()
                )
            }
            Self::DurationTooShort { field, value } => {
                write!(
                    f,
                    "{} must be at least one millisecond (got {value}s)",
                    field.name()
                )
            }
            Self::EmptyPersistKey => write!(f, "persist_key must not be empty"),
        }
    }
}

impl core::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = RotatorConfig::default();
        assert_eq!(config.show_duration, 5.0);
        assert_eq!(config.fade_duration, 1.0);
        assert!(!config.clock_sync);
        assert!(!config.persist_index);
        assert_eq!(config.persist_key, "elementrotator");
        assert_eq!(config.persist_scope.path.as_deref(), Some("/"));
        assert_eq!(config.persist_scope.domain, None);
        assert!(!config.persist_scope.secure);
        assert!(config.validate().is_ok(), "defaults must validate");
    }

    #[test]
    fn rejects_non_positive_show_duration() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = RotatorConfig {
                show_duration: bad,
                ..RotatorConfig::default()
            };
            assert!(
                matches!(
                    config.validate(),
                    Err(ConfigError::NonPositiveDuration {
                        field: DurationField::Show,
                        ..
                    })
                ),
                "show_duration {bad} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_non_positive_fade_duration() {
        let config = RotatorConfig {
            fade_duration: -0.5,
            ..RotatorConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveDuration {
                field: DurationField::Fade,
                value: -0.5,
            })
        );
    }

    #[test]
    fn rejects_sub_millisecond_durations() {
        // Positive and finite, but truncates to Millis(0).
        let config = RotatorConfig {
            show_duration: 0.0004,
            ..RotatorConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::DurationTooShort {
                field: DurationField::Show,
                value: 0.0004,
            })
        );

        let config = RotatorConfig {
            fade_duration: 0.000_999,
            ..RotatorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DurationTooShort {
                field: DurationField::Fade,
                ..
            })
        ));

        // One millisecond exactly is the shortest accepted duration.
        let config = RotatorConfig {
            show_duration: 0.001,
            fade_duration: 0.001,
            ..RotatorConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_empty_persist_key() {
        let config = RotatorConfig {
            persist_key: String::new(),
            ..RotatorConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyPersistKey));
    }

    #[test]
    fn periods_convert_to_millis() {
        let config = RotatorConfig {
            show_duration: 2.5,
            fade_duration: 0.25,
            ..RotatorConfig::default()
        };
        assert_eq!(config.show_period(), Millis(2500));
        assert_eq!(config.fade_period(), Millis(250));
    }

    #[test]
    fn error_display_names_the_option() {
        let err = ConfigError::NonPositiveDuration {
            field: DurationField::Show,
            value: 0.0,
        };
        assert!(alloc::format!("{err}").contains("show_duration"));
    }
}
