//! Callout configuration.

use crate::arrow::ANIMATION_DURATION;
use crate::color::Color;
use crate::error::ConfigError;
use crate::rect::EdgeInsets;
use serde::Deserialize;

/// Appearance options for a callout.
///
/// Can be loaded from TOML:
///
/// ```toml
/// corner_radius = 5.0
/// background = { r = 0.4, g = 0.4, b = 0.4 }
///
/// [content_insets]
/// top = 16.0
/// left = 16.0
/// bottom = 16.0
/// right = 16.0
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalloutConfig {
    /// Padding between the bubble and the content view. Applies in addition to the arrow space.
    pub content_insets: EdgeInsets,

    /// Corner radius of the bubble.
    pub corner_radius: f64,

    /// Fill color of the bubble and the arrow.
    pub background: Color,

    /// Duration of arrow moves and padding changes, in seconds.
    pub animation_duration: f64,
}

impl Default for CalloutConfig {
    fn default() -> Self {
        CalloutConfig {
            content_insets: EdgeInsets::default(),
            corner_radius: 0.,
            background: Color::BLACK,
            animation_duration: ANIMATION_DURATION,
        }
    }
}

impl CalloutConfig {
    /// Parses and validates a TOML configuration. Missing fields use their defaults.
    pub fn from_toml(source: &str) -> Result<CalloutConfig, ConfigError> {
        let config: CalloutConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn check(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if value.is_finite() && value >= 0. {
                Ok(())
            } else {
                Err(ConfigError::InvalidValue { field, value })
            }
        }

        check("corner_radius", self.corner_radius)?;
        check("animation_duration", self.animation_duration)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_config_is_default() {
        assert_eq!(CalloutConfig::from_toml("").unwrap(), CalloutConfig::default());
        assert_eq!(CalloutConfig::default().animation_duration, 0.15);
    }

    #[test]
    fn parses_all_fields() {
        let config = CalloutConfig::from_toml(
            r#"
            corner_radius = 5.0
            animation_duration = 0.3
            background = { r = 0.4, g = 0.4, b = 0.4 }

            [content_insets]
            top = 16.0
            left = 12.0
            "#,
        )
        .unwrap();

        assert_eq!(
            config,
            CalloutConfig {
                content_insets: EdgeInsets::new(16., 12., 0., 0.),
                corner_radius: 5.,
                background: Color::rgb(0.4, 0.4, 0.4),
                animation_duration: 0.3,
            }
        );
    }

    #[test]
    fn rejects_negative_radius() {
        match CalloutConfig::from_toml("corner_radius = -1.0") {
            Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, "corner_radius"),
            other => panic!("expected an invalid value error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(matches!(
            CalloutConfig::from_toml("arrow_width = 20.0"),
            Err(ConfigError::Parse(_))
        ));
    }
}
