//! Persisted viewport settings
//!
//! Only the independent settings are stored. Size, origin, center and the
//! aspect are derived from the render surface and never persisted.

use serde::{Deserialize, Serialize};

use crate::error::{ViewportError, ViewportResult};
use crate::types::{ColorRgb, ViewportRect};

/// Viewport settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Background color
    pub background: ColorRgb,

    /// Viewport rectangle in normalized display coordinates
    pub viewport: ViewportRect,

    /// Physical pixel shape; folded into the aspect
    pub pixel_aspect: [f64; 2],
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            background: ColorRgb::black(),
            viewport: ViewportRect::FULL,
            pixel_aspect: [1.0, 1.0],
        }
    }
}

impl ViewportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    #[cfg(feature = "toml-config")]
    pub fn from_toml(toml_str: &str) -> ViewportResult<Self> {
        toml::from_str(toml_str).map_err(|e| ViewportError::Config(e.to_string()))
    }

    /// Serialize configuration to TOML
    #[cfg(feature = "toml-config")]
    pub fn to_toml(&self) -> ViewportResult<String> {
        toml::to_string_pretty(self).map_err(|e| ViewportError::Config(e.to_string()))
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> ViewportResult<Self> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> ViewportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate configuration values
    ///
    /// The viewport itself accepts any rectangle; this check is for settings
    /// coming from outside the program.
    pub fn validate(&self) -> ViewportResult<()> {
        if !self.viewport.is_normalized() {
            return Err(ViewportError::InvalidRect(self.viewport));
        }

        let [px, py] = self.pixel_aspect;
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(px) || !positive(py) {
            return Err(ViewportError::InvalidPixelAspect(px, py));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ViewportConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_serialization() {
        let mut config = ViewportConfig::default();
        config.viewport = ViewportRect::new(0.0, 0.5, 0.5, 1.0);
        let json = config.to_json().unwrap();
        let parsed = ViewportConfig::from_json(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let parsed = ViewportConfig::from_json(r#"{"pixel_aspect": [2.0, 1.0]}"#).unwrap();
        assert_eq!(parsed.pixel_aspect, [2.0, 1.0]);
        assert_eq!(parsed.viewport, ViewportRect::FULL);
    }

    #[test]
    fn test_invalid_rect() {
        let mut config = ViewportConfig::default();
        config.viewport = ViewportRect::new(0.6, 0.0, 0.4, 1.0);
        assert!(matches!(config.validate(), Err(ViewportError::InvalidRect(_))));
    }

    #[test]
    fn test_invalid_pixel_aspect() {
        let mut config = ViewportConfig::default();
        config.pixel_aspect = [0.0, 1.0];
        assert!(matches!(
            config.validate(),
            Err(ViewportError::InvalidPixelAspect(_, _))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            ViewportConfig::from_json("{"),
            Err(ViewportError::Config(_))
        ));
    }

    #[cfg(feature = "toml-config")]
    #[test]
    fn test_toml_round_trip() {
        let config = ViewportConfig::default();
        let text = config.to_toml().unwrap();
        assert_eq!(ViewportConfig::from_toml(&text).unwrap(), config);
    }
}
