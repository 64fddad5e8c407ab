//! Configuration for the head panel.
//!
//! [`PanelConfig`] is consumed once at construction. Everything in
//! [`PanelSettings`] stays a public field on the panel and may be changed at
//! any time afterwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color_scheme::ColorScheme;
use crate::events::EventController;
use crate::transmit::TransmitMode;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse panel configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Tunables that can be changed on a live panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelSettings {
    pub transmit_mode: TransmitMode,
    /// Direction the listener faces, in degrees (0° = up, clockwise).
    pub head_orientation: f32,
    /// Report angles relative to `head_orientation` instead of the panel.
    pub angle_relative_to_head: bool,
    /// Master switch for pointer interaction.
    pub clickable: bool,
    /// Whether a pointer-down on empty space creates a new source.
    pub new_points_generatable: bool,
    /// Scale between meters and pixels.
    pub pixels_per_meter: f32,
    /// Radius of a source marker, also the hit-test half-width.
    pub node_radius: f32,
    /// Radius of the listener head marker.
    pub listener_radius: f32,
    /// Gap between a marker's edge and its label.
    pub label_margin: f32,
    /// Palette index used for sources created by pointer.
    pub default_color_index: usize,
    /// Maximum distance from the listener in pixels. `None` derives it from
    /// the panel size.
    pub boundary_radius: Option<f32>,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            transmit_mode: TransmitMode::ActiveOnly,
            head_orientation: 0.0,
            angle_relative_to_head: false,
            clickable: true,
            new_points_generatable: true,
            pixels_per_meter: 40.0,
            node_radius: 10.0,
            listener_radius: 14.0,
            label_margin: 4.0,
            default_color_index: 0,
            boundary_radius: None,
        }
    }
}

impl PanelSettings {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.pixels_per_meter.is_finite() && self.pixels_per_meter > 0.0) {
            return Err(ConfigError::Invalid {
                field: "pixels_per_meter",
                reason: format!("must be a positive number, got {}", self.pixels_per_meter),
            });
        }
        if !(self.node_radius.is_finite() && self.node_radius >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "node_radius",
                reason: format!("must be non-negative, got {}", self.node_radius),
            });
        }
        if let Some(r) = self.boundary_radius {
            if !(r.is_finite() && r >= 0.0) {
                return Err(ConfigError::Invalid {
                    field: "boundary_radius",
                    reason: format!("must be non-negative, got {r}"),
                });
            }
        }
        if !self.head_orientation.is_finite() {
            return Err(ConfigError::Invalid {
                field: "head_orientation",
                reason: "must be finite".to_string(),
            });
        }
        Ok(())
    }
}

/// Construction-time options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Panel width and height in pixels.
    pub size: [f32; 2],
    pub settings: PanelSettings,
    #[serde(skip)]
    pub color_scheme: ColorScheme,
    /// Sink for change events. A fresh controller is created when absent.
    #[serde(skip)]
    pub event_controller: Option<EventController>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            size: [300.0, 300.0],
            settings: PanelSettings::default(),
            color_scheme: ColorScheme::default(),
            event_controller: None,
        }
    }
}

impl PanelConfig {
    pub fn with_size(width: f32, height: f32) -> Self {
        Self {
            size: [width, height],
            ..Self::default()
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size.iter().any(|v| !(v.is_finite() && *v > 0.0)) {
            return Err(ConfigError::Invalid {
                field: "size",
                reason: format!("width and height must be positive, got {:?}", self.size),
            });
        }
        self.settings.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let s = PanelSettings::from_json_str(r#"{"transmit_mode":"all","head_orientation":45}"#)
            .unwrap();
        assert_eq!(s.transmit_mode, TransmitMode::All);
        assert_eq!(s.head_orientation, 45.0);
        assert!(s.clickable);
        assert_eq!(s.pixels_per_meter, PanelSettings::default().pixels_per_meter);
    }

    #[test]
    fn config_reads_size() {
        let cfg = PanelConfig::from_json_str(r#"{"size":[400,250]}"#).unwrap();
        assert_eq!(cfg.size, [400.0, 250.0]);
        assert!(cfg.event_controller.is_none());
    }

    #[test]
    fn rejects_non_positive_scale() {
        let err = PanelSettings::from_json_str(r#"{"pixels_per_meter":0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "pixels_per_meter", .. }));
    }

    #[test]
    fn rejects_bad_size() {
        let err = PanelConfig::from_json_str(r#"{"size":[0,100]}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "size", .. }));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = PanelConfig::from_json_str("{size:").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("failed to parse"));
    }
}
