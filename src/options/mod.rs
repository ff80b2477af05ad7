//! Control options with TOML preset support.
//!
//! Feature switches, speeds, bounds and input bindings are consolidated
//! here. Options serialize to/from TOML so presets can live next to the
//! application that embeds the controls.

mod bindings;
mod controls;

use std::fmt;
use std::path::Path;

pub use bindings::{
    ArrowKey, BindingConfig, KeyBindings, MouseAction, MouseBindings,
    TouchAction, TouchBindings, TwoFingerAction,
};
pub use controls::ControlOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::GripError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[controls]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Feature switches, speeds and bounds.
    pub controls: ControlOptions,
    /// Mouse, touch and key bindings.
    #[schemars(skip)]
    pub bindings: BindingConfig,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// The JSON Schema as pretty-printed JSON, for settings UIs.
    pub fn schema_json() -> Result<String, GripError> {
        serde_json::to_string_pretty(&Self::json_schema())
            .map_err(|e| GripError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, GripError> {
        let content = std::fs::read_to_string(path).map_err(GripError::Io)?;
        toml::from_str(&content)
            .map_err(|e| GripError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), GripError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| GripError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(GripError::Io)?;
        }
        std::fs::write(path, content).map_err(GripError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

/// Non-fatal configuration problems found while building a controller.
///
/// Each one is logged once at construction; the offending values are
/// replaced with defaults and the controller keeps working.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigWarning {
    /// A speed or rate was negative or not finite.
    InvalidSpeed {
        /// Option field name.
        name: &'static str,
        /// Rejected value.
        value: f32,
    },
    /// `min_scale` was not a positive finite value or exceeded `max_scale`.
    InvalidScaleBounds {
        /// Rejected lower bound.
        min: f32,
        /// Rejected upper bound.
        max: f32,
    },
    /// Polar bounds outside `0..=π` or inverted.
    InvalidPolarBounds {
        /// Rejected lower bound.
        min: f32,
        /// Rejected upper bound.
        max: f32,
    },
    /// Azimuth bounds outside `[-2π, 2π]`, inverted, half-open, or spanning
    /// a full turn.
    InvalidAzimuthBounds {
        /// Rejected lower bound.
        min: f32,
        /// Rejected upper bound.
        max: f32,
    },
    /// The input source is the document root rather than the viewport
    /// element; gestures outside the viewport will be captured too.
    RootInputSource,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSpeed { name, value } => {
                write!(f, "{name} must be a non-negative number, got {value}")
            }
            Self::InvalidScaleBounds { min, max } => {
                write!(f, "invalid scale bounds {min}..{max}, using defaults")
            }
            Self::InvalidPolarBounds { min, max } => {
                write!(f, "polar bounds {min}..{max} must lie within 0..=π")
            }
            Self::InvalidAzimuthBounds { min, max } => write!(
                f,
                "azimuth bounds {min}..{max} must be a sub-range of \
                 [-2π, 2π] narrower than 2π"
            ),
            Self::RootInputSource => write!(
                f,
                "the document root should not be used as the input source, \
                 use the viewport element instead"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[controls]
rotate_speed = 0.25
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.controls.rotate_speed, 0.25);
        // Everything else should be default
        assert_eq!(opts.controls.max_scale, 2.0);
        assert_eq!(opts.bindings.mouse.left, MouseAction::Rotate);
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(opts.bindings.keys.lookup("ArrowDown"), Some(ArrowKey::Down));
        assert_eq!(opts.bindings.keys.lookup("KeyZ"), None);
    }

    #[test]
    fn save_then_load_and_list() {
        let dir = std::env::temp_dir()
            .join(format!("grip-presets-{}", std::process::id()));
        let opts = Options {
            controls: ControlOptions {
                zoom_speed: 2.0,
                ..ControlOptions::default()
            },
            ..Options::default()
        };
        opts.save(&dir.join("fast_zoom.toml")).unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let loaded = Options::load(&dir.join("fast_zoom.toml")).unwrap();
        assert_eq!(loaded, opts);
        assert_eq!(Options::list_presets(&dir), vec!["fast_zoom".to_owned()]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn load_reports_parse_errors() {
        let dir = std::env::temp_dir()
            .join(format!("grip-bad-preset-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.toml");
        std::fs::write(&path, "[controls]\nzoom_speed = \"fast\"\n").unwrap();

        let err = Options::load(&path).unwrap_err();
        assert!(matches!(err, GripError::OptionsParse(_)));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("controls"));
        assert!(!props.contains_key("bindings"));

        let controls = &props["controls"]["properties"];
        assert!(controls.get("rotate_speed").is_some());
        assert!(controls.get("pinch_enlarge_only").is_some());
        assert!(controls.get("min_azimuth_angle").is_none());
        assert!(controls.get("drag_zoom_rate").is_none());
    }

    #[test]
    fn schema_json_is_parseable() {
        let text = Options::schema_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["title"], "Options");
    }
}
