use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::surface::Rgba;

/// Particle field tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub particle_count: usize,
    /// Initial velocity is drawn from `[-max_speed, max_speed]` per axis.
    pub max_speed: f32,
    pub radius_min: f32,
    pub radius_max: f32,
    /// Pointer links are drawn below this distance.
    pub link_distance: f32,
    /// Fraction of the way a linked particle moves toward the pointer per frame.
    pub attraction: f32,
    pub particle_colour: Rgba,
    /// Base colour for pointer links; its alpha is scaled by the link opacity.
    pub link_colour: Rgba,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 40,
            max_speed: 0.75,
            radius_min: 1.0,
            radius_max: 3.0,
            link_distance: 150.0,
            attraction: 0.02,
            particle_colour: Rgba::new(255, 255, 255, 0.5),
            link_colour: Rgba::WHITE,
        }
    }
}

impl FieldConfig {
    /// Largest accepted speed or length, in surface pixels. Keeps every
    /// sampling range finite.
    pub const MAX_EXTENT: f32 = 1.0e6;

    pub fn validate(&self) -> Result<(), ConfigError> {
        bounded("field.max_speed", self.max_speed, 0.0)?;
        bounded("field.radius_min", self.radius_min, 0.0)?;
        bounded("field.radius_max", self.radius_max, 0.0)?;
        bounded("field.link_distance", self.link_distance, 0.0)?;
        if self.radius_min <= 0.0 {
            return Err(ConfigError::NotPositive {
                field: "field.radius_min",
                value: self.radius_min,
            });
        }
        if self.radius_min > self.radius_max {
            return Err(ConfigError::InvertedRadius {
                min: self.radius_min,
                max: self.radius_max,
            });
        }
        if self.link_distance <= 0.0 {
            return Err(ConfigError::NotPositive {
                field: "field.link_distance",
                value: self.link_distance,
            });
        }
        unit_interval("field.attraction", self.attraction)?;
        unit_interval("field.particle_colour.a", self.particle_colour.a)?;
        unit_interval("field.link_colour.a", self.link_colour.a)?;
        Ok(())
    }
}

/// Scroll reveal settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub selector: String,
    pub visible_class: String,
    /// Visible fraction that counts as "seen".
    pub threshold: f32,
    pub root_margin: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selector: ".reveal".to_string(),
            visible_class: "visible".to_string(),
            threshold: 0.15,
            root_margin: "0px".to_string(),
        }
    }
}

impl RevealConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_empty("reveal.selector", &self.selector)?;
        non_empty("reveal.visible_class", &self.visible_class)?;
        unit_interval("reveal.threshold", self.threshold)?;
        Ok(())
    }
}

/// Focus mode selectors and state classes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusConfig {
    pub section_selector: String,
    pub focused_class: String,
    /// Class put on `<body>` while any section is focused.
    pub page_class: String,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            section_selector: "section".to_string(),
            focused_class: "focused".to_string(),
            page_class: "has-focus".to_string(),
        }
    }
}

impl FocusConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_empty("focus.section_selector", &self.section_selector)?;
        non_empty("focus.focused_class", &self.focused_class)?;
        non_empty("focus.page_class", &self.page_class)?;
        Ok(())
    }
}

/// Top-level configuration handed over from JavaScript as JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotlightConfig {
    pub field: FieldConfig,
    pub reveal: RevealConfig,
    pub focus: FocusConfig,
    /// `EnvFilter` directive for the console logger.
    pub log_level: String,
}

impl Default for SpotlightConfig {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            reveal: RevealConfig::default(),
            focus: FocusConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl SpotlightConfig {
    /// Parse and validate a JSON document; missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SpotlightConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.field.validate()?;
        self.reveal.validate()?;
        self.focus.validate()
    }
}

// Also rejects NaN and infinities.
fn bounded(field: &'static str, value: f32, min: f32) -> Result<(), ConfigError> {
    if (min..=FieldConfig::MAX_EXTENT).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            min,
            max: FieldConfig::MAX_EXTENT,
            value,
        })
    }
}

fn unit_interval(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            min: 0.0,
            max: 1.0,
            value,
        })
    }
}

fn non_empty(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        Err(ConfigError::Empty(field))
    } else {
        Ok(())
    }
}
