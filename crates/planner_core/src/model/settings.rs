//! Appearance settings.
//!
//! # Responsibility
//! - Hold the default settings record.
//! - Merge persisted values and partial updates onto defaults.
//!
//! # Invariants
//! - Only enumerated option values are ever stored.
//! - A missing or invalid persisted field falls back to its default; valid
//!   sibling fields are kept.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Background rendering mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BgMode {
    #[default]
    Image,
    Solid,
}

/// Accent color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    #[default]
    Blue,
    Green,
    Orange,
    Pink,
}

/// Error for a string outside an enumerated option set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsParseError {
    field: &'static str,
    value: String,
    expected: &'static str,
}

impl Display for SettingsParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported {} `{}`; expected {}",
            self.field, self.value, self.expected
        )
    }
}

impl Error for SettingsParseError {}

impl BgMode {
    /// Persisted and displayed name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Solid => "solid",
        }
    }
}

impl FromStr for BgMode {
    type Err = SettingsParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "image" => Ok(Self::Image),
            "solid" => Ok(Self::Solid),
            _ => Err(SettingsParseError {
                field: "bg mode",
                value: value.to_string(),
                expected: "image|solid",
            }),
        }
    }
}

impl Accent {
    /// Persisted and displayed name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Orange => "orange",
            Self::Pink => "pink",
        }
    }
}

impl FromStr for Accent {
    type Err = SettingsParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "blue" => Ok(Self::Blue),
            "green" => Ok(Self::Green),
            "orange" => Ok(Self::Orange),
            "pink" => Ok(Self::Pink),
            _ => Err(SettingsParseError {
                field: "accent",
                value: value.to_string(),
                expected: "blue|green|orange|pink",
            }),
        }
    }
}

/// Full settings record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub bg_mode: BgMode,
    pub reduced_motion: bool,
    pub accent: Accent,
}

/// Partial update; `None` keeps the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub bg_mode: Option<BgMode>,
    pub reduced_motion: Option<bool>,
    pub accent: Option<Accent>,
}

impl SettingsPatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.bg_mode.is_none() && self.reduced_motion.is_none() && self.accent.is_none()
    }
}

impl Settings {
    /// Returns a copy with `patch` applied.
    pub fn merged(mut self, patch: &SettingsPatch) -> Self {
        if let Some(bg_mode) = patch.bg_mode {
            self.bg_mode = bg_mode;
        }
        if let Some(reduced_motion) = patch.reduced_motion {
            self.reduced_motion = reduced_motion;
        }
        if let Some(accent) = patch.accent {
            self.accent = accent;
        }
        self
    }

    /// Merges a persisted JSON object onto the defaults field by field.
    ///
    /// Non-object values yield the defaults.
    pub fn from_persisted(value: &Value) -> Self {
        let defaults = Self::default();
        let Some(object) = value.as_object() else {
            return defaults;
        };

        let bg_mode = object
            .get("bgMode")
            .and_then(Value::as_str)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(defaults.bg_mode);
        let reduced_motion = object
            .get("reducedMotion")
            .and_then(Value::as_bool)
            .unwrap_or(defaults.reduced_motion);
        let accent = object
            .get("accent")
            .and_then(Value::as_str)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(defaults.accent);

        Self {
            bg_mode,
            reduced_motion,
            accent,
        }
    }
}
