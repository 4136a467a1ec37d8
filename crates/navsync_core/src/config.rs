//! Synchronizer configuration.
//!
//! # Responsibility
//! - Define the tunables for section focus, indicator animation and the
//!   experience timeline.
//! - Load configuration from JSON and validate it before use.
//!
//! # Invariants
//! - Every field has a default, so partial documents are accepted.
//! - A config that passed `validate()` never yields an empty focus band.

use crate::model::nav::NavItems;
use crate::port::Easing;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::Duration;

const DEFAULT_TOP_MARGIN_PCT: f64 = 40.0;
const DEFAULT_BOTTOM_MARGIN_PCT: f64 = 55.0;
const DEFAULT_THRESHOLDS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];
const DEFAULT_TWEEN_MS: u64 = 300;
const DEFAULT_MAX_BULLETS: usize = 8;
const DEFAULT_TIMELINE_START_OFFSET_PX: f64 = 40.0;

/// Top-level synchronizer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub items: NavItems,
    pub focus_band: FocusBand,
    pub indicator: IndicatorConfig,
    pub timeline: TimelineConfig,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            items: NavItems::portfolio_default(),
            focus_band: FocusBand::default(),
            indicator: IndicatorConfig::default(),
            timeline: TimelineConfig::default(),
        }
    }
}

impl NavConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Checks cross-field invariants that serde cannot express.
    ///
    /// `items` needs no check here: `NavItems` is only constructible through
    /// its validating constructors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.focus_band.validate()?;
        if self.timeline.max_bullets == 0 {
            return Err(ConfigError::InvalidMaxBullets);
        }
        if !self.timeline.start_offset_px.is_finite() {
            return Err(ConfigError::InvalidMargin {
                name: "timeline.start_offset_px",
                value: self.timeline.start_offset_px,
            });
        }
        Ok(())
    }
}

/// Vertical viewport band inside which a section counts as "in focus".
///
/// Margins are percentages of the viewport height cut from the top and the
/// bottom. The defaults leave a thin band just above the middle of the
/// screen, so a section that merely peeks in at the bottom edge never
/// activates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusBand {
    pub top_margin_pct: f64,
    pub bottom_margin_pct: f64,
    /// Visibility ratios at which the host should report changes.
    pub thresholds: Vec<f64>,
}

impl Default for FocusBand {
    fn default() -> Self {
        Self {
            top_margin_pct: DEFAULT_TOP_MARGIN_PCT,
            bottom_margin_pct: DEFAULT_BOTTOM_MARGIN_PCT,
            thresholds: DEFAULT_THRESHOLDS.to_vec(),
        }
    }
}

impl FocusBand {
    /// Band top boundary in viewport pixels.
    pub fn top_px(&self, viewport_height: f64) -> f64 {
        viewport_height * self.top_margin_pct / 100.0
    }

    /// Band bottom boundary in viewport pixels.
    pub fn bottom_px(&self, viewport_height: f64) -> f64 {
        viewport_height * (100.0 - self.bottom_margin_pct) / 100.0
    }

    /// Converts a viewport-relative element top into a band-relative offset.
    pub fn offset_from_top(&self, element_top: f64, viewport_height: f64) -> f64 {
        element_top - self.top_px(viewport_height)
    }

    /// Whether an element spanning `[top, bottom)` crosses the band.
    pub fn intersects(&self, top: f64, bottom: f64, viewport_height: f64) -> bool {
        top < self.bottom_px(viewport_height) && bottom > self.top_px(viewport_height)
    }

    /// Root-margin string for DOM intersection observers, e.g.
    /// `-40% 0px -55% 0px`.
    pub fn root_margin(&self) -> String {
        format!("-{}% 0px -{}% 0px", self.top_margin_pct, self.bottom_margin_pct)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("focus_band.top_margin_pct", self.top_margin_pct),
            ("focus_band.bottom_margin_pct", self.bottom_margin_pct),
        ] {
            if !value.is_finite() || !(0.0..100.0).contains(&value) {
                return Err(ConfigError::InvalidMargin { name, value });
            }
        }
        if self.top_margin_pct + self.bottom_margin_pct >= 100.0 {
            return Err(ConfigError::InvalidBand {
                top: self.top_margin_pct,
                bottom: self.bottom_margin_pct,
            });
        }
        if self.thresholds.is_empty() {
            return Err(ConfigError::MissingThresholds);
        }
        if let Some(bad) = self
            .thresholds
            .iter()
            .copied()
            .find(|value| !value.is_finite() || !(0.0..=1.0).contains(value))
        {
            return Err(ConfigError::InvalidThreshold(bad));
        }
        Ok(())
    }
}

/// Indicator tween settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Tween duration; `0` applies geometry immediately.
    pub tween_ms: u64,
    pub easing: Easing,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            tween_ms: DEFAULT_TWEEN_MS,
            easing: Easing::Power3Out,
        }
    }
}

impl IndicatorConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.tween_ms)
    }
}

/// Experience timeline settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Bullets shown per entry while collapsed.
    pub max_bullets: usize,
    /// Timeline progress starts when the section top passes
    /// `viewport center + start_offset_px`.
    pub start_offset_px: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            max_bullets: DEFAULT_MAX_BULLETS,
            start_offset_px: DEFAULT_TIMELINE_START_OFFSET_PX,
        }
    }
}

/// Configuration load/validation errors.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: String,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    InvalidMargin {
        name: &'static str,
        value: f64,
    },
    InvalidBand {
        top: f64,
        bottom: f64,
    },
    MissingThresholds,
    InvalidThreshold(f64),
    InvalidMaxBullets,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read config `{path}`: {source}"),
            Self::Parse(err) => write!(f, "invalid config document: {err}"),
            Self::InvalidMargin { name, value } => {
                write!(f, "{name} is out of range: {value}")
            }
            Self::InvalidBand { top, bottom } => write!(
                f,
                "focus band is empty: top margin {top}% + bottom margin {bottom}% must stay below 100%"
            ),
            Self::MissingThresholds => write!(f, "focus_band.thresholds must not be empty"),
            Self::InvalidThreshold(value) => {
                write!(f, "focus band threshold must lie in [0, 1], got {value}")
            }
            Self::InvalidMaxBullets => write!(f, "timeline.max_bullets must be at least 1"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}
