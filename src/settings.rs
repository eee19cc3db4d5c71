//! Scene settings
//!
//! Tick periods, surface size and quality. Loaded from JSON; any failure
//! falls back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{
    BOUNDS_MARGIN, DEFAULT_HEIGHT, DEFAULT_WIDTH, LOGIC_TICK_MS, MAX_SUBSTEPS, RENDER_TICK_MS,
};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Multiplier applied to every system's emission rate
    pub fn emit_scale(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.5,
            QualityPreset::Medium => 1.0,
            QualityPreset::High => 1.5,
        }
    }
}

/// Scene settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Logic tick period (ms)
    pub logic_tick_ms: f32,
    /// Render tick period (ms)
    pub render_tick_ms: f32,
    /// Cap on logic ticks per `advance` call
    pub max_substeps: u32,
    /// Off-screen margin before particles are culled (px)
    pub bounds_margin: f32,
    /// RNG seed; `None` uses a fixed default
    pub seed: Option<u64>,
    pub quality: QualityPreset,
    /// Surface size (px)
    pub width: f32,
    pub height: f32,
    /// Index into `LevelKind::all()`
    pub start_level: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            logic_tick_ms: LOGIC_TICK_MS,
            render_tick_ms: RENDER_TICK_MS,
            max_substeps: MAX_SUBSTEPS,
            bounds_margin: BOUNDS_MARGIN,
            seed: None,
            quality: QualityPreset::Medium,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            start_level: 0,
        }
    }
}

impl Settings {
    /// Default seed when none is configured
    pub const DEFAULT_SEED: u64 = 0x5EED_B1AC_401E;

    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Integration step in render-frame units (`logic / render`)
    pub fn dt(&self) -> f32 {
        if self.render_tick_ms <= 0.0 {
            return 1.0;
        }
        self.logic_tick_ms / self.render_tick_ms
    }

    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or(Self::DEFAULT_SEED)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {} (using defaults)", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings {}: {} (using defaults)", path.display(), e);
                Self::default()
            }
        }
    }
}
