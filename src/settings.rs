//! Effect settings and preferences
//!
//! Persisted as JSON in LocalStorage. Every field has a default, so older
//! saved blobs missing newer fields still load.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_DURATION_MS;

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

    /// Confetti density multiplier (1.0 = stock look)
    pub fn density_scale(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.4,
            QualityPreset::Medium => 1.0,
            QualityPreset::High => 1.5,
        }
    }
}

/// Effect settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Master particle toggle
    pub particles: bool,
    /// Reduced motion (skip firework flashes, keep the confetti)
    pub reduced_motion: bool,

    // === Timing ===
    /// Celebration length when the page does not pass one (ms)
    pub duration_ms: f64,
    /// Delay before the first firework burst (ms)
    pub first_burst_delay_ms: f64,
    /// Random delay between bursts, `[min, max)` (ms)
    pub burst_interval_ms: (f64, f64),

    // === Density ===
    /// Confetti pieces seeded on start (before quality scaling)
    pub initial_confetti: usize,
    /// Respawn stops once this many pieces are alive (before quality scaling)
    pub confetti_cap: usize,
    /// Pieces respawned per frame while under the cap
    pub confetti_per_frame: usize,
    /// Sparks per burst, `[min, max)`
    pub burst_sparks: (u32, u32),
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            reduced_motion: false,

            duration_ms: DEFAULT_DURATION_MS,
            first_burst_delay_ms: 120.0,
            burst_interval_ms: (420.0, 900.0),

            initial_confetti: 160,
            confetti_cap: 180,
            confetti_per_frame: 6,
            burst_sparks: (70, 120),
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Switch quality by preset name ("low", "medium"/"med", "high").
    ///
    /// Returns the applied preset, or `None` (settings untouched) for an
    /// unknown name.
    pub fn apply_quality(&mut self, name: &str) -> Option<QualityPreset> {
        let Some(preset) = QualityPreset::from_str(name) else {
            log::warn!("Unknown quality preset {:?}", name);
            return None;
        };
        self.quality = preset;
        log::info!("Quality set to {}", preset.as_str());
        Some(preset)
    }

    /// Effective confetti cap (respects quality and the particle toggle)
    pub fn max_confetti(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.scaled(self.confetti_cap)
        }
    }

    /// Effective initial seed count (never above the cap)
    pub fn initial_confetti(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.scaled(self.initial_confetti).min(self.max_confetti())
        }
    }

    /// Whether firework bursts run at all
    pub fn fireworks_enabled(&self) -> bool {
        self.particles && !self.reduced_motion
    }

    fn scaled(&self, n: usize) -> usize {
        (n as f32 * self.quality.density_scale()).round() as usize
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "celebration_fx_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
