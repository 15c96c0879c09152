//! Presentation settings
//!
//! Persisted in LocalStorage on the web target; defaults on native. Only
//! presentation preferences live here, never simulation state.

use serde::{Deserialize, Serialize};

/// Upscale filter used when blitting the offscreen target to the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ScaleFilter {
    #[default]
    Bilinear,
    Nearest,
}

impl ScaleFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScaleFilter::Bilinear => "Bilinear",
            ScaleFilter::Nearest => "Nearest",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bilinear" | "linear" => Some(ScaleFilter::Bilinear),
            "nearest" => Some(ScaleFilter::Nearest),
            _ => None,
        }
    }
}

/// Presentation preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Filter for the final upscale blit
    pub scale_filter: ScaleFilter,
    /// Log a frame-rate summary once per second
    pub log_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scale_filter: ScaleFilter::Bilinear,
            log_fps: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "vector_drift_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
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
