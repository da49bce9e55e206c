use crate::error::{AppError, Result};
use crate::geometry::DeviceScale;
use crate::ui::MIN_SELECTION_SIZE;
use dotenvy::dotenv;
use std::env;

/// Behaviour of the selector, loaded from the environment.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Selections must be strictly larger than this in both physical
    /// dimensions.
    pub min_selection_size: u32,
    /// Fixed device scale; sampled from the overlay when `None`.
    pub scale_override: Option<DeviceScale>,
    /// Draw the physical-pixel readout next to the selection.
    pub show_readout: bool,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load .env file if it exists, ignore if it doesn't
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut builder = Self::builder();

        if let Some(raw) = lookup("REGION_SELECT_MIN_SIZE") {
            let size = raw.trim().parse::<u32>().map_err(|_| {
                AppError::config(format!("REGION_SELECT_MIN_SIZE must be a whole number, got '{}'", raw))
            })?;
            builder = builder.with_min_selection_size(size);
        }

        if let Some(raw) = lookup("REGION_SELECT_SCALE") {
            let factor = raw.trim().parse::<f64>().map_err(|_| {
                AppError::config(format!("REGION_SELECT_SCALE must be a number, got '{}'", raw))
            })?;
            builder = builder.with_scale(factor);
        }

        if let Some(raw) = lookup("REGION_SELECT_SHOW_READOUT") {
            let show = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(AppError::config(format!(
                        "REGION_SELECT_SHOW_READOUT must be a boolean, got '{}'",
                        raw
                    )));
                }
            };
            builder = builder.with_readout(show);
        }

        builder.build()
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Builder seeded with this config, for layering overrides on top.
    pub fn to_builder(&self) -> ConfigBuilder {
        ConfigBuilder {
            min_selection_size: Some(self.min_selection_size),
            scale: self.scale_override.map(DeviceScale::factor),
            show_readout: Some(self.show_readout),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_selection_size: MIN_SELECTION_SIZE,
            scale_override: None,
            show_readout: true,
        }
    }
}

/// Programmatic construction of a [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    min_selection_size: Option<u32>,
    scale: Option<f64>,
    show_readout: Option<bool>,
}

impl ConfigBuilder {
    pub fn with_min_selection_size(mut self, size: u32) -> Self {
        self.min_selection_size = Some(size);
        self
    }

    pub fn with_scale(mut self, factor: f64) -> Self {
        self.scale = Some(factor);
        self
    }

    pub fn with_readout(mut self, show: bool) -> Self {
        self.show_readout = Some(show);
        self
    }

    /// Validates and builds the config.
    ///
    /// # Errors
    /// Returns [`AppError::InvalidScale`] for a non-positive scale and
    /// [`AppError::Config`] for a minimum size below [`MIN_SELECTION_SIZE`].
    pub fn build(self) -> Result<Config> {
        let defaults = Config::default();
        let min_selection_size = self.min_selection_size.unwrap_or(defaults.min_selection_size);
        if min_selection_size < MIN_SELECTION_SIZE {
            return Err(AppError::config(format!(
                "minimum selection size must be at least {}px, got {}",
                MIN_SELECTION_SIZE, min_selection_size
            )));
        }
        Ok(Config {
            min_selection_size,
            scale_override: self.scale.map(DeviceScale::new).transpose()?,
            show_readout: self.show_readout.unwrap_or(defaults.show_readout),
        })
    }
}
