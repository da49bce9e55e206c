//! Region Select Core Library
//!
//! This library provides the core of the region-select overlay: the user
//! drags a box over a transparent fullscreen surface and the selected
//! rectangle is reported, in physical pixels, to a recording subsystem.
//!
//! # Overview
//!
//! - **Geometry**: Logical vs. physical pixel types via [`geometry`]
//! - **State machine**: Drag tracking and exactly-once reporting via [`ui::RegionSelector`]
//! - **Host boundary**: Outcome and close events via [`host`]
//! - **Displays**: Target display lookup via [`display`]
//! - **User Interface**: The eframe overlay via [`ui`]
//!
//! # Quick Start
//!
//! ```ignore
//! use region_select_core::{host::event_channel, RegionSelect};
//!
//! let app = RegionSelect::new()?;
//! let (events, _rx) = event_channel();
//!
//! let outcome = app.run_interactive(None, events)?;
//! println!("{:?}", outcome);
//! ```
//!
//! # Module Structure
//!
//! - [`config`]: Configuration loading and management
//! - [`display`]: Display enumeration
//! - [`error`]: Error types and result aliases
//! - [`geometry`]: Coordinate spaces and conversion
//! - [`host`]: Host-facing sink and wire events
//! - [`ui`]: Selector state machine and overlay

pub mod config;
pub mod display;
pub mod error;
pub mod geometry;
pub mod host;
pub mod ui;

// Re-export primary types for convenience
pub use config::Config;
pub use display::{DisplayCatalog, DisplayTarget};
pub use error::{AppError, Result};
pub use geometry::{DeviceScale, LogicalPoint, Region};
pub use host::{Activation, EventSender, HostEvent, OverlayHost};
pub use ui::{RegionSelector, SelectorOutcome, Settings};

/// Main entry point for hosts that want the whole workflow.
///
/// Resolves the target display, runs one activation of the overlay and
/// remembers the display for next time.
pub struct RegionSelect {
    config: Config,
    settings: Settings,
    displays: DisplayCatalog,
}

impl RegionSelect {
    /// Creates an instance with configuration from the environment and
    /// persisted settings.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An environment variable holds an invalid value
    /// - Display enumeration fails (e.g., no display available)
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Self::with_config(config)
    }

    /// Creates an instance with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if display enumeration fails.
    pub fn with_config(config: Config) -> Result<Self> {
        let displays = DisplayCatalog::new()?;
        Ok(Self {
            config,
            settings: Settings::load(),
            displays,
        })
    }

    /// Lists available displays.
    pub fn list_displays(&self) -> Vec<String> {
        self.displays.describe()
    }

    /// Resolves the display to cover: the requested handle, else the last
    /// one used if it is still connected, else the primary display.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DisplayNotFound`] if an explicit handle is unknown.
    pub fn resolve_target(&self, handle: Option<i64>) -> Result<&DisplayTarget> {
        match handle {
            Some(handle) => self.displays.find(handle),
            None => Ok(self
                .settings
                .last_display
                .and_then(|last| self.displays.find(last).ok())
                .unwrap_or_else(|| self.displays.primary())),
        }
    }

    /// Runs one activation of the overlay.
    ///
    /// # Arguments
    /// * `handle` - Display to cover, see [`resolve_target`](Self::resolve_target)
    /// * `events` - Channel the outcome and close request are sent on
    pub fn run_interactive(&mut self, handle: Option<i64>, events: EventSender) -> Result<SelectorOutcome> {
        let target = self.resolve_target(handle)?.clone();
        self.activate(&Activation {
            target_display_handle: target.handle,
        }, events)
    }

    /// Runs one activation for a host-supplied [`Activation`].
    pub fn activate(&mut self, activation: &Activation, events: EventSender) -> Result<SelectorOutcome> {
        let target = self.displays.find(activation.target_display_handle)?.clone();
        log::info!("Activating overlay on {}", target);

        let outcome = ui::run_region_selector(&target, self.config.clone(), self.settings.clone(), events)?;

        if self.settings.last_display != Some(target.handle) {
            self.settings.last_display = Some(target.handle);
            if let Err(e) = self.settings.save() {
                log::warn!("Failed to save settings: {}", e);
            }
        }

        Ok(outcome)
    }
}
