//! Display lookup for overlay activation.
//!
//! The host identifies the display to cover by handle. This module resolves
//! that handle to bounds and a scale factor, using the `screenshots` crate
//! for enumeration so it works on X11, Wayland, Windows and macOS.
//!
//! # Example
//!
//! ```ignore
//! use region_select_core::display::DisplayCatalog;
//!
//! let catalog = DisplayCatalog::new()?;
//! for line in catalog.describe() {
//!     println!("{}", line);
//! }
//! let target = catalog.find(65537)?;
//! ```

use crate::error::{AppError, Result};
use screenshots::Screen;
use std::fmt;

/// A display the overlay can cover.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayTarget {
    /// Platform display handle, as the host knows it.
    pub handle: i64,
    /// Left edge in desktop coordinates.
    pub x: i32,
    /// Top edge in desktop coordinates.
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Scale factor reported by the platform.
    pub scale_factor: f32,
    pub is_primary: bool,
}

impl fmt::Display for DisplayTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Display {}: {}x{} at ({}, {}) (scale: {}){}",
            self.handle,
            self.width,
            self.height,
            self.x,
            self.y,
            self.scale_factor,
            if self.is_primary { " [primary]" } else { "" }
        )
    }
}

/// Snapshot of the connected displays.
#[derive(Debug, Clone)]
pub struct DisplayCatalog {
    displays: Vec<DisplayTarget>,
}

impl DisplayCatalog {
    /// Enumerates connected displays.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DisplayEnumeration`] if:
    /// - Enumeration fails (e.g., no display server available)
    /// - No displays are detected
    pub fn new() -> Result<Self> {
        let screens = Screen::all()
            .map_err(|e| AppError::display(format!("Failed to enumerate screens: {}", e)))?;

        let displays = screens
            .iter()
            .map(|s| DisplayTarget {
                handle: i64::from(s.display_info.id),
                x: s.display_info.x,
                y: s.display_info.y,
                width: s.display_info.width,
                height: s.display_info.height,
                scale_factor: s.display_info.scale_factor,
                is_primary: s.display_info.is_primary,
            })
            .collect();

        Self::from_displays(displays)
    }

    /// Builds a catalog from known displays.
    pub fn from_displays(displays: Vec<DisplayTarget>) -> Result<Self> {
        if displays.is_empty() {
            return Err(AppError::display("No displays detected"));
        }
        Ok(Self { displays })
    }

    /// Human-readable line per display.
    pub fn describe(&self) -> Vec<String> {
        self.displays.iter().map(ToString::to_string).collect()
    }

    /// Looks a display up by handle.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DisplayNotFound`] for an unknown handle.
    pub fn find(&self, handle: i64) -> Result<&DisplayTarget> {
        self.displays
            .iter()
            .find(|d| d.handle == handle)
            .ok_or(AppError::DisplayNotFound(handle))
    }

    /// The primary display, or the first one when none is flagged.
    pub fn primary(&self) -> &DisplayTarget {
        self.displays
            .iter()
            .find(|d| d.is_primary)
            .unwrap_or(&self.displays[0])
    }
}
